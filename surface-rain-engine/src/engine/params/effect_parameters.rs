use bevy::prelude::*;
use constants::effect::{
    CHARACTER_SCALE_RANGE, COLOR_CHANNEL_RANGE, ColorPreset, DEFAULT_CHARACTER_SCALE,
    DEFAULT_DENSITY, DEFAULT_FALL_SPEED, DEFAULT_GLOW_INTENSITY, DEFAULT_TRAIL_LENGTH,
    DENSITY_RANGE, FALL_SPEED_RANGE, GLOW_INTENSITY_RANGE, GREEN, TRAIL_LENGTH_RANGE, find_preset,
};
use serde::{Deserialize, Serialize};

use crate::engine::rain::RainPalette;

/// User-facing effect controls. Loaded from JSON and always clamped before use.
#[derive(Asset, Resource, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath)]
#[serde(default)]
pub struct EffectParameters {
    /// Seconds since startup, advanced every frame.
    #[serde(skip)]
    pub time: f32,
    pub density: f32,
    pub fall_speed: f32,
    pub glow_intensity: f32,
    pub base_color: [f32; 3],
    pub highlight_color: [f32; 3],
    pub character_scale: f32,
    pub trail_length: f32,
    /// Named colour preset. Overrides both colours when it names a known preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Refreshed periodically; drives flicker phases.
    #[serde(skip)]
    pub random_seed: u64,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            time: 0.0,
            density: DEFAULT_DENSITY,
            fall_speed: DEFAULT_FALL_SPEED,
            glow_intensity: DEFAULT_GLOW_INTENSITY,
            base_color: GREEN.base,
            highlight_color: GREEN.highlight,
            character_scale: DEFAULT_CHARACTER_SCALE,
            trail_length: DEFAULT_TRAIL_LENGTH,
            preset: None,
            random_seed: 0,
        }
    }
}

impl EffectParameters {
    pub fn clamped(&self) -> Self {
        let channel = |c: [f32; 3]| c.map(|v| COLOR_CHANNEL_RANGE.clamp(v));
        Self {
            time: self.time,
            density: DENSITY_RANGE.clamp(self.density),
            fall_speed: FALL_SPEED_RANGE.clamp(self.fall_speed),
            glow_intensity: GLOW_INTENSITY_RANGE.clamp(self.glow_intensity),
            base_color: channel(self.base_color),
            highlight_color: channel(self.highlight_color),
            character_scale: CHARACTER_SCALE_RANGE.clamp(self.character_scale),
            trail_length: TRAIL_LENGTH_RANGE.clamp(self.trail_length),
            preset: self.preset.clone(),
            random_seed: self.random_seed,
        }
    }

    pub fn with_preset(mut self, preset: &ColorPreset) -> Self {
        self.base_color = preset.base;
        self.highlight_color = preset.highlight;
        self.preset = Some(preset.name.to_string());
        self
    }

    /// Resolves the `preset` name into colours. Unknown names keep the explicit colours
    /// and are returned as the error.
    pub fn resolve_preset(self) -> Result<Self, (Self, String)> {
        let Some(name) = self.preset.clone() else {
            return Ok(self);
        };
        match find_preset(&name) {
            Some(preset) => Ok(self.with_preset(preset)),
            None => Err((Self { preset: None, ..self }, name)),
        }
    }

    /// Glyph repeats per UV unit.
    pub fn uv_scale(&self) -> f32 {
        let clamped = self.clamped();
        clamped.density / clamped.character_scale
    }

    /// True when two parameter sets would produce different materials or trails.
    /// Time and seed are ignored.
    pub fn differs_visually(&self, other: &Self) -> bool {
        let strip = |p: &Self| Self {
            time: 0.0,
            random_seed: 0,
            ..p.clamped()
        };
        strip(self) != strip(other)
    }

    pub fn palette(&self) -> RainPalette {
        let clamped = self.clamped();
        RainPalette {
            base: clamped.base_color,
            highlight: clamped.highlight_color,
            time: self.time,
            seed: self.random_seed,
        }
    }
}
