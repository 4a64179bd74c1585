/// Inclusive parameter range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp into the range. NaN collapses to the minimum.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Glyph tiling density (characters per UV unit).
pub const DENSITY_RANGE: ParamRange = ParamRange::new(0.5, 5.0);

/// Fall speed multiplier applied to the simulation step.
pub const FALL_SPEED_RANGE: ParamRange = ParamRange::new(0.1, 3.0);

/// Emissive glow multiplier.
pub const GLOW_INTENSITY_RANGE: ParamRange = ParamRange::new(0.0, 2.0);

/// Glyph size multiplier.
pub const CHARACTER_SCALE_RANGE: ParamRange = ParamRange::new(0.5, 2.0);

/// Fade trail length in rows.
pub const TRAIL_LENGTH_RANGE: ParamRange = ParamRange::new(1.0, 20.0);

/// Normalised colour channel range.
pub const COLOR_CHANNEL_RANGE: ParamRange = ParamRange::new(0.0, 1.0);

pub const DEFAULT_DENSITY: f32 = 1.5;
pub const DEFAULT_FALL_SPEED: f32 = 1.0;
pub const DEFAULT_GLOW_INTENSITY: f32 = 0.8;
pub const DEFAULT_CHARACTER_SCALE: f32 = 1.0;
pub const DEFAULT_TRAIL_LENGTH: f32 = 12.0;

/// Named base/highlight colour pair.
pub struct ColorPreset {
    pub name: &'static str,
    pub base: [f32; 3],
    pub highlight: [f32; 3],
}

pub const GREEN: ColorPreset = ColorPreset {
    name: "green",
    base: [0.0, 1.0, 0.3],
    highlight: [0.7, 1.0, 0.8],
};

pub const BLUE: ColorPreset = ColorPreset {
    name: "blue",
    base: [0.0, 0.5, 1.0],
    highlight: [0.5, 0.8, 1.0],
};

pub const RED: ColorPreset = ColorPreset {
    name: "red",
    base: [1.0, 0.2, 0.1],
    highlight: [1.0, 0.6, 0.5],
};

pub const PURPLE: ColorPreset = ColorPreset {
    name: "purple",
    base: [0.6, 0.2, 1.0],
    highlight: [0.8, 0.6, 1.0],
};

pub const GOLD: ColorPreset = ColorPreset {
    name: "gold",
    base: [1.0, 0.8, 0.0],
    highlight: [1.0, 1.0, 0.7],
};

pub const COLOR_PRESETS: &[ColorPreset] = &[GREEN, BLUE, RED, PURPLE, GOLD];

pub fn find_preset(name: &str) -> Option<&'static ColorPreset> {
    COLOR_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
