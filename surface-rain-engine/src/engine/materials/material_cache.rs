use std::collections::HashMap;
use std::sync::Arc;

use bevy::math::Affine2;
use bevy::prelude::*;
use constants::render_settings::{SURFACE_ALPHA, UNKNOWN_SURFACE_ALPHA};

use crate::engine::classification::SurfaceType;
use crate::engine::params::EffectParameters;

/// Everything a material is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialInputs {
    pub parameters: EffectParameters,
    /// Latest rain frame, or the atlas before the first frame. `None` means untextured.
    pub texture: Option<Handle<Image>>,
}

/// Backend-neutral description of one surface type's look.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    pub surface: SurfaceType,
    pub base: Color,
    pub highlight: Color,
    pub texture: Option<Handle<Image>>,
    pub alpha: f32,
    pub glow: f32,
    pub uv_scale: f32,
}

impl SurfaceMaterial {
    pub fn new(surface: SurfaceType, inputs: &MaterialInputs) -> Self {
        let parameters = inputs.parameters.clamped();
        let [r, g, b] = parameters.base_color;
        let [hr, hg, hb] = parameters.highlight_color;
        Self {
            surface,
            base: Color::srgb(r, g, b),
            highlight: Color::srgb(hr, hg, hb),
            texture: inputs.texture.clone(),
            alpha: match surface {
                SurfaceType::Unknown => UNKNOWN_SURFACE_ALPHA,
                _ => SURFACE_ALPHA,
            },
            glow: parameters.glow_intensity,
            uv_scale: parameters.uv_scale(),
        }
    }

    /// Unlit, alpha-blended and visible from both sides.
    ///
    /// A textured material carries its colours in the rain frame, so the tint is white
    /// scaled by the glow. An untextured material falls back to a flat base tint.
    pub fn to_standard_material(&self) -> StandardMaterial {
        let gain = 1.0 + self.glow;
        let tint = match self.texture {
            Some(_) => LinearRgba::new(gain, gain, gain, self.alpha),
            None => {
                let base = self.base.to_linear();
                LinearRgba::new(base.red * gain, base.green * gain, base.blue * gain, self.alpha)
            }
        };
        let highlight = self.highlight.to_linear();

        StandardMaterial {
            base_color: Color::LinearRgba(tint),
            base_color_texture: self.texture.clone(),
            emissive: LinearRgba::rgb(highlight.red, highlight.green, highlight.blue) * self.glow,
            emissive_texture: self.texture.clone(),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            uv_transform: Affine2::from_scale(Vec2::splat(self.uv_scale)),
            ..default()
        }
    }
}

/// Surface type to shared material, rebuilt lazily after each invalidation.
#[derive(Resource, Debug, Default)]
pub struct MaterialCache {
    entries: HashMap<SurfaceType, Arc<SurfaceMaterial>>,
    inputs: MaterialInputs,
    generation: u64,
}

impl MaterialCache {
    pub fn new(inputs: MaterialInputs) -> Self {
        Self {
            inputs,
            ..default()
        }
    }

    /// Cached material, created on first request after an invalidation.
    pub fn get(&mut self, surface: SurfaceType) -> Arc<SurfaceMaterial> {
        let inputs = &self.inputs;
        self.entries
            .entry(surface)
            .or_insert_with(|| Arc::new(SurfaceMaterial::new(surface, inputs)))
            .clone()
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// One material per surface type, created as needed.
    pub fn all_materials(&mut self) -> HashMap<SurfaceType, Arc<SurfaceMaterial>> {
        SurfaceType::ALL
            .into_iter()
            .map(|surface| (surface, self.get(surface)))
            .collect()
    }

    pub fn set_inputs(&mut self, inputs: MaterialInputs) {
        self.inputs = inputs;
        self.invalidate();
    }

    pub fn set_parameters(&mut self, parameters: EffectParameters) {
        self.set_inputs(MaterialInputs {
            parameters,
            texture: self.inputs.texture.clone(),
        });
    }

    pub fn set_texture(&mut self, texture: Option<Handle<Image>>) {
        self.set_inputs(MaterialInputs {
            parameters: self.inputs.parameters.clone(),
            texture,
        });
    }

    pub fn inputs(&self) -> &MaterialInputs {
        &self.inputs
    }

    /// Bumped on every invalidation; consumers compare it to detect rebuilt materials.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cached_count(&self) -> usize {
        self.entries.len()
    }
}
