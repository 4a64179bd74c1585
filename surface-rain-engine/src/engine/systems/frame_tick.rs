use bevy::prelude::*;

use crate::engine::atlas::{GlyphMasks, build_mip_chain, create_texture_with_mips};
use crate::engine::materials::MaterialCache;
use crate::engine::params::EffectParameters;
use crate::engine::rain::RainAnimator;
use crate::engine::scene::SceneGraphSync;

/// Atlas products the animator and materials draw on. Empty when the atlas failed to build.
#[derive(Resource, Debug, Default)]
pub struct GlyphResources {
    pub masks: Option<GlyphMasks>,
    pub atlas_image: Option<Handle<Image>>,
    pub atlas_bytes: u64,
}

/// GPU image holding the latest rain frame. Created with the first frame, rewritten in place after.
/// Materials switch from the atlas texture to it on that first frame.
#[derive(Resource, Debug, Default)]
pub struct RainTexture {
    pub handle: Option<Handle<Image>>,
    pub frame_bytes: u64,
}

pub fn advance_rain_frame(
    time: Res<Time>,
    parameters: Res<EffectParameters>,
    glyphs: Res<GlyphResources>,
    mut animator: ResMut<RainAnimator>,
    mut scene: ResMut<SceneGraphSync>,
    mut cache: ResMut<MaterialCache>,
    mut rain_texture: ResMut<RainTexture>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(frame) = scene.advance(
        time.delta_secs(),
        &mut animator,
        &parameters,
        glyphs.masks.as_ref(),
    ) else {
        return;
    };

    let levels = build_mip_chain(frame);
    let image = match create_texture_with_mips(&levels) {
        Ok(image) => image,
        Err(error) => {
            warn!("Rain frame dropped: {error}");
            return;
        }
    };
    rain_texture.frame_bytes = levels.iter().map(|l| l.as_raw().len() as u64).sum();

    match rain_texture.handle.clone() {
        Some(handle) => images.insert(&handle, image),
        None => {
            let handle = images.add(image);
            cache.set_texture(Some(handle.clone()));
            rain_texture.handle = Some(handle);
            info!("✓ Rain texture created");
        }
    }
    scene.commit_frame(&mut cache);
}
