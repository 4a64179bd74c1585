use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::EFFECT_PARAMETERS_EXTENSION;

use crate::engine::anchors::{MeshUpdateEvent, MeshUpdateQueue, queue::drain_mesh_update_queue};
use crate::engine::atlas::{GlyphAtlas, GlyphAtlasConfig};
use crate::engine::materials::{BoundMaterials, MaterialCache, bind_surface_materials};
use crate::engine::params::{
    EffectParameters, ParameterDebounce, ParameterLoader, advance_effect_clock,
    apply_loaded_parameters, debounce_parameter_changes, start_parameter_loading,
};
use crate::engine::rain::{RainAnimator, RainConfig};
use crate::engine::scene::{
    AnchorEntities, SceneGraphSync, apply_mesh_updates, sync_render_entities,
};
use crate::engine::systems::{
    GlyphResources, RainTexture, SceneDiagnostics, advance_rain_frame, update_scene_diagnostics,
};

/// Wires the scan-to-surface pipeline into an app.
///
/// Scan sources push `MeshUpdate`s through the `MeshUpdateQueue` resource (or its senders);
/// everything after that runs on the `Update` schedule in one fixed order.
pub struct SurfaceRainPlugin;

impl Plugin for SurfaceRainPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<EffectParameters>::new(&[
            EFFECT_PARAMETERS_EXTENSION,
        ]));

        app.init_resource::<MeshUpdateQueue>()
            .init_resource::<EffectParameters>()
            .init_resource::<ParameterLoader>()
            .init_resource::<ParameterDebounce>()
            .init_resource::<MaterialCache>()
            .init_resource::<BoundMaterials>()
            .init_resource::<SceneGraphSync>()
            .init_resource::<AnchorEntities>()
            .init_resource::<GlyphResources>()
            .init_resource::<RainTexture>()
            .init_resource::<SceneDiagnostics>()
            .insert_resource(RainAnimator::new(RainConfig::default()))
            .add_event::<MeshUpdateEvent>();

        app.add_systems(Startup, (build_glyph_atlas, start_parameter_loading))
            .add_systems(
                Update,
                (
                    drain_mesh_update_queue,
                    apply_mesh_updates,
                    apply_loaded_parameters,
                    debounce_parameter_changes,
                    advance_effect_clock,
                    advance_rain_frame,
                    sync_render_entities,
                    bind_surface_materials,
                    update_scene_diagnostics,
                )
                    .chain(),
            );
    }
}

/// Builds the glyph atlas once. On failure the pipeline keeps running with untextured
/// tinted materials and no rain frames.
pub fn build_glyph_atlas(
    animator: Res<RainAnimator>,
    mut glyphs: ResMut<GlyphResources>,
    mut images: ResMut<Assets<Image>>,
    mut cache: ResMut<MaterialCache>,
) {
    let built = GlyphAtlas::build(GlyphAtlasConfig::default()).and_then(|atlas| {
        let image = atlas.to_image()?;
        Ok((atlas, image))
    });

    match built {
        Ok((atlas, image)) => {
            let (cell_width, cell_height) = animator.config().cell_size();
            let handle = images.add(image);
            glyphs.masks = Some(atlas.glyph_masks(cell_width.max(cell_height)));
            glyphs.atlas_bytes = atlas.byte_size();
            glyphs.atlas_image = Some(handle.clone());
            cache.set_texture(Some(handle));
            info!(
                "✓ Glyph atlas built: {} cells, {} mip levels",
                atlas.cell_count(),
                atlas.levels().len()
            );
        }
        Err(error) => {
            error!("Glyph atlas unavailable, using untextured materials: {error}");
            *glyphs = GlyphResources::default();
            cache.set_texture(None);
        }
    }
}
