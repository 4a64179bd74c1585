use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::Serialize;

use super::frame_tick::{GlyphResources, RainTexture};
use crate::engine::classification::{SurfaceDistribution, SurfaceType};
use crate::engine::materials::MaterialCache;
use crate::engine::scene::SceneGraphSync;

/// Read-only snapshot of the live scene, refreshed every frame.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneDiagnostics {
    pub mesh_count: usize,
    /// Entities per surface type, indexed by `SurfaceType::index`.
    pub surface_counts: [usize; 4],
    pub triangle_count: usize,
    /// Triangle-weighted share of each surface bucket across all meshes.
    pub triangle_share: SurfaceDistribution,
    pub fps: Option<f64>,
    /// Geometry plus atlas and rain texture mip chains.
    pub memory_bytes: u64,
    pub frames_rendered: u64,
    pub material_generation: u64,
}

impl SceneDiagnostics {
    pub fn capture(scene: &SceneGraphSync, texture_bytes: u64, fps: Option<f64>) -> Self {
        let mut triangles = [0f32; 4];
        let mut triangle_count = 0;
        for entity in scene.iter() {
            let share = &entity.distribution;
            for surface in SurfaceType::ALL {
                triangles[surface.index()] +=
                    share.fraction(surface) * share.triangle_count as f32;
            }
            triangle_count += share.triangle_count;
        }

        let total = triangle_count.max(1) as f32;
        Self {
            mesh_count: scene.len(),
            surface_counts: scene.surface_counts(),
            triangle_count,
            triangle_share: SurfaceDistribution {
                triangle_count,
                wall: triangles[SurfaceType::Wall.index()] / total,
                floor: triangles[SurfaceType::Floor.index()] / total,
                ceiling: triangles[SurfaceType::Ceiling.index()] / total,
                unknown: triangles[SurfaceType::Unknown.index()] / total,
            },
            fps,
            memory_bytes: scene.geometry_bytes() as u64 + texture_bytes,
            frames_rendered: scene.frames_rendered(),
            material_generation: 0,
        }
    }

    pub fn count(&self, surface: SurfaceType) -> usize {
        self.surface_counts[surface.index()]
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "mesh_count": self.mesh_count,
            "surfaces": {
                "wall": self.count(SurfaceType::Wall),
                "floor": self.count(SurfaceType::Floor),
                "ceiling": self.count(SurfaceType::Ceiling),
                "unknown": self.count(SurfaceType::Unknown),
            },
            "triangle_count": self.triangle_count,
            "triangle_share": self.triangle_share,
            "fps": self.fps,
            "memory_bytes": self.memory_bytes,
            "frames_rendered": self.frames_rendered,
            "material_generation": self.material_generation,
        })
    }
}

pub fn update_scene_diagnostics(
    scene: Res<SceneGraphSync>,
    cache: Res<MaterialCache>,
    glyphs: Res<GlyphResources>,
    rain_texture: Res<RainTexture>,
    store: Option<Res<DiagnosticsStore>>,
    mut diagnostics: ResMut<SceneDiagnostics>,
) {
    let fps = store
        .as_ref()
        .and_then(|store| store.get(&FrameTimeDiagnosticsPlugin::FPS))
        .and_then(|fps| fps.smoothed());

    let mut snapshot =
        SceneDiagnostics::capture(&scene, glyphs.atlas_bytes + rain_texture.frame_bytes, fps);
    snapshot.material_generation = cache.generation();
    *diagnostics = snapshot;
}
