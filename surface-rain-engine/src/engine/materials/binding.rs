use std::collections::HashMap;

use bevy::prelude::*;

use super::material_cache::MaterialCache;
use crate::engine::classification::SurfaceType;
use crate::engine::scene::SurfaceTag;

/// `StandardMaterial` assets built from one cache generation.
#[derive(Resource, Debug, Default)]
pub struct BoundMaterials {
    generation: Option<u64>,
    handles: HashMap<SurfaceType, Handle<StandardMaterial>>,
}

impl BoundMaterials {
    pub fn handle(&self, surface: SurfaceType) -> Option<Handle<StandardMaterial>> {
        self.handles.get(&surface).cloned()
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }
}

/// Rebuilds the per-surface material assets when the cache generation moves, then points
/// every tagged entity at the handle for its surface.
pub fn bind_surface_materials(
    mut commands: Commands,
    mut cache: ResMut<MaterialCache>,
    mut bound: ResMut<BoundMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    surfaces: Query<(Entity, &SurfaceTag, Option<&MeshMaterial3d<StandardMaterial>>)>,
) {
    if bound.generation != Some(cache.generation()) {
        let handles = cache
            .all_materials()
            .into_iter()
            .map(|(surface, material)| (surface, materials.add(material.to_standard_material())))
            .collect();
        bound.handles = handles;
        bound.generation = Some(cache.generation());
    }

    for (entity, tag, current) in &surfaces {
        let Some(handle) = bound.handles.get(&tag.surface) else {
            continue;
        };
        if current.map(|m| &m.0) != Some(handle) {
            commands
                .entity(entity)
                .insert(MeshMaterial3d(handle.clone()));
        }
    }
}
