use std::collections::HashMap;

use bevy::prelude::*;
use uuid::Uuid;

use super::scene_sync::{SceneChange, SceneGraphSync};
use crate::engine::anchors::MeshUpdateEvent;
use crate::engine::classification::SurfaceType;
use crate::engine::materials::{BoundMaterials, MaterialCache};

/// Links a spawned mesh entity back to its anchor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceTag {
    pub anchor_id: Uuid,
    pub surface: SurfaceType,
}

/// Anchor identity to spawned entity.
#[derive(Resource, Debug, Default)]
pub struct AnchorEntities(pub HashMap<Uuid, Entity>);

pub fn apply_mesh_updates(
    mut update_events: EventReader<MeshUpdateEvent>,
    mut scene: ResMut<SceneGraphSync>,
    mut cache: ResMut<MaterialCache>,
) {
    for MeshUpdateEvent(update) in update_events.read() {
        scene.apply_update(update, &mut cache);
    }
}

/// Mirrors pending scene changes into the ECS: spawns, replaces and despawns mesh entities.
pub fn sync_render_entities(
    mut commands: Commands,
    mut scene: ResMut<SceneGraphSync>,
    mut anchor_entities: ResMut<AnchorEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    bound: Res<BoundMaterials>,
) {
    for change in scene.take_changes() {
        match change {
            SceneChange::Upsert(anchor_id) => {
                let Some(render) = scene.get(&anchor_id) else {
                    continue;
                };
                let components = (
                    Mesh3d(meshes.add(Mesh::from(&render.geometry))),
                    Transform::from_matrix(render.transform),
                    SurfaceTag {
                        anchor_id,
                        surface: render.surface_type,
                    },
                );

                match anchor_entities.0.get(&anchor_id) {
                    Some(&entity) => {
                        commands.entity(entity).insert(components);
                    }
                    None => {
                        let mut spawned = commands.spawn(components);
                        if let Some(handle) = bound.handle(render.surface_type) {
                            spawned.insert(MeshMaterial3d(handle));
                        }
                        anchor_entities.0.insert(anchor_id, spawned.id());
                    }
                }
            }
            SceneChange::Remove(anchor_id) => {
                if let Some(entity) = anchor_entities.0.remove(&anchor_id) {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}
