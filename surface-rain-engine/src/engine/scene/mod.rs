//! Live scene state.
//!
//! `SceneGraphSync` owns the keyed table of render entities and the per-frame tick. The ECS
//! side only mirrors the structural changes it records.

pub mod entity_sync;
pub mod scene_sync;

pub use entity_sync::{AnchorEntities, SurfaceTag, apply_mesh_updates, sync_render_entities};
pub use scene_sync::{RenderEntity, SceneChange, SceneGraphSync};
