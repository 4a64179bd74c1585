//! Inbound scan data: typed mesh updates and the queue that serialises them.
//!
//! The scan source hands over raw vertex, normal and face buffers per anchor. These
//! are wrapped in bounds-checked views, normalised into a single `MeshUpdate` type and
//! funnelled through one ordered queue before the scene table sees them.

/// Bounds-checked views over raw vertex and index byte buffers.
pub mod buffers;

/// Anchor snapshots, classification labels and the add/update/remove event type.
pub mod mesh_update;

/// Thread-safe ordered queue from the scan source into the update timeline.
pub mod queue;

pub use buffers::{GeometryElement, GeometrySource, IndexWidth};
pub use mesh_update::{ClassificationLabel, MeshAnchor, MeshBuffers, MeshUpdate, MeshUpdateKind};
pub use queue::{MeshUpdateEvent, MeshUpdateQueue, MeshUpdateSender};
