//! Render-ready geometry built from scanned anchors.
//!
//! Every anchor update is rebuilt into flat position, normal, UV and index arrays that
//! convert either into a Bevy `Mesh` or into interleaved vertex bytes.

/// Anchor to `RenderGeometry` conversion and the Bevy `Mesh` bridge.
pub mod geometry_builder;

/// Interleaved `position, normal, uv` vertex record for raw-buffer backends.
pub mod vertex;

pub use geometry_builder::{MeshGeometryBuilder, RenderGeometry};
pub use vertex::MeshVertex;
