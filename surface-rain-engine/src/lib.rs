//! Turns an incrementally updated stream of scanned surface meshes into rendered surfaces
//! carrying an animated falling-glyph texture.
//!
//! Scan sources push [`MeshUpdate`]s into the [`MeshUpdateQueue`]. The
//! [`SurfaceRainPlugin`] classifies each mesh as wall, floor, ceiling or unknown, builds
//! render geometry for it, animates the glyph rain and keeps one shared material per
//! surface type bound to every entity.

pub mod engine;

pub use engine::anchors::{MeshAnchor, MeshBuffers, MeshUpdate, MeshUpdateQueue};
pub use engine::classification::SurfaceType;
pub use engine::core::plugin::SurfaceRainPlugin;
pub use engine::params::EffectParameters;
