//! Per-frame runtime systems.

/// Simulation tick and rain texture upload.
///
/// Advances the scene and animator each frame and rewrites the rain image when a new frame is produced.
pub mod frame_tick;

/// Scene statistics snapshot for overlays and external readers.
pub mod diagnostics;

pub use diagnostics::{SceneDiagnostics, update_scene_diagnostics};
pub use frame_tick::{GlyphResources, RainTexture, advance_rain_frame};
