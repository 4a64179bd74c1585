//! Application setup.

/// Default plugin configuration and app construction for the native window.
pub mod app_setup;

/// `SurfaceRainPlugin`: resources, events and the ordered per-frame system chain.
pub mod plugin;
