//! Shared configuration for the surface rain pipeline.

pub mod class;
pub mod effect;
pub mod orientation;
pub mod path;
pub mod render_settings;
pub mod texture;
