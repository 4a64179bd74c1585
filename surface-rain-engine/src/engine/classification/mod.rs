//! Orientation and semantic classification of scanned mesh regions.

pub mod distribution;
pub mod surface_classifier;
pub mod surface_type;

pub use distribution::SurfaceDistribution;
pub use surface_classifier::{classify, classify_normal, majority_label};
pub use surface_type::SurfaceType;
