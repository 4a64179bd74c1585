pub mod anchors;
pub mod atlas;
pub mod classification;
pub mod core;
pub mod materials;
pub mod mesh;
pub mod params;
pub mod rain;
pub mod scene;
pub mod systems;
