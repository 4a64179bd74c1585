use bevy::math::Vec3;

/// World-space up axis used for orientation classification (Y-up, gravity aligned).
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Dot product threshold against `WORLD_UP`.
/// 0.7 ≈ cos(45°): a normal within a 45° cone of vertical is a floor (or ceiling when inverted).
pub const VERTICAL_DOT_THRESHOLD: f32 = 0.7;

/// Averaged normals shorter than this are treated as having no orientation.
pub const DEGENERATE_NORMAL_LENGTH: f32 = 1e-6;
