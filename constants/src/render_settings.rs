/// Regenerate the rain texture on every Nth tick. The simulation itself ticks every frame.
pub const FRAME_SKIP: u32 = 4;

/// Largest simulation step applied in one tick (30 Hz floor of the acceptable cadence).
pub const MAX_TICK_DT: f32 = 1.0 / 30.0;

/// Seconds a parameter change must settle before materials are rebuilt.
pub const PARAMETER_DEBOUNCE_SECS: f32 = 0.25;

/// Seconds between random seed refreshes.
pub const SEED_REFRESH_SECS: f32 = 1.0;

/// Column fall speed in rows per second (before the fall speed multiplier).
pub const COLUMN_SPEED_MIN: f32 = 6.0;
pub const COLUMN_SPEED_MAX: f32 = 18.0;

/// Trail lengths are drawn from `[trail_length * TRAIL_MIN_FRACTION, trail_length]`.
pub const TRAIL_MIN_FRACTION: f32 = 0.5;

/// Glyph mutation countdown range in seconds.
pub const MUTATION_INTERVAL_MIN: f32 = 0.08;
pub const MUTATION_INTERVAL_MAX: f32 = 0.4;

/// Probability that a recycled column is active.
pub const ACTIVE_PROBABILITY: f64 = 0.7;

/// Rows below the head that receive the highlight colour.
pub const LEADING_EDGE_ROWS: f32 = 2.0;

/// Highlight mix weight on the leading edge.
pub const LEADING_EDGE_MIX: f32 = 0.8;

/// Exponent of the trail brightness falloff.
pub const BRIGHTNESS_FALLOFF_EXPONENT: f32 = 1.5;

/// Peak-to-trough depth of the multiplicative glyph flicker.
pub const FLICKER_DEPTH: f32 = 0.15;

/// Base alpha of surface materials.
pub const SURFACE_ALPHA: f32 = 0.9;

/// Alpha of materials on surfaces whose orientation could not be determined.
pub const UNKNOWN_SURFACE_ALPHA: f32 = 0.5;
