/// Resolution (square) of every generated rain frame.
pub const RAIN_TEXTURE_SIZE: u32 = 512;

/// Columns in the rain simulation grid.
pub const RAIN_GRID_COLUMNS: usize = 32;

/// Rows in the rain simulation grid.
pub const RAIN_GRID_ROWS: usize = 32;

/// Glyph atlas layout: cells per axis and pixel size of a cell.
pub const ATLAS_COLUMNS: u32 = 16;
pub const ATLAS_ROWS: u32 = 16;
pub const ATLAS_CELL_SIZE: u32 = 32;

/// Fraction of a cell's height occupied by a rendered glyph.
pub const GLYPH_FILL: f32 = 0.875;

/// Largest texture edge the builders will allocate.
pub const MAX_TEXTURE_DIMENSION: u32 = 8192;

/// Bytes per RGBA8 texel.
pub const RGBA8_BYTES: u64 = 4;
