//! Falling glyph simulation.
//!
//! A fixed grid of columns advances every tick. On frames that are regenerated the grid is
//! rasterised into a transparent RGBA image using the atlas glyph masks and a two-colour
//! gradient that brightens toward each column's head.

pub mod animator;
pub mod column;

pub use animator::{RainAnimator, RainConfig, RainPalette, flicker_factor, trail_brightness};
pub use column::ColumnState;
