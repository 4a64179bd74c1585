//! Procedural glyph atlas.
//!
//! Two bitmap alphabets are shuffled into a fixed grid of cells and rasterised on a
//! transparent sheet. The sheet carries a full mip chain, and the rain animator samples
//! per-cell alpha masks from whichever level best matches its own cell size.

pub mod atlas_builder;
pub mod error;
pub mod glyphs;

/// Mip chain generation and GPU image packing, shared with the animated rain frames.
pub mod mipmap;

pub use atlas_builder::{GlyphAtlas, GlyphAtlasConfig, GlyphMasks};
pub use error::AtlasError;
pub use mipmap::{build_mip_chain, create_texture_with_mips, estimate_rgba8_mip_chain};
