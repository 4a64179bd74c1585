use bevy::prelude::Image;
use constants::texture::{
    ATLAS_CELL_SIZE, ATLAS_COLUMNS, ATLAS_ROWS, GLYPH_FILL, MAX_TEXTURE_DIMENSION,
};
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::error::AtlasError;
use super::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, Glyph, PHONETIC_GLYPHS, SYMBOL_GLYPHS};
use super::mipmap::{build_mip_chain, create_texture_with_mips};

pub const DEFAULT_ATLAS_SEED: u64 = 0x5EED_61F4;

// Transparent texels stay white so filtered mips do not darken glyph edges.
const INK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphAtlasConfig {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: u32,
    /// Seeds the glyph shuffle so the same config always yields the same sheet.
    pub seed: u64,
}

impl Default for GlyphAtlasConfig {
    fn default() -> Self {
        Self {
            columns: ATLAS_COLUMNS,
            rows: ATLAS_ROWS,
            cell_size: ATLAS_CELL_SIZE,
            seed: DEFAULT_ATLAS_SEED,
        }
    }
}

impl GlyphAtlasConfig {
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn width(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.cell_size)
    }

    pub fn height(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cell_size)
    }

    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.columns == 0 || self.rows == 0 || self.cell_size == 0 {
            return Err(AtlasError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
                cell_size: self.cell_size,
            });
        }
        let max = u64::from(MAX_TEXTURE_DIMENSION);
        if self.width() > max || self.height() > max {
            return Err(AtlasError::TextureTooLarge {
                width: self.width(),
                height: self.height(),
                max: MAX_TEXTURE_DIMENSION,
            });
        }
        Ok(())
    }
}

/// Static sheet of glyph cells with its full mip chain.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    config: GlyphAtlasConfig,
    cells: Vec<Glyph>,
    levels: Vec<RgbaImage>,
}

impl GlyphAtlas {
    /// Builds from both alphabets, shuffled and cycled to fill every cell.
    pub fn build(config: GlyphAtlasConfig) -> Result<Self, AtlasError> {
        let pool = PHONETIC_GLYPHS
            .iter()
            .chain(SYMBOL_GLYPHS)
            .copied()
            .collect();
        Self::build_from(config, pool)
    }

    pub fn build_from(config: GlyphAtlasConfig, mut pool: Vec<Glyph>) -> Result<Self, AtlasError> {
        config.validate()?;
        if pool.is_empty() {
            return Err(AtlasError::EmptyAlphabet);
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        pool.shuffle(&mut rng);
        let cells: Vec<Glyph> = pool
            .iter()
            .cycle()
            .take(config.cell_count())
            .copied()
            .collect();

        // validate() bounds both extents by MAX_TEXTURE_DIMENSION
        let mut base = RgbaImage::from_pixel(config.width() as u32, config.height() as u32, CLEAR);
        for (index, glyph) in cells.iter().enumerate() {
            let column = index as u32 % config.columns;
            let row = index as u32 / config.columns;
            draw_glyph(
                &mut base,
                glyph,
                column * config.cell_size,
                row * config.cell_size,
                config.cell_size,
            );
        }

        Ok(Self {
            config,
            cells,
            levels: build_mip_chain(base),
        })
    }

    pub fn config(&self) -> &GlyphAtlasConfig {
        &self.config
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn glyph(&self, cell: usize) -> Option<&Glyph> {
        self.cells.get(cell)
    }

    pub fn levels(&self) -> &[RgbaImage] {
        &self.levels
    }

    pub fn byte_size(&self) -> u64 {
        self.levels.iter().map(|l| l.as_raw().len() as u64).sum()
    }

    pub fn to_image(&self) -> Result<Image, AtlasError> {
        create_texture_with_mips(&self.levels)
    }

    /// Deepest mip level whose cells are still at least `target_cell` pixels wide.
    pub fn mip_level_for_cell(&self, target_cell: u32) -> usize {
        (0..self.levels.len())
            .rev()
            .find(|&level| (self.config.cell_size >> level) >= target_cell)
            .unwrap_or(0)
    }

    /// Per-cell alpha masks resampled (nearest) to `target_cell` from the closest mip level.
    pub fn glyph_masks(&self, target_cell: u32) -> GlyphMasks {
        let target = target_cell.max(1);
        let Some(image) = self.levels.get(self.mip_level_for_cell(target)) else {
            return GlyphMasks::default();
        };
        let (level_width, level_height) = image.dimensions();
        let columns = self.config.columns as f32;
        let rows = self.config.rows as f32;

        let masks = (0..self.cells.len())
            .map(|index| {
                let column = (index as u32 % self.config.columns) as f32;
                let row = (index as u32 / self.config.columns) as f32;
                let mut mask = vec![0u8; (target * target) as usize];
                for y in 0..target {
                    let v = (row + (y as f32 + 0.5) / target as f32) / rows;
                    let source_y = (v * level_height as f32) as u32;
                    for x in 0..target {
                        let u = (column + (x as f32 + 0.5) / target as f32) / columns;
                        let source_x = (u * level_width as f32) as u32;
                        mask[(y * target + x) as usize] = image
                            .get_pixel_checked(source_x, source_y)
                            .map_or(0, |pixel| pixel[3]);
                    }
                }
                mask
            })
            .collect();

        GlyphMasks {
            cell_size: target,
            masks,
        }
    }
}

fn draw_glyph(image: &mut RgbaImage, glyph: &Glyph, origin_x: u32, origin_y: u32, cell: u32) {
    let scale = ((cell as f32 * GLYPH_FILL) / GLYPH_HEIGHT as f32).floor().max(1.0) as u32;
    let left = origin_x + cell.saturating_sub(GLYPH_WIDTH * scale) / 2;
    let top = origin_y + cell.saturating_sub(GLYPH_HEIGHT * scale) / 2;

    for gy in 0..GLYPH_HEIGHT {
        for gx in 0..GLYPH_WIDTH {
            if !glyph.is_lit(gx, gy) {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    let x = left + gx * scale + sx;
                    let y = top + gy * scale + sy;
                    // clip to the cell when it is smaller than one glyph
                    if x < origin_x + cell && y < origin_y + cell {
                        image.put_pixel(x, y, INK);
                    }
                }
            }
        }
    }
}

/// Square alpha coverage masks, one per atlas cell, at a single resolution.
#[derive(Debug, Clone, Default)]
pub struct GlyphMasks {
    cell_size: u32,
    masks: Vec<Vec<u8>>,
}

impl GlyphMasks {
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Coverage in `[0, 1]`. Glyph indices wrap around the mask count.
    pub fn coverage(&self, glyph: usize, x: u32, y: u32) -> f32 {
        if self.masks.is_empty() || x >= self.cell_size || y >= self.cell_size {
            return 0.0;
        }
        let mask = &self.masks[glyph % self.masks.len()];
        mask.get((y * self.cell_size + x) as usize)
            .map_or(0.0, |&alpha| f32::from(alpha) / 255.0)
    }
}
