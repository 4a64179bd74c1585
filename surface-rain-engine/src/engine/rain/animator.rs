use bevy::prelude::*;
use constants::effect::{DEFAULT_TRAIL_LENGTH, TRAIL_LENGTH_RANGE};
use constants::render_settings::{
    BRIGHTNESS_FALLOFF_EXPONENT, FLICKER_DEPTH, LEADING_EDGE_MIX, LEADING_EDGE_ROWS,
    TRAIL_MIN_FRACTION,
};
use constants::texture::{
    ATLAS_COLUMNS, ATLAS_ROWS, RAIN_GRID_COLUMNS, RAIN_GRID_ROWS, RAIN_TEXTURE_SIZE,
};
use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::column::ColumnState;
use crate::engine::atlas::GlyphMasks;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainConfig {
    pub columns: usize,
    pub rows: usize,
    /// Edge length of every rendered frame in pixels.
    pub resolution: u32,
    /// Number of addressable atlas cells.
    pub glyph_count: usize,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            columns: RAIN_GRID_COLUMNS,
            rows: RAIN_GRID_ROWS,
            resolution: RAIN_TEXTURE_SIZE,
            glyph_count: (ATLAS_COLUMNS * ATLAS_ROWS) as usize,
        }
    }
}

impl RainConfig {
    /// Pixel size of one grid cell.
    pub fn cell_size(&self) -> (u32, u32) {
        (
            self.resolution / self.columns.max(1) as u32,
            self.resolution / self.rows.max(1) as u32,
        )
    }
}

/// Colours and timing a frame is rendered with. Colours are sRGB in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainPalette {
    pub base: [f32; 3],
    pub highlight: [f32; 3],
    pub time: f32,
    pub seed: u64,
}

/// Fixed grid of falling glyph columns.
#[derive(Resource, Debug, Clone)]
pub struct RainAnimator {
    config: RainConfig,
    columns: Vec<ColumnState>,
    trail_max: f32,
    rng: StdRng,
}

impl RainAnimator {
    pub fn new(config: RainConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Deterministic animator for reproducible runs.
    pub fn with_seed(config: RainConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let trail_max = DEFAULT_TRAIL_LENGTH;
        let trail = trail_range(trail_max);
        let columns = (0..config.columns)
            .map(|_| ColumnState::spawn(&mut rng, config.rows, config.glyph_count, trail))
            .collect();
        Self {
            config,
            columns,
            trail_max,
            rng,
        }
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ColumnState] {
        &self.columns
    }

    pub fn trail_max(&self) -> f32 {
        self.trail_max
    }

    /// New trail lengths are drawn from the updated range on each column's next recycle.
    pub fn set_trail_length(&mut self, trail_length: f32) {
        self.trail_max = TRAIL_LENGTH_RANGE.clamp(trail_length);
    }

    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let trail = trail_range(self.trail_max);
        let Self {
            config,
            columns,
            rng,
            ..
        } = self;

        for column in columns.iter_mut() {
            column.head += column.speed * dt;
            if column.has_fallen_out(config.rows) {
                column.recycle(rng, trail);
            }

            column.mutation_countdown -= dt;
            if column.mutation_countdown <= 0.0 {
                column.mutate(rng, config.glyph_count);
            }
        }
    }

    /// Rasterises the grid. Cells outside every active trail stay fully transparent.
    pub fn render_frame(&self, masks: &GlyphMasks, palette: &RainPalette) -> RgbaImage {
        let resolution = self.config.resolution;
        let clear = Rgba([
            to_byte(palette.base[0]),
            to_byte(palette.base[1]),
            to_byte(palette.base[2]),
            0,
        ]);
        let mut frame = RgbaImage::from_pixel(resolution, resolution, clear);
        if masks.is_empty() {
            return frame;
        }

        let (cell_width, cell_height) = self.config.cell_size();
        if cell_width == 0 || cell_height == 0 {
            return frame;
        }
        let mask_size = masks.cell_size();

        for (column_index, column) in self.columns.iter().enumerate() {
            if !column.active {
                continue;
            }
            for (row, &glyph) in column.glyphs.iter().enumerate() {
                let distance = column.distance_from_head(row);
                let brightness = trail_brightness(distance, column.trail_length);
                if brightness <= 0.0 {
                    continue;
                }

                let mix = if distance < LEADING_EDGE_ROWS {
                    LEADING_EDGE_MIX
                } else {
                    0.0
                };
                let color = lerp_rgb(palette.base, palette.highlight, mix);
                let origin_x = column_index as u32 * cell_width;
                let origin_y = row as u32 * cell_height;

                for py in 0..cell_height {
                    let my = py * mask_size / cell_height;
                    for px in 0..cell_width {
                        let mx = px * mask_size / cell_width;
                        let coverage = masks.coverage(usize::from(glyph), mx, my);
                        if coverage <= 0.0 {
                            continue;
                        }
                        let (x, y) = (origin_x + px, origin_y + py);
                        let flicker = flicker_factor(palette.time, x, y, palette.seed);
                        let alpha = brightness * flicker * coverage;
                        frame.put_pixel(
                            x,
                            y,
                            Rgba([
                                to_byte(color[0]),
                                to_byte(color[1]),
                                to_byte(color[2]),
                                to_byte(alpha),
                            ]),
                        );
                    }
                }
            }
        }
        frame
    }
}

fn trail_range(trail_max: f32) -> (f32, f32) {
    let max = TRAIL_LENGTH_RANGE.clamp(trail_max);
    ((max * TRAIL_MIN_FRACTION).max(TRAIL_LENGTH_RANGE.min), max)
}

/// `(1 - d / trail)^1.5` inside the trail, zero outside it.
pub fn trail_brightness(distance: f32, trail_length: f32) -> f32 {
    if trail_length <= 0.0 || !(0.0..trail_length).contains(&distance) {
        return 0.0;
    }
    (1.0 - distance / trail_length).powf(BRIGHTNESS_FALLOFF_EXPONENT)
}

/// Multiplicative shimmer in `[1 - FLICKER_DEPTH, 1]`, varying with time and pixel position.
pub fn flicker_factor(time: f32, x: u32, y: u32, seed: u64) -> f32 {
    let hash = mix_bits(seed ^ (u64::from(x) << 32) ^ u64::from(y));
    let phase = (hash & 0xFFFF) as f32 / 65535.0 * std::f32::consts::TAU;
    let rate = 4.0 + ((hash >> 16) % 5) as f32;
    let wave = 0.5 * (1.0 + (time * rate + phase).sin());
    1.0 - FLICKER_DEPTH * wave
}

// splitmix64 finaliser
fn mix_bits(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
