use rand::Rng;

use constants::render_settings::{
    ACTIVE_PROBABILITY, COLUMN_SPEED_MAX, COLUMN_SPEED_MIN, MUTATION_INTERVAL_MAX,
    MUTATION_INTERVAL_MIN,
};

/// One falling column of the rain grid. Created once and recycled in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    /// Row position of the leading glyph. Negative while the column is entering from above.
    pub head: f32,
    /// Rows per second.
    pub speed: f32,
    pub trail_length: f32,
    /// Atlas cell shown at each row.
    pub glyphs: Vec<u16>,
    pub mutation_countdown: f32,
    pub active: bool,
    pub recycle_count: u32,
}

impl ColumnState {
    /// Fresh column with its head scattered over the grid so the first frame is populated.
    pub fn spawn(rng: &mut impl Rng, rows: usize, glyph_count: usize, trail: (f32, f32)) -> Self {
        let trail_length = rng.random_range(trail.0..=trail.1);
        let glyph_limit = glyph_count.clamp(1, usize::from(u16::MAX) + 1);
        Self {
            head: rng.random_range(-trail_length..=rows as f32),
            speed: rng.random_range(COLUMN_SPEED_MIN..=COLUMN_SPEED_MAX),
            trail_length,
            glyphs: (0..rows)
                .map(|_| rng.random_range(0..glyph_limit) as u16)
                .collect(),
            mutation_countdown: mutation_interval(rng),
            active: rng.random_bool(ACTIVE_PROBABILITY),
            recycle_count: 0,
        }
    }

    /// True once the tail has cleared the bottom row.
    pub fn has_fallen_out(&self, rows: usize) -> bool {
        self.head > rows as f32 + self.trail_length
    }

    /// Sends the column back above the grid with a new trail, speed and active roll.
    pub fn recycle(&mut self, rng: &mut impl Rng, trail: (f32, f32)) {
        self.trail_length = rng.random_range(trail.0..=trail.1);
        self.speed = rng.random_range(COLUMN_SPEED_MIN..=COLUMN_SPEED_MAX);
        self.head = -self.trail_length;
        self.active = rng.random_bool(ACTIVE_PROBABILITY);
        self.recycle_count += 1;
    }

    /// Swaps one random row's glyph and re-arms the countdown.
    pub fn mutate(&mut self, rng: &mut impl Rng, glyph_count: usize) {
        if !self.glyphs.is_empty() {
            let row = rng.random_range(0..self.glyphs.len());
            let glyph_limit = glyph_count.clamp(1, usize::from(u16::MAX) + 1);
            self.glyphs[row] = rng.random_range(0..glyph_limit) as u16;
        }
        self.mutation_countdown = mutation_interval(rng);
    }

    /// Rows between the head and `row`; negative below the head.
    pub fn distance_from_head(&self, row: usize) -> f32 {
        self.head - row as f32
    }
}

fn mutation_interval(rng: &mut impl Rng) -> f32 {
    rng.random_range(MUTATION_INTERVAL_MIN..=MUTATION_INTERVAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn recycle_places_head_above_grid() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut column = ColumnState::spawn(&mut rng, 32, 256, (6.0, 12.0));
        column.head = 50.0;
        assert!(column.has_fallen_out(32));

        column.recycle(&mut rng, (6.0, 12.0));
        assert_eq!(column.head, -column.trail_length);
        assert!((6.0..=12.0).contains(&column.trail_length));
        assert_eq!(column.recycle_count, 1);
    }

    #[test]
    fn mutation_keeps_glyphs_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut column = ColumnState::spawn(&mut rng, 16, 10, (1.0, 2.0));
        for _ in 0..200 {
            column.mutate(&mut rng, 10);
        }
        assert_eq!(column.glyphs.len(), 16);
        assert!(column.glyphs.iter().all(|&g| g < 10));
        assert!(column.mutation_countdown >= MUTATION_INTERVAL_MIN);
    }
}
