//! 5×7 bitmap alphabets. Each row is a 5-bit mask with bit 4 as the leftmost pixel.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub rows: [u8; GLYPH_HEIGHT as usize],
}

impl Glyph {
    const fn new(symbol: char, rows: [u8; GLYPH_HEIGHT as usize]) -> Self {
        Self { symbol, rows }
    }

    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        self.rows[y as usize] & (0x10 >> x) != 0
    }

    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|row| (row & 0x1F).count_ones()).sum()
    }
}

/// Half-width phonetic glyphs.
pub const PHONETIC_GLYPHS: &[Glyph] = &[
    Glyph::new('ア', [0x1F, 0x01, 0x05, 0x06, 0x04, 0x04, 0x08]),
    Glyph::new('イ', [0x01, 0x02, 0x04, 0x0C, 0x14, 0x04, 0x04]),
    Glyph::new('ウ', [0x04, 0x1F, 0x11, 0x01, 0x02, 0x04, 0x08]),
    Glyph::new('エ', [0x00, 0x1F, 0x04, 0x04, 0x04, 0x04, 0x1F]),
    Glyph::new('オ', [0x02, 0x1F, 0x02, 0x06, 0x0A, 0x12, 0x02]),
    Glyph::new('カ', [0x08, 0x1F, 0x09, 0x09, 0x09, 0x11, 0x06]),
    Glyph::new('キ', [0x04, 0x1F, 0x04, 0x1F, 0x04, 0x04, 0x04]),
    Glyph::new('ク', [0x08, 0x0F, 0x11, 0x01, 0x02, 0x04, 0x18]),
    Glyph::new('ケ', [0x08, 0x0F, 0x12, 0x02, 0x02, 0x04, 0x08]),
    Glyph::new('コ', [0x00, 0x1F, 0x01, 0x01, 0x01, 0x1F, 0x00]),
    Glyph::new('サ', [0x0A, 0x1F, 0x0A, 0x0A, 0x02, 0x04, 0x08]),
    Glyph::new('シ', [0x10, 0x08, 0x11, 0x09, 0x01, 0x02, 0x1C]),
    Glyph::new('ス', [0x00, 0x1F, 0x01, 0x02, 0x04, 0x0A, 0x11]),
    Glyph::new('セ', [0x08, 0x08, 0x1F, 0x09, 0x0A, 0x08, 0x07]),
    Glyph::new('ソ', [0x11, 0x11, 0x09, 0x01, 0x02, 0x04, 0x08]),
    Glyph::new('タ', [0x08, 0x0F, 0x11, 0x1D, 0x03, 0x04, 0x18]),
    Glyph::new('チ', [0x02, 0x1C, 0x04, 0x1F, 0x04, 0x04, 0x08]),
    Glyph::new('ツ', [0x15, 0x15, 0x15, 0x01, 0x02, 0x04, 0x08]),
    Glyph::new('テ', [0x0E, 0x00, 0x1F, 0x04, 0x04, 0x04, 0x08]),
    Glyph::new('ト', [0x08, 0x08, 0x08, 0x0C, 0x0A, 0x08, 0x08]),
    Glyph::new('ナ', [0x04, 0x04, 0x1F, 0x04, 0x04, 0x08, 0x10]),
    Glyph::new('ニ', [0x00, 0x0E, 0x00, 0x00, 0x00, 0x1F, 0x00]),
    Glyph::new('ヌ', [0x00, 0x1F, 0x01, 0x0A, 0x04, 0x0A, 0x10]),
    Glyph::new('ネ', [0x04, 0x1F, 0x02, 0x04, 0x0E, 0x15, 0x04]),
    Glyph::new('ノ', [0x01, 0x01, 0x02, 0x02, 0x04, 0x08, 0x10]),
    Glyph::new('ハ', [0x00, 0x04, 0x12, 0x12, 0x11, 0x11, 0x11]),
    Glyph::new('ヒ', [0x10, 0x10, 0x1F, 0x10, 0x10, 0x10, 0x0F]),
    Glyph::new('フ', [0x00, 0x1F, 0x01, 0x01, 0x02, 0x04, 0x18]),
    Glyph::new('ヘ', [0x00, 0x08, 0x14, 0x02, 0x01, 0x00, 0x00]),
    Glyph::new('ホ', [0x04, 0x1F, 0x04, 0x15, 0x15, 0x04, 0x04]),
    Glyph::new('マ', [0x00, 0x1F, 0x01, 0x0A, 0x04, 0x02, 0x00]),
    Glyph::new('ミ', [0x0C, 0x03, 0x00, 0x0C, 0x03, 0x18, 0x07]),
    Glyph::new('ム', [0x04, 0x04, 0x08, 0x08, 0x12, 0x1F, 0x01]),
    Glyph::new('メ', [0x01, 0x01, 0x0A, 0x04, 0x0A, 0x10, 0x00]),
    Glyph::new('モ', [0x0E, 0x04, 0x1F, 0x04, 0x04, 0x04, 0x03]),
    Glyph::new('ヤ', [0x08, 0x08, 0x1F, 0x09, 0x0A, 0x08, 0x08]),
    Glyph::new('ユ', [0x00, 0x0E, 0x02, 0x02, 0x02, 0x1F, 0x00]),
    Glyph::new('ヨ', [0x1F, 0x01, 0x01, 0x0F, 0x01, 0x01, 0x1F]),
    Glyph::new('ラ', [0x0E, 0x00, 0x1F, 0x01, 0x01, 0x02, 0x0C]),
    Glyph::new('リ', [0x11, 0x11, 0x11, 0x11, 0x01, 0x02, 0x04]),
    Glyph::new('ル', [0x04, 0x14, 0x14, 0x14, 0x15, 0x15, 0x16]),
    Glyph::new('レ', [0x10, 0x10, 0x10, 0x11, 0x12, 0x14, 0x18]),
    Glyph::new('ロ', [0x00, 0x1F, 0x11, 0x11, 0x11, 0x1F, 0x00]),
    Glyph::new('ワ', [0x00, 0x1F, 0x11, 0x01, 0x01, 0x02, 0x0C]),
    Glyph::new('ン', [0x00, 0x18, 0x00, 0x01, 0x01, 0x02, 0x1C]),
];

/// Digits, capital letters and operator symbols.
pub const SYMBOL_GLYPHS: &[Glyph] = &[
    Glyph::new('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    Glyph::new('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    Glyph::new('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    Glyph::new('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    Glyph::new('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    Glyph::new('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    Glyph::new('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    Glyph::new('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    Glyph::new('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    Glyph::new('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    Glyph::new('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    Glyph::new('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    Glyph::new('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    Glyph::new('D', [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C]),
    Glyph::new('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    Glyph::new('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    Glyph::new('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    Glyph::new('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    Glyph::new('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    Glyph::new('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    Glyph::new('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    Glyph::new('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    Glyph::new('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    Glyph::new('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    Glyph::new('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    Glyph::new('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    Glyph::new('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    Glyph::new('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    Glyph::new('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    Glyph::new('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    Glyph::new('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    Glyph::new('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    Glyph::new('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    Glyph::new('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    Glyph::new('Y', [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04]),
    Glyph::new('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    Glyph::new(':', [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00]),
    Glyph::new('=', [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00]),
    Glyph::new('*', [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00]),
    Glyph::new('+', [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00]),
    Glyph::new('<', [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02]),
    Glyph::new('>', [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08]),
    Glyph::new('|', [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    Glyph::new('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_has_ink() {
        for glyph in PHONETIC_GLYPHS.iter().chain(SYMBOL_GLYPHS) {
            assert!(glyph.lit_count() > 0, "{} is blank", glyph.symbol);
            assert!(glyph.rows.iter().all(|row| row & !0x1F == 0));
        }
    }

    #[test]
    fn symbol_alphabet_covers_digits_and_capitals() {
        for symbol in ('0'..='9').chain('A'..='Z') {
            assert!(
                SYMBOL_GLYPHS.iter().any(|g| g.symbol == symbol),
                "missing {symbol}"
            );
        }
    }

    #[test]
    fn leftmost_bit_is_column_zero() {
        let bar = SYMBOL_GLYPHS.iter().find(|g| g.symbol == '|').unwrap();
        assert!(bar.is_lit(2, 0));
        assert!(!bar.is_lit(0, 0));
        assert!(!bar.is_lit(5, 0));
    }
}
