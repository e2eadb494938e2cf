//! The glyph lookup contract.
//!
//! Font data lives outside the core. What the screen model needs from a
//! font is a single fact per code point: how many columns the glyph
//! occupies. The renderer additionally wants the bitmap rows. Both come
//! through [`GlyphSource`]; embedders install their own implementation
//! and tests use small hand-built tables.

use unicode_width::UnicodeWidthChar;

/// A glyph bitmap reference.
///
/// `width` counts grid columns: 1 for an 8-pixel glyph, 2 for a 16-pixel
/// one. `rows` holds 16 rows of `width` bytes each, most significant bit
/// leftmost.
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    pub width: u8,
    pub rows: &'a [u8],
}

/// Read-only lookup from code point to glyph.
pub trait GlyphSource {
    fn find_glyph(&self, code_point: char) -> Option<Glyph<'_>>;

    /// Display width in columns: the glyph's width, or 1 when the font
    /// has no glyph for the code point.
    fn advance_width(&self, code_point: char) -> usize {
        self.find_glyph(code_point)
            .map_or(1, |glyph| glyph.width as usize)
    }
}

/// Fallback source used when no font is installed: no bitmaps, widths
/// answered from the Unicode east-asian-width tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct WidthHeuristic;

impl GlyphSource for WidthHeuristic {
    fn find_glyph(&self, _code_point: char) -> Option<Glyph<'_>> {
        None
    }

    fn advance_width(&self, code_point: char) -> usize {
        code_point.width().unwrap_or(1).clamp(1, 2)
    }
}
