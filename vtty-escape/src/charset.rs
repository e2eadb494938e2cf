/// Logical character set designations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CharsetIndex {
    #[default]
    G0,
    G1,
    G2,
    G3,
}

/// The two active invocation slots a logical set can be shifted into.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSlot {
    /// Graphic left: characters 0x20..=0x7F.
    #[default]
    Gl,
    /// Graphic right: characters 0xA0..=0xFF.
    Gr,
}

/// A character set maps a contiguous range of the 7-bit graphic area to
/// Unicode scalars. ASCII is the identity and stays untranslated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Ascii,
    /// National replacement set: `#` becomes the currency sign.
    UnitedKingdom,
    /// DEC special graphics, the VT100 line-drawing set.
    DecSpecialGraphics,
    /// The VT52 graphics set. Unicode has no equivalent for the VT52's
    /// fraction glyphs, so those map to the replacement character.
    Vt52Graphics,
}

impl Charset {
    /// Translate a scalar through the set. ASCII is the common case and
    /// does as little as possible.
    #[inline]
    pub fn map(self, c: char) -> char {
        match self {
            Self::Ascii => c,
            Self::UnitedKingdom => match c {
                '#' => '\u{20ac}',
                _ => c,
            },
            Self::DecSpecialGraphics => match c {
                '_' => '\u{0}',
                '`' => '\u{25c6}',
                'a' => '\u{2592}',
                'b' => '\u{2409}',
                'c' => '\u{240c}',
                'd' => '\u{240d}',
                'e' => '\u{240a}',
                'f' => '\u{b0}',
                'g' => '\u{b1}',
                'h' => '\u{2424}',
                'i' => '\u{240b}',
                'j' => '\u{2518}',
                'k' => '\u{2510}',
                'l' => '\u{250c}',
                'm' => '\u{2514}',
                'n' => '\u{253c}',
                'o' => '\u{23ba}',
                'p' => '\u{23bb}',
                'q' => '\u{2500}',
                'r' => '\u{23bc}',
                's' => '\u{23bd}',
                't' => '\u{251c}',
                'u' => '\u{2524}',
                'v' => '\u{2534}',
                'w' => '\u{252c}',
                'x' => '\u{2502}',
                'y' => '\u{2264}',
                'z' => '\u{2265}',
                '{' => '\u{3c0}',
                '|' => '\u{2260}',
                '}' => '\u{a3}',
                '~' => '\u{b7}',
                _ => c,
            },
            Self::Vt52Graphics => match c {
                '^' | '_' => '\u{0}',
                '`' => '\u{2665}',
                'a' => '\u{2588}',
                'b' => '\u{215f}',
                'c' | 'd' | 'e' => '\u{fffd}',
                'f' => '\u{b0}',
                'g' => '\u{b1}',
                'h' => '\u{2192}',
                'i' => '\u{2026}',
                'j' => '\u{f7}',
                'k' => '\u{2193}',
                'l' | 'm' => '\u{23ba}',
                'n' | 'o' => '\u{23bb}',
                'p' | 'q' => '\u{2500}',
                'r' | 's' => '\u{23bc}',
                't' => '\u{2080}',
                'u' => '\u{2081}',
                'v' => '\u{2082}',
                'w' => '\u{2083}',
                'x' => '\u{2084}',
                'y' => '\u{2085}',
                'z' => '\u{2086}',
                '{' => '\u{2087}',
                '|' => '\u{2088}',
                '}' => '\u{2089}',
                '~' => '\u{b6}',
                _ => c,
            },
        }
    }
}
