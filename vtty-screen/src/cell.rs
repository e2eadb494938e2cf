use vtty_escape::Color;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    #[default]
    Normal,
    Bold,
    Faint,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Blink {
    #[default]
    None,
    Slow,
    Fast,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    #[default]
    None,
    Framed,
    Encircled,
}

/// One grid cell: a code point plus its rendition attributes.
///
/// A cell with `code_point` NUL is blank; it still carries attributes so
/// that erased regions keep the colors they were erased with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub code_point: char,
    pub foreground: Color,
    pub background: Color,
    /// Alternate font slot 0..=9; a rendering hint.
    pub font: u8,
    pub intensity: Intensity,
    pub blink: Blink,
    pub underline: Underline,
    pub frame: Frame,
    pub italic: bool,
    /// Swap foreground and background at render time.
    pub negative: bool,
    pub crossed_out: bool,
    pub fraktur: bool,
    pub overline: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            code_point: '\0',
            foreground: Color::Indexed(7),
            background: Color::Indexed(0),
            font: 0,
            intensity: Intensity::default(),
            blink: Blink::default(),
            underline: Underline::default(),
            frame: Frame::default(),
            italic: false,
            negative: false,
            crossed_out: false,
            fraktur: false,
            overline: false,
        }
    }
}

impl Cell {
    /// Whether the cell holds no visible character.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.code_point == '\0'
    }
}
