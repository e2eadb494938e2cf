use crate::cell::Cell;
use vtty_escape::{Charset, CharsetIndex};

/// The cursor: position, the attribute template applied to written
/// cells, and the character set machinery.
///
/// `last_column` is deliberately its own field rather than derived from
/// `x == width - 1`: the wrap decision depends on whether the most recent
/// printable brought the cursor there with autowrap enabled, history that
/// the position alone cannot carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Template written into every cell the cursor touches.
    pub attrs: Cell,
    /// Logical character set designations G0..=G3.
    pub charsets: [Charset; 4],
    /// Logical set invoked into GL.
    pub gl: CharsetIndex,
    /// Logical set invoked into GR.
    pub gr: CharsetIndex,
    /// Pending single shift, consumed by the next printable.
    pub single_shift: Option<CharsetIndex>,
    pub x: usize,
    pub y: usize,
    /// Written cells carry attributes but suppress their code point.
    pub conceal: bool,
    /// Set after a printable lands in the last column with autowrap on;
    /// the next printable breaks the line first.
    pub last_column: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            attrs: Cell::default(),
            charsets: [Charset::Ascii; 4],
            gl: CharsetIndex::G0,
            gr: CharsetIndex::G1,
            single_shift: None,
            x: 0,
            y: 0,
            conceal: false,
            last_column: false,
        }
    }
}

impl Cursor {
    /// The logical set a printable translates through, honoring a
    /// pending single shift. Callers take `single_shift` first.
    pub(crate) fn charset_for(&self, shift: Option<CharsetIndex>) -> Charset {
        let index = shift.unwrap_or(self.gl);
        self.charsets[index as usize]
    }
}
