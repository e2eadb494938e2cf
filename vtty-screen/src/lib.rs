mod cell;
mod cursor;
mod glyph;
mod line;
mod mode;
mod palette;
mod screen;
mod tabs;

pub use cell::{Blink, Cell, Frame, Intensity, Underline};
pub use cursor::Cursor;
pub use glyph::{Glyph, GlyphSource, WidthHeuristic};
pub use line::Line;
pub use mode::TermMode;
pub use palette::{PALETTE_SIZE, Palette};
pub use screen::Screen;
pub use vtty_escape as escape;
