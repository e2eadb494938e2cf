//! Reference renderer: composes an RGB frame buffer from the screen.
//!
//! The windowing layer is expected to blit the produced buffer; nothing
//! here touches a display. Glyph bitmaps come from the screen's
//! [`GlyphSource`](vtty_screen::GlyphSource); cells whose code point has
//! no glyph render as background.

use vtty_escape::{Color, LineDimensions, Rgb};
use vtty_screen::{Blink, Cell, Intensity, Screen, TermMode, Underline};

/// Pixel width of a single-width column.
pub const CELL_WIDTH: usize = 8;

/// Pixel height of a row.
pub const CELL_HEIGHT: usize = 16;

/// A packed RGB pixel buffer sized for a screen.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn for_screen(screen: &Screen) -> Self {
        let width = screen.width() * CELL_WIDTH;
        let height = screen.height() * CELL_HEIGHT;

        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let offset = (y * self.width + x) * 3;
        Rgb::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        )
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }

        let offset = (y * self.width + x) * 3;
        self.pixels[offset] = color.r;
        self.pixels[offset + 1] = color.g;
        self.pixels[offset + 2] = color.b;
    }
}

/// Foreground/background resolution for one cell at one tick.
struct Paint {
    fg: Rgb,
    bg: Rgb,
    visible: bool,
}

/// Compose the screen into a fresh frame buffer. `tick` is the ~400 ms
/// blink counter: slow blink hides every second pair of ticks, fast
/// blink every second tick, and the cursor follows the fast phase.
pub fn render(screen: &Screen, tick: u64) -> Framebuffer {
    let mut frame = Framebuffer::for_screen(screen);

    for (y, line) in screen.lines().iter().enumerate() {
        let dimensions = line.dimensions;

        for (x, cell) in line.cells().iter().enumerate() {
            draw_cell(&mut frame, screen, cell, x, y, dimensions, tick);
        }
    }

    if screen.mode().contains(TermMode::DECTCEM) && tick % 2 == 0 {
        draw_cursor(&mut frame, screen);
    }

    frame
}

fn paint(screen: &Screen, cell: &Cell, tick: u64) -> Paint {
    let mut fg_color = cell.foreground;

    // Bold brightens the base palette half.
    if cell.intensity == Intensity::Bold {
        if let Color::Indexed(index @ 0..8) = fg_color {
            fg_color = Color::Indexed(index + 8);
        }
    }

    let mut fg = screen.palette().resolve(fg_color);
    let mut bg = screen.palette().resolve(cell.background);

    if cell.negative != screen.mode().contains(TermMode::DECSCNM) {
        std::mem::swap(&mut fg, &mut bg);
    }

    if cell.intensity == Intensity::Faint {
        fg = Rgb::new(fg.r / 2, fg.g / 2, fg.b / 2);
    }

    let visible = match cell.blink {
        Blink::None => true,
        Blink::Slow => tick % 4 < 2,
        Blink::Fast => tick % 2 == 0,
    };

    Paint { fg, bg, visible }
}

fn draw_cell(
    frame: &mut Framebuffer,
    screen: &Screen,
    cell: &Cell,
    x: usize,
    y: usize,
    dimensions: LineDimensions,
    tick: u64,
) {
    let paint = paint(screen, cell, tick);

    let hscale = if dimensions >= LineDimensions::DoubleWidth {
        2
    } else {
        1
    };

    // Double-height halves render a vertically magnified window into the
    // glyph: the top half of its rows on the TOP line, the rest on the
    // BOTTOM one.
    let (vscale, row_offset) = match dimensions {
        LineDimensions::DoubleHeightTop => (2, 0),
        LineDimensions::DoubleHeightBottom => (2, CELL_HEIGHT / 2),
        _ => (1, 0),
    };

    let base_x = x * CELL_WIDTH * hscale;
    let base_y = y * CELL_HEIGHT;

    let glyph = (paint.visible && !cell.is_blank())
        .then(|| screen.glyphs().find_glyph(cell.code_point))
        .flatten();

    for py in 0..CELL_HEIGHT {
        let glyph_row = py / vscale + row_offset;

        for px in 0..CELL_WIDTH * hscale {
            let glyph_col = px / hscale;

            let mut on = match &glyph {
                Some(glyph) => glyph_bit(glyph, glyph_row, glyph_col),
                None => false,
            };

            if paint.visible {
                on |= decoration_bit(cell, glyph_row);
            }

            let color = if on { paint.fg } else { paint.bg };
            frame.set_pixel(base_x + px, base_y + py, color);
        }
    }
}

/// Whether the glyph bitmap has the pixel at (row, col) set.
fn glyph_bit(glyph: &vtty_screen::Glyph<'_>, row: usize, col: usize) -> bool {
    let stride = glyph.width as usize;
    let byte = match glyph.rows.get(row * stride + col / 8) {
        Some(byte) => *byte,
        None => return false,
    };

    byte & (0x80 >> (col % 8)) != 0
}

/// Underline, strike-through and overline strokes.
fn decoration_bit(cell: &Cell, row: usize) -> bool {
    let underline = match cell.underline {
        Underline::None => false,
        Underline::Single => row == CELL_HEIGHT - 2,
        Underline::Double => row == CELL_HEIGHT - 3 || row == CELL_HEIGHT - 1,
    };

    underline
        || (cell.crossed_out && row == CELL_HEIGHT / 2)
        || (cell.overline && row == 0)
}

fn draw_cursor(frame: &mut Framebuffer, screen: &Screen) {
    let cursor = screen.cursor();
    let line = screen.line(cursor.y);

    let hscale = if line.dimensions >= LineDimensions::DoubleWidth {
        2
    } else {
        1
    };

    let cell = &line[cursor.x];
    let paint = paint(screen, cell, 0);

    let base_x = cursor.x * CELL_WIDTH * hscale;
    let base_y = cursor.y * CELL_HEIGHT;

    for py in 0..CELL_HEIGHT {
        for px in 0..CELL_WIDTH * hscale {
            frame.set_pixel(base_x + px, base_y + py, paint.fg);
        }
    }
}
