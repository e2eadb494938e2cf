use log::trace;

use crate::cell::Cell;
use crate::cursor::Cursor;
use crate::glyph::{GlyphSource, WidthHeuristic};
use crate::line::Line;
use crate::mode::TermMode;
use crate::palette::Palette;
use crate::tabs::TabStops;
use vtty_escape::{
    Charset, CharsetIndex, ClearMode, LineClearMode, LineDimensions,
    ShiftSlot,
};

/// The in-memory character grid and every editing primitive that the
/// control functions are built from.
///
/// Invariants maintained across all operations:
/// - the cursor stays inside the screen, and inside the scroll region
///   vertically while origin mode is set;
/// - `0 <= scroll_top < scroll_bottom <= height - 1`;
/// - `last_column` is only ever true at the last column with autowrap on,
///   and every cursor movement clears it;
/// - cells blanked by scrolling, line edits or erases carry the cursor
///   attribute template.
pub struct Screen {
    lines: Vec<Line>,
    tabs: TabStops,
    mode: TermMode,
    cursor: Cursor,
    saved_cursor: Cursor,
    palette: Palette,
    width: usize,
    height: usize,
    scroll_top: usize,
    scroll_bottom: usize,
    glyphs: Box<dyn GlyphSource>,
}

impl Screen {
    /// Create a screen with the width heuristic standing in for a font.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_glyphs(width, height, Box::new(WidthHeuristic))
    }

    /// Create a screen backed by the given glyph table.
    pub fn with_glyphs(
        width: usize,
        height: usize,
        glyphs: Box<dyn GlyphSource>,
    ) -> Self {
        let mut screen = Self {
            lines: Vec::new(),
            tabs: TabStops::new(0),
            mode: TermMode::default(),
            cursor: Cursor::default(),
            saved_cursor: Cursor::default(),
            palette: Palette::default(),
            width: 0,
            height: 0,
            scroll_top: 0,
            scroll_bottom: 0,
            glyphs,
        };

        screen.resize(width, height);
        screen
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mode(&self) -> TermMode {
        self.mode
    }

    pub fn mode_mut(&mut self) -> &mut TermMode {
        &mut self.mode
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_bottom(&self) -> usize {
        self.scroll_bottom
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn line(&self, y: usize) -> &Line {
        &self.lines[y]
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.lines[y][x]
    }

    pub fn glyphs(&self) -> &dyn GlyphSource {
        &*self.glyphs
    }

    /// Reallocate the grid for new dimensions. Content is preserved where
    /// coordinates overlap; tab stops revert to the defaults and the
    /// scroll region to the full screen.
    pub fn resize(&mut self, width: usize, height: usize) {
        let width = width.max(1);
        let height = height.max(1);
        trace!("resizing screen to {width}x{height}");

        for line in &mut self.lines {
            line.resize(width);
        }
        self.lines
            .resize_with(height, || Line::blank(width, Cell::default()));

        self.tabs = TabStops::new(width);
        self.width = width;
        self.height = height;
        self.scroll_top = 0;
        self.scroll_bottom = height - 1;

        self.cursor.x = self.cursor.x.min(width - 1);
        self.cursor.y = self.cursor.y.min(height - 1);
        self.cursor.last_column = false;
        self.saved_cursor.x = self.saved_cursor.x.min(width - 1);
        self.saved_cursor.y = self.saved_cursor.y.min(height - 1);
        self.saved_cursor.last_column = false;
    }

    /// Full terminal reset: modes, cursor, saved cursor, tab stops,
    /// palette and contents return to their initial values. The grid is
    /// not reallocated.
    pub fn reset(&mut self) {
        self.palette = Palette::default();
        self.mode = TermMode::default();
        self.cursor = Cursor::default();
        self.saved_cursor = self.cursor;
        self.tabs.install_defaults();
        self.scroll_top = 0;
        self.scroll_bottom = self.height - 1;

        for line in &mut self.lines {
            line.reset(Cell::default());
        }
    }

    /// Absolute cursor move, clamped to the screen, or to the scroll
    /// region vertically while origin mode is set.
    pub fn warpto(&mut self, x: isize, y: isize) {
        let (miny, maxy) = if self.mode.contains(TermMode::DECOM) {
            (self.scroll_top as isize, self.scroll_bottom as isize)
        } else {
            (0, self.height as isize - 1)
        };

        self.cursor.x = x.clamp(0, self.width as isize - 1) as usize;
        self.cursor.y = y.clamp(miny, maxy) as usize;
        self.cursor.last_column = false;
    }

    /// Absolute move with origin-mode translation applied to the row.
    pub fn goto(&mut self, row: usize, col: usize) {
        let origin = if self.mode.contains(TermMode::DECOM) {
            self.scroll_top
        } else {
            0
        };

        self.warpto(col as isize, (row + origin) as isize);
    }

    pub fn move_up(&mut self, amount: usize) {
        self.warpto(
            self.cursor.x as isize,
            self.cursor.y as isize - amount as isize,
        );
    }

    pub fn move_down(&mut self, amount: usize) {
        self.warpto(
            self.cursor.x as isize,
            self.cursor.y as isize + amount as isize,
        );
    }

    pub fn move_forward(&mut self, amount: usize) {
        self.warpto(
            self.cursor.x as isize + amount as isize,
            self.cursor.y as isize,
        );
    }

    pub fn move_backward(&mut self, amount: usize) {
        self.warpto(
            self.cursor.x as isize - amount as isize,
            self.cursor.y as isize,
        );
    }

    /// Index: down one line, scrolling the region up at the bottom
    /// margin.
    pub fn newline(&mut self) {
        self.cursor.last_column = false;

        if self.cursor.y < self.scroll_bottom {
            self.cursor.y += 1;
        } else {
            self.scrollup();
        }
    }

    /// Reverse index: up one line, scrolling the region down at the top
    /// margin.
    pub fn revline(&mut self) {
        self.cursor.last_column = false;

        if self.cursor.y > self.scroll_top {
            self.warpto(self.cursor.x as isize, self.cursor.y as isize - 1);
        } else {
            self.scrolldown();
        }
    }

    /// Move to column zero.
    pub fn carriage_return(&mut self) {
        self.cursor.x = 0;
        self.cursor.last_column = false;
    }

    /// Carriage return plus index.
    pub fn nextline(&mut self) {
        self.cursor.x = 0;
        self.newline();
    }

    /// Rotate the scroll region up by one line; the freed bottom line is
    /// blanked with the cursor attributes.
    pub fn scrollup(&mut self) {
        let attrs = self.cursor.attrs;
        self.lines[self.scroll_top..=self.scroll_bottom].rotate_left(1);
        self.lines[self.scroll_bottom].reset(attrs);
    }

    /// Rotate the scroll region down by one line; the freed top line is
    /// blanked with the cursor attributes.
    pub fn scrolldown(&mut self) {
        let attrs = self.cursor.attrs;
        self.lines[self.scroll_top..=self.scroll_bottom].rotate_right(1);
        self.lines[self.scroll_top].reset(attrs);
    }

    /// Rotate a blank line in at the cursor, pushing the lines below it
    /// toward the bottom margin. A no-op outside the scroll region.
    pub fn insert_line(&mut self) {
        if !self.cursor_in_region() {
            return;
        }

        let attrs = self.cursor.attrs;
        self.lines[self.cursor.y..=self.scroll_bottom].rotate_right(1);
        self.lines[self.cursor.y].reset(attrs);
    }

    /// Remove the cursor line, pulling the lines below it up and blanking
    /// the bottom margin line. A no-op outside the scroll region.
    pub fn delete_line(&mut self) {
        if !self.cursor_in_region() {
            return;
        }

        let attrs = self.cursor.attrs;
        self.lines[self.cursor.y..=self.scroll_bottom].rotate_left(1);
        self.lines[self.scroll_bottom].reset(attrs);
    }

    fn cursor_in_region(&self) -> bool {
        (self.scroll_top..=self.scroll_bottom).contains(&self.cursor.y)
    }

    /// Erase in display. Fully cleared rows drop back to single width; a
    /// partially cleared row only does when the cursor sits at the edge
    /// that makes the clear cover the whole row.
    pub fn erase_display(&mut self, mode: ClearMode) {
        let attrs = self.cursor.attrs;

        let rows = match mode {
            ClearMode::Below => {
                if self.cursor.x == 0 {
                    self.lines[self.cursor.y].dimensions =
                        LineDimensions::SingleWidth;
                }
                self.erase_line(LineClearMode::Right);
                self.cursor.y + 1..self.height
            },
            ClearMode::Above => {
                if self.cursor.x == self.width - 1 {
                    self.lines[self.cursor.y].dimensions =
                        LineDimensions::SingleWidth;
                }
                self.erase_line(LineClearMode::Left);
                0..self.cursor.y
            },
            ClearMode::All => 0..self.height,
        };

        for line in &mut self.lines[rows] {
            line.reset(attrs);
        }

        self.cursor.last_column = false;
    }

    /// Erase in line. Blanked cells carry the cursor attributes.
    pub fn erase_line(&mut self, mode: LineClearMode) {
        let range = match mode {
            LineClearMode::Right => self.cursor.x..self.width,
            LineClearMode::Left => 0..self.cursor.x + 1,
            LineClearMode::All => 0..self.width,
        };

        let attrs = self.cursor.attrs;
        self.lines[self.cursor.y].fill(range, attrs);
        self.cursor.last_column = false;
    }

    /// Advance to the next tab stop, clamped to the last column.
    pub fn tab(&mut self) {
        self.cursor.x = self
            .tabs
            .next_after(self.cursor.x)
            .unwrap_or(self.width - 1);
        self.cursor.last_column = false;
    }

    pub fn set_tab(&mut self) {
        self.tabs.set(self.cursor.x);
    }

    pub fn clear_tab(&mut self) {
        self.tabs.clear(self.cursor.x);
    }

    pub fn clear_all_tabs(&mut self) {
        self.tabs.clear_all();
    }

    /// Delete characters at the cursor; the remainder of the line shifts
    /// left and blanks with the cursor attributes shift in from the
    /// right.
    pub fn delete_chars(&mut self, count: usize) {
        let x = self.cursor.x;
        let count = count.max(1).min(self.width - x);
        let attrs = self.cursor.attrs;

        let line = &mut self.lines[self.cursor.y];
        line.rotate_left_from(x, count);
        line.fill(self.width - count..self.width, attrs);

        self.cursor.last_column = false;
    }

    /// Set the scroll region from raw 1-origin margins (0 selects the
    /// default). Only applied when the top lies above the bottom; the
    /// cursor then warps to the region origin.
    pub fn set_scroll_region(&mut self, top: u16, bottom: u16) {
        let top = usize::from(top.max(1));
        let bottom = match bottom as usize {
            0 => self.height,
            value if value > self.height => self.height,
            value => value,
        };

        if top < bottom {
            self.scroll_top = top - 1;
            self.scroll_bottom = bottom - 1;

            let y = if self.mode.contains(TermMode::DECOM) {
                self.scroll_top
            } else {
                0
            };
            self.warpto(0, y as isize);
        }
    }

    /// Write one code point at the cursor, with wrap, translation,
    /// conceal and width handling.
    pub fn print(&mut self, ch: char) {
        if self.cursor.last_column {
            self.cursor.x = 0;
            self.newline();
        }

        let shift = self.cursor.single_shift.take();
        let charset = if self.mode.contains(TermMode::VT52GFX) {
            Charset::Vt52Graphics
        } else {
            self.cursor.charset_for(shift)
        };
        let ch = charset.map(ch);

        let cell = &mut self.lines[self.cursor.y][self.cursor.x];
        *cell = self.cursor.attrs;
        if !self.cursor.conceal {
            cell.code_point = ch;
        }

        let width = if ch == '\0' {
            1
        } else {
            self.glyphs.advance_width(ch)
        };

        // Double-width lines burn two columns per glyph column.
        let advance = if self.lines[self.cursor.y].dimensions
            >= LineDimensions::DoubleWidth
        {
            width * 2
        } else {
            width
        };

        if self.cursor.x + advance < self.width {
            self.cursor.x += advance;
        } else if self.mode.contains(TermMode::DECAWM) {
            self.cursor.last_column = true;
        }
    }

    /// Snapshot the whole cursor, attributes and charsets included.
    pub fn save_cursor(&mut self) {
        self.saved_cursor = self.cursor;
    }

    /// Restore the snapshot taken by [`Screen::save_cursor`], clamped in
    /// case the screen shrank in between.
    pub fn restore_cursor(&mut self) {
        self.cursor = self.saved_cursor;
        self.cursor.x = self.cursor.x.min(self.width - 1);
        self.cursor.y = self.cursor.y.min(self.height - 1);
    }

    /// Restore only the saved position and wrap state.
    pub fn restore_cursor_position(&mut self) {
        self.cursor.x = self.saved_cursor.x.min(self.width - 1);
        self.cursor.y = self.saved_cursor.y.min(self.height - 1);
        self.cursor.last_column = self.saved_cursor.last_column;
    }

    /// Screen alignment pattern: fill every cell with `E` in default
    /// attributes.
    pub fn screen_align(&mut self) {
        let mut template = Cell::default();
        template.code_point = 'E';

        for line in &mut self.lines {
            line.reset(template);
        }
    }

    /// Set the line dimensions of the cursor row.
    pub fn set_line_dimensions(&mut self, dimensions: LineDimensions) {
        self.lines[self.cursor.y].dimensions = dimensions;
    }

    /// Invoke a logical charset into GL or GR.
    pub fn locking_shift(&mut self, slot: ShiftSlot, index: CharsetIndex) {
        match slot {
            ShiftSlot::Gl => self.cursor.gl = index,
            ShiftSlot::Gr => self.cursor.gr = index,
        }
    }
}
