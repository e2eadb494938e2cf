use std::collections::VecDeque;

use log::debug;
use vtty_escape::{
    Action, Actor, CharacterAttribute, NamedMode, NamedPrivateMode, Parser,
    PrivateMode,
};
use vtty_screen::{Blink, Cell, Frame, Intensity, Screen, TermMode, Underline};

use crate::keymap::{self, Key};
use crate::output::OutputBuffer;

/// Primary device attributes: VT100 with advanced video and graphics
/// options.
const DEVICE_ATTRS: &[u8] = b"?1;7c";

/// Column counts selected by DECCOLM.
const WIDE_COLUMNS: usize = 132;
const NARROW_COLUMNS: usize = 80;

/// Notifications the embedding layer drains after feeding input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    Bell,
    TitleChanged(String),
    IconNameChanged(String),
    /// Autoprint request for the given 0-based row.
    PrintLine(usize),
    /// DECCOLM changed the column count; the PTY should be resized to
    /// match.
    ColumnsChanged(usize),
}

/// The terminal: screen, parser, outbound buffer and window state in one
/// value owned by the control loop.
pub struct Terminal {
    parser: Parser,
    state: TermState,
}

impl Terminal {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self::with_screen(Screen::new(columns, rows))
    }

    pub fn with_screen(screen: Screen) -> Self {
        Self {
            parser: Parser::new(),
            state: TermState {
                screen,
                output: OutputBuffer::default(),
                events: VecDeque::new(),
                answerback: String::new(),
                title: None,
                icon_name: None,
                tick: 0,
            },
        }
    }

    /// Interpret a chunk of bytes from the child.
    pub fn advance(&mut self, bytes: &[u8]) {
        let Self { parser, state } = self;
        parser.advance(bytes, state);
    }

    pub fn screen(&self) -> &Screen {
        &self.state.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.state.screen
    }

    /// Bytes waiting to be flushed to the child.
    pub fn output(&self) -> &OutputBuffer {
        &self.state.output
    }

    pub fn output_mut(&mut self) -> &mut OutputBuffer {
        &mut self.state.output
    }

    /// Answerback string transmitted in response to ENQ.
    pub fn set_answerback(&mut self, answerback: impl Into<String>) {
        self.state.answerback = answerback.into();
    }

    pub fn title(&self) -> Option<&str> {
        self.state.title.as_deref()
    }

    pub fn icon_name(&self) -> Option<&str> {
        self.state.icon_name.as_deref()
    }

    pub fn take_event(&mut self) -> Option<TermEvent> {
        self.state.events.pop_front()
    }

    /// Encode a key press and queue it for the child. Keys are dropped
    /// while the remote has paused transmission.
    pub fn key(&mut self, key: Key) {
        if self.state.screen.mode().contains(TermMode::XOFF) {
            return;
        }

        let bytes = keymap::encode(key, self.state.screen.mode());
        self.state.output.append(&bytes);
    }

    /// Toggle the user-visible pause state, transmitting XOFF or XON.
    pub fn toggle_pause(&mut self) {
        let mode = self.state.screen.mode_mut();
        mode.toggle(TermMode::PAUSED);

        let byte: &[u8] = if mode.contains(TermMode::PAUSED) {
            b"\x13"
        } else {
            b"\x11"
        };
        self.state.output.append(byte);
    }

    /// Advance the blink timer; called roughly every 400 ms.
    pub fn tick(&mut self) {
        self.state.tick = self.state.tick.wrapping_add(1);
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick
    }
}

struct TermState {
    screen: Screen,
    output: OutputBuffer,
    events: VecDeque<TermEvent>,
    answerback: String,
    title: Option<String>,
    icon_name: Option<String>,
    tick: u64,
}

impl TermState {
    fn set_mode_flag(&mut self, flag: TermMode, value: bool) {
        self.screen.mode_mut().set(flag, value);
    }

    /// Prefix a control sequence reply with CSI in the form selected by
    /// S8C1T.
    fn csi_reply(&mut self, rest: &[u8]) {
        if self.screen.mode().contains(TermMode::S8C1T) {
            self.output.append(&[0x9b]);
        } else {
            self.output.append(b"\x1b[");
        }
        self.output.append(rest);
    }

    fn device_status_report(&mut self, report: u16) {
        match report {
            5 => self.csi_reply(b"0n"),
            6 => {
                let cursor = self.screen.cursor();
                let row = if self.screen.mode().contains(TermMode::DECOM) {
                    cursor.y - self.screen.scroll_top()
                } else {
                    cursor.y
                };

                let reply = format!("{};{}R", row + 1, cursor.x + 1);
                self.csi_reply(reply.as_bytes());
            },
            other => debug!("[unhandled dsr] {other}"),
        }
    }

    fn set_private_mode(&mut self, mode: PrivateMode, value: bool) {
        let named = match mode {
            PrivateMode::Named(named) => named,
            PrivateMode::Unknown(raw) => {
                debug!("[unknown private mode] ?{raw}={value}");
                return;
            },
        };

        match named {
            NamedPrivateMode::CursorKeys => {
                self.set_mode_flag(TermMode::DECCKM, value)
            },
            NamedPrivateMode::AnsiMode => {
                self.set_mode_flag(TermMode::DECANM, value)
            },
            NamedPrivateMode::ColumnMode => {
                let columns = if value { WIDE_COLUMNS } else { NARROW_COLUMNS };
                let rows = self.screen.height();
                self.screen.resize(columns, rows);
                self.events.push_back(TermEvent::ColumnsChanged(columns));
            },
            NamedPrivateMode::SmoothScroll => {
                self.set_mode_flag(TermMode::DECSCLM, value)
            },
            NamedPrivateMode::ReverseScreen => {
                self.set_mode_flag(TermMode::DECSCNM, value)
            },
            NamedPrivateMode::Origin => {
                self.set_mode_flag(TermMode::DECOM, value);
                let y = if value { self.screen.scroll_top() } else { 0 };
                self.screen.warpto(0, y as isize);
            },
            NamedPrivateMode::AutoWrap => {
                self.set_mode_flag(TermMode::DECAWM, value)
            },
            NamedPrivateMode::AutoRepeat => {
                self.set_mode_flag(TermMode::DECARM, value)
            },
            NamedPrivateMode::Interlace => {
                self.set_mode_flag(TermMode::DECINLM, value)
            },
            NamedPrivateMode::ShowCursor => {
                self.set_mode_flag(TermMode::DECTCEM, value)
            },
        }
    }

    fn apply_attribute(&mut self, attr: CharacterAttribute) {
        use CharacterAttribute::*;

        let cursor = self.screen.cursor_mut();
        let attrs = &mut cursor.attrs;

        match attr {
            Reset => {
                *attrs = Cell::default();
                cursor.conceal = false;
            },
            Bold => attrs.intensity = Intensity::Bold,
            Faint => attrs.intensity = Intensity::Faint,
            NormalIntensity => attrs.intensity = Intensity::Normal,
            Italic => attrs.italic = true,
            CancelItalic => {
                attrs.italic = false;
                attrs.fraktur = false;
            },
            Underline => attrs.underline = self::Underline::Single,
            DoubleUnderline => attrs.underline = self::Underline::Double,
            CancelUnderline => attrs.underline = self::Underline::None,
            BlinkSlow => attrs.blink = Blink::Slow,
            BlinkFast => attrs.blink = Blink::Fast,
            CancelBlink => attrs.blink = Blink::None,
            Negative => attrs.negative = true,
            CancelNegative => attrs.negative = false,
            Conceal => cursor.conceal = true,
            Reveal => cursor.conceal = false,
            CrossedOut => attrs.crossed_out = true,
            CancelCrossedOut => attrs.crossed_out = false,
            Font(slot) => attrs.font = slot,
            Fraktur => attrs.fraktur = true,
            Framed => attrs.frame = Frame::Framed,
            Encircled => attrs.frame = Frame::Encircled,
            CancelFrame => attrs.frame = Frame::None,
            Overline => attrs.overline = true,
            CancelOverline => attrs.overline = false,
            Foreground(color) => attrs.foreground = color,
            Background(color) => attrs.background = color,
            DefaultForeground => {
                attrs.foreground = Cell::default().foreground
            },
            DefaultBackground => {
                attrs.background = Cell::default().background
            },
        }
    }
}

impl Actor for TermState {
    fn handle(&mut self, action: Action) {
        match action {
            Action::Print(c) => self.screen.print(c),
            Action::Bell => self.events.push_back(TermEvent::Bell),
            Action::Backspace => self.screen.move_backward(1),
            Action::Tab => self.screen.tab(),
            Action::LineFeed => {
                if self.screen.mode().contains(TermMode::AUTOPRINT) {
                    self.events
                        .push_back(TermEvent::PrintLine(self.screen.cursor().y));
                }
                self.screen.newline();
                if self.screen.mode().contains(TermMode::LNM) {
                    self.screen.carriage_return();
                }
            },
            Action::CarriageReturn => self.screen.carriage_return(),
            Action::Index => self.screen.newline(),
            Action::NextLine => self.screen.nextline(),
            Action::ReverseIndex => self.screen.revline(),
            Action::SetHorizontalTab => self.screen.set_tab(),
            Action::TransmitAnswerback => {
                self.output.append(self.answerback.as_bytes())
            },
            Action::SetTransmitPaused(paused) => {
                self.set_mode_flag(TermMode::XOFF, paused)
            },
            Action::LockingShift { slot, index } => {
                self.screen.locking_shift(slot, index)
            },
            Action::SingleShift(index) => {
                self.screen.cursor_mut().single_shift = Some(index);
            },
            Action::ConfigureCharset(index, charset) => {
                self.screen.cursor_mut().charsets[index as usize] = charset;
            },
            Action::SaveCursor => self.screen.save_cursor(),
            Action::RestoreCursor => self.screen.restore_cursor(),
            Action::RestoreCursorPosition => {
                self.screen.restore_cursor_position()
            },
            Action::IdentifyTerminal => self.csi_reply(DEVICE_ATTRS),
            Action::Vt52Identify => self.output.append(b"\x1b/Z"),
            Action::FullReset => self.screen.reset(),
            Action::SetKeypadApplicationMode(value) => {
                self.set_mode_flag(TermMode::DECKPAM, value)
            },
            Action::SetLineDimensions(dimensions) => {
                self.screen.set_line_dimensions(dimensions)
            },
            Action::ScreenAlignment => self.screen.screen_align(),
            Action::SetUtf8(value) => self.set_mode_flag(TermMode::UTF8, value),
            Action::Set8BitControls(value) => {
                self.set_mode_flag(TermMode::S8C1T, value)
            },
            Action::CursorLowerLeft => {
                let bottom = self.screen.scroll_bottom();
                self.screen.warpto(0, bottom as isize);
            },
            Action::SetVt52Graphics(value) => {
                self.set_mode_flag(TermMode::VT52GFX, value)
            },
            Action::SetAutoprint(value) => {
                self.set_mode_flag(TermMode::AUTOPRINT, value)
            },
            Action::MoveUp(amount) => self.screen.move_up(amount),
            Action::MoveDown(amount) => self.screen.move_down(amount),
            Action::MoveForward(amount) => self.screen.move_forward(amount),
            Action::MoveBackward(amount) => self.screen.move_backward(amount),
            Action::Vt52CursorDown => {
                if self.screen.mode().contains(TermMode::AUTOPRINT) {
                    self.events
                        .push_back(TermEvent::PrintLine(self.screen.cursor().y));
                }
                self.screen.move_down(1);
            },
            Action::Goto { row, col } => self.screen.goto(row, col),
            Action::GotoRow(row) => {
                let x = self.screen.cursor().x;
                self.screen.warpto(x as isize, row as isize);
            },
            Action::GotoColumn(col) => {
                let y = self.screen.cursor().y;
                self.screen.warpto(col as isize, y as isize);
            },
            Action::ClearScreen(mode) => self.screen.erase_display(mode),
            Action::ClearLine(mode) => self.screen.erase_line(mode),
            Action::DeleteChars(count) => self.screen.delete_chars(count),
            Action::InsertLine => self.screen.insert_line(),
            Action::DeleteLine => self.screen.delete_line(),
            Action::ClearTabs(mode) => match mode {
                vtty_escape::TabClearMode::Current => self.screen.clear_tab(),
                vtty_escape::TabClearMode::All => self.screen.clear_all_tabs(),
            },
            Action::SetMode(mode) => match mode {
                vtty_escape::Mode::Named(NamedMode::LineFeedNewLine) => {
                    self.set_mode_flag(TermMode::LNM, true)
                },
                vtty_escape::Mode::Unknown(raw) => {
                    debug!("[unknown mode] {raw}=1")
                },
            },
            Action::UnsetMode(mode) => match mode {
                vtty_escape::Mode::Named(NamedMode::LineFeedNewLine) => {
                    self.set_mode_flag(TermMode::LNM, false)
                },
                vtty_escape::Mode::Unknown(raw) => {
                    debug!("[unknown mode] {raw}=0")
                },
            },
            Action::SetPrivateMode(mode) => self.set_private_mode(mode, true),
            Action::UnsetPrivateMode(mode) => {
                self.set_private_mode(mode, false)
            },
            Action::SetCharacterAttribute(attr) => self.apply_attribute(attr),
            Action::ReportDeviceStatus(report) => {
                self.device_status_report(report)
            },
            Action::SetScrollingRegion { top, bottom } => {
                self.screen.set_scroll_region(top, bottom)
            },
            Action::LoadLeds(led) => debug!("[ignored decll] {led}"),
            Action::SetWindowTitle(title) => {
                self.title = Some(title.clone());
                self.events.push_back(TermEvent::TitleChanged(title));
            },
            Action::SetIconName(name) => {
                self.icon_name = Some(name.clone());
                self.events.push_back(TermEvent::IconNameChanged(name));
            },
            Action::SetPaletteColor { index, color } => {
                self.screen.palette_mut()[index] = color;
            },
        }
    }

    fn ansi_mode(&self) -> bool {
        self.screen.mode().contains(TermMode::DECANM)
    }

    fn utf8_mode(&self) -> bool {
        self.screen.mode().contains(TermMode::UTF8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtty_escape::Rgb;

    fn term(columns: usize, rows: usize) -> Terminal {
        Terminal::new(columns, rows)
    }

    #[test]
    fn prints_text() {
        let mut terminal = term(20, 5);
        terminal.advance(b"hello");
        assert_eq!(terminal.screen().line(0).text(), "hello");
    }

    #[test]
    fn linefeed_honors_lnm() {
        let mut terminal = term(20, 5);
        terminal.advance(b"ab\n");
        assert_eq!(terminal.screen().cursor().x, 2);

        terminal.advance(b"\x1b[20hcd\n");
        assert_eq!(terminal.screen().cursor().x, 0);
        assert_eq!(terminal.screen().cursor().y, 2);
    }

    #[test]
    fn device_attributes_reply() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b[c");
        assert_eq!(terminal.output().as_slice(), b"\x1b[?1;7c");

        terminal.output_mut().clear();
        terminal.advance(b"\x1bZ");
        assert_eq!(terminal.output().as_slice(), b"\x1b[?1;7c");
    }

    #[test]
    fn eight_bit_replies_under_s8c1t() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b G\x1b[c");
        assert_eq!(terminal.output().as_slice(), b"\x9b?1;7c");
    }

    #[test]
    fn cursor_position_report() {
        let mut terminal = term(80, 24);
        terminal.advance(b"\x1b[5;10H\x1b[6n");
        assert_eq!(terminal.output().as_slice(), b"\x1b[5;10R");
    }

    #[test]
    fn cursor_position_report_origin_mode() {
        let mut terminal = term(80, 24);
        terminal.advance(b"\x1b[?6h\x1b[3;10r\x1b[2;1H\x1b[6n");
        assert_eq!(terminal.output().as_slice(), b"\x1b[2;1R");
    }

    #[test]
    fn status_report() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b[5n");
        assert_eq!(terminal.output().as_slice(), b"\x1b[0n");
    }

    #[test]
    fn answerback_on_enquiry() {
        let mut terminal = term(20, 5);
        terminal.set_answerback("vtty here");
        terminal.advance(b"\x05");
        assert_eq!(terminal.output().as_slice(), b"vtty here");
    }

    #[test]
    fn bell_and_title_events() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x07\x1b]2;work\x07");

        assert_eq!(terminal.take_event(), Some(TermEvent::Bell));
        assert_eq!(
            terminal.take_event(),
            Some(TermEvent::TitleChanged("work".into()))
        );
        assert_eq!(terminal.title(), Some("work"));
    }

    #[test]
    fn osc_palette_update() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b]4;17;#11aaff\x07");
        assert_eq!(
            terminal.screen().palette()[17],
            Rgb::new(0x11, 0xaa, 0xff)
        );
    }

    #[test]
    fn column_mode_resizes() {
        let mut terminal = term(80, 24);
        terminal.advance(b"\x1b[?3h");
        assert_eq!(terminal.screen().width(), 132);
        assert_eq!(
            terminal.take_event(),
            Some(TermEvent::ColumnsChanged(132))
        );

        terminal.advance(b"\x1b[?3l");
        assert_eq!(terminal.screen().width(), 80);
    }

    #[test]
    fn xoff_drops_keys_until_xon() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x13");
        terminal.key(Key::Char('a'));
        assert!(terminal.output().is_empty());

        terminal.advance(b"\x11");
        terminal.key(Key::Char('a'));
        assert_eq!(terminal.output().as_slice(), b"a");
    }

    #[test]
    fn pause_toggle_sends_flow_control() {
        let mut terminal = term(20, 5);
        terminal.toggle_pause();
        terminal.toggle_pause();
        assert_eq!(terminal.output().as_slice(), b"\x13\x11");
        assert!(!terminal.screen().mode().contains(TermMode::PAUSED));
    }

    #[test]
    fn vt52_identify_reply() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b[?2l\x1bZ");
        assert_eq!(terminal.output().as_slice(), b"\x1b/Z");
    }

    #[test]
    fn vt52_direct_cursor_address() {
        let mut terminal = term(40, 10);
        terminal.advance(b"\x1b[?2l\x1bY\x25\x2c");
        assert_eq!(terminal.screen().cursor().y, 5);
        assert_eq!(terminal.screen().cursor().x, 12);
    }

    #[test]
    fn full_reset_restores_modes() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b[?7h\x1b[20h\x1b[5;10Hx");
        terminal.advance(b"\x1bc");

        let mode = terminal.screen().mode();
        assert_eq!(mode, TermMode::default());
        assert_eq!(terminal.screen().cursor().x, 0);
        assert_eq!(terminal.screen().line(4).text(), "");
    }

    #[test]
    fn autoprint_raises_print_line_events() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b[?2l\x1b^x\n\x1b<");
        let events: Vec<_> =
            std::iter::from_fn(|| terminal.take_event()).collect();
        assert!(events.contains(&TermEvent::PrintLine(0)));
    }

    #[test]
    fn charset_shift_out_prints_graphics() {
        let mut terminal = term(20, 5);
        terminal.advance(b"\x1b)0\x0e\x60\x0f\x60");
        assert_eq!(terminal.screen().cell(0, 0).code_point, '\u{25c6}');
        assert_eq!(terminal.screen().cell(1, 0).code_point, '`');
    }
}
