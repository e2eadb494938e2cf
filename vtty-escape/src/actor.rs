//! High-level escape sequence consumer interface.
//!
//! The [`Parser`](crate::Parser) translates the raw byte stream into
//! semantic [`Action`]s and relays them to an [`Actor`] implementation.
//! Downstream crates implement this trait to mutate their terminal model
//! without re-implementing the escape sequence state machines.

use crate::charset::{Charset, CharsetIndex, ShiftSlot};
use crate::color::Rgb;
use crate::mode::{
    ClearMode, LineClearMode, LineDimensions, Mode, PrivateMode, TabClearMode,
};
use crate::sgr::CharacterAttribute;

/// A semantic terminal action decoded from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write a printable Unicode scalar at the cursor.
    Print(char),
    /// Ring the terminal bell.
    Bell,
    /// Move the cursor one column left, stopping at the margin.
    Backspace,
    /// Advance the cursor to the next tab stop.
    Tab,
    /// LF/VT/FF: index the cursor; new-line mode adds a carriage return
    /// and autoprint mode raises a line-print request.
    LineFeed,
    /// Move the cursor to column zero.
    CarriageReturn,
    /// IND: index without the new-line-mode side effects.
    Index,
    /// NEL: carriage return plus index.
    NextLine,
    /// RI: move up one line, scrolling down at the top margin.
    ReverseIndex,
    /// HTS: set a tab stop at the cursor column.
    SetHorizontalTab,
    /// ENQ: transmit the configured answerback string.
    TransmitAnswerback,
    /// DC3 sets, DC1 clears the transmit-paused (XOFF) state.
    SetTransmitPaused(bool),
    /// Locking shift: invoke a logical charset into GL or GR.
    LockingShift { slot: ShiftSlot, index: CharsetIndex },
    /// SS2/SS3: translate exactly one following printable through G2/G3.
    SingleShift(CharsetIndex),
    /// Designate a logical character set.
    ConfigureCharset(CharsetIndex, Charset),
    /// DECSC: snapshot the full cursor state.
    SaveCursor,
    /// DECRC: restore the snapshot taken by `SaveCursor`.
    RestoreCursor,
    /// Restore only the saved cursor position and wrap state.
    RestoreCursorPosition,
    /// DA/DECID: reply with the primary device attributes.
    IdentifyTerminal,
    /// VT52 identify: reply `ESC / Z`.
    Vt52Identify,
    /// RIS: reset to initial state.
    FullReset,
    /// DECKPAM on, DECKPNM off.
    SetKeypadApplicationMode(bool),
    /// DECDHL/DECSWL/DECDWL on the cursor line.
    SetLineDimensions(LineDimensions),
    /// DECALN: fill the screen with `E`.
    ScreenAlignment,
    /// Enable or disable the UTF-8 input layer.
    SetUtf8(bool),
    /// S8C1T on, S7C1T off.
    Set8BitControls(bool),
    /// Warp to the first column of the bottom margin.
    CursorLowerLeft,
    /// Enable or disable the VT52 graphics character set.
    SetVt52Graphics(bool),
    /// Enable or disable autoprint.
    SetAutoprint(bool),
    MoveUp(usize),
    MoveDown(usize),
    MoveForward(usize),
    MoveBackward(usize),
    /// VT52 cursor down, which autoprints the current line first when
    /// autoprint mode is active.
    Vt52CursorDown,
    /// Absolute move, 0-origin, origin-mode aware.
    Goto { row: usize, col: usize },
    GotoRow(usize),
    GotoColumn(usize),
    /// ED.
    ClearScreen(ClearMode),
    /// EL.
    ClearLine(LineClearMode),
    /// DCH: delete characters at the cursor, blanks shift in from the
    /// right.
    DeleteChars(usize),
    InsertLine,
    DeleteLine,
    /// TBC.
    ClearTabs(TabClearMode),
    SetMode(Mode),
    UnsetMode(Mode),
    SetPrivateMode(PrivateMode),
    UnsetPrivateMode(PrivateMode),
    /// One decoded SGR attribute.
    SetCharacterAttribute(CharacterAttribute),
    /// DSR.
    ReportDeviceStatus(u16),
    /// DECSTBM with its raw 1-origin parameters (0 meaning default).
    SetScrollingRegion { top: u16, bottom: u16 },
    /// DECLL; observable effect is optional.
    LoadLeds(u16),
    SetWindowTitle(String),
    SetIconName(String),
    SetPaletteColor { index: u8, color: Rgb },
}

/// Trait implemented by consumers of the escape sequence parser.
///
/// The parser invokes [`Actor::handle`] synchronously while walking the
/// input. The two mode queries steer byte routing: they are consulted
/// between bytes so that mode switches take effect mid-stream.
pub trait Actor {
    fn handle(&mut self, action: Action);

    /// Whether the interpreter is in ANSI (VT100) mode. When false,
    /// bytes route through the VT52 automaton.
    fn ansi_mode(&self) -> bool {
        true
    }

    /// Whether the UTF-8 input layer is enabled.
    fn utf8_mode(&self) -> bool {
        false
    }
}
