use crate::actor::{Action, Actor};
use crate::charset::{CharsetIndex, ShiftSlot};
use log::debug;
use std::fmt;

/// C0/C1 control codes that may be executed outside of an escape
/// sequence. Both the ANSI and the VT52 interpreters share this table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ControlCode {
    // C0
    /// (ENQ, ^E) Enquiry; answered with the answerback string.
    Enquiry,
    /// (BEL, ^G, \a) Bell.
    Bell,
    /// (BS, ^H, \b) Backspace.
    Backspace,
    /// (HT, ^I, \t) Horizontal tabulation.
    HorizontalTab,
    /// (LF, ^J, \n) Line feed.
    LineFeed,
    /// (VT, ^K, \v) Vertical tabulation; treated as line feed.
    VerticalTab,
    /// (FF, ^L, \f) Form feed; treated as line feed.
    FormFeed,
    /// (CR, ^M, \r) Carriage return.
    CarriageReturn,
    /// (SO, ^N) Shift out: G1 into GL.
    ShiftOut,
    /// (SI, ^O) Shift in: G0 into GL.
    ShiftIn,
    /// (DC1, ^Q) XON: resume transmission.
    DeviceControl1,
    /// (DC3, ^S) XOFF: pause transmission.
    DeviceControl3,
    /// (DEL) Ignored.
    Delete,

    // C1
    /// (IND) Index.
    Index,
    /// (NEL) Next line.
    NextLine,
    /// (HTS) Horizontal tabulation set.
    HorizontalTabSet,
    /// (RI) Reverse index.
    ReverseIndex,
    /// (SS2) Single shift two.
    SingleShift2,
    /// (SS3) Single shift three.
    SingleShift3,

    Unexpected(u8),
}

impl From<u8> for ControlCode {
    fn from(byte: u8) -> Self {
        use ControlCode::*;
        match byte {
            0x05 => Enquiry,
            0x07 => Bell,
            0x08 => Backspace,
            0x09 => HorizontalTab,
            0x0a => LineFeed,
            0x0b => VerticalTab,
            0x0c => FormFeed,
            0x0d => CarriageReturn,
            0x0e => ShiftOut,
            0x0f => ShiftIn,
            0x11 => DeviceControl1,
            0x13 => DeviceControl3,
            0x7f => Delete,
            0x84 => Index,
            0x85 => NextLine,
            0x88 => HorizontalTabSet,
            0x8d => ReverseIndex,
            0x8e => SingleShift2,
            0x8f => SingleShift3,
            other => Unexpected(other),
        }
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ControlCode::*;
        let code = match self {
            Enquiry => "ENQ",
            Bell => "BEL",
            Backspace => "BS",
            HorizontalTab => "HT",
            LineFeed => "LF",
            VerticalTab => "VT",
            FormFeed => "FF",
            CarriageReturn => "CR",
            ShiftOut => "SO",
            ShiftIn => "SI",
            DeviceControl1 => "DC1",
            DeviceControl3 => "DC3",
            Delete => "DEL",
            Index => "IND",
            NextLine => "NEL",
            HorizontalTabSet => "HTS",
            ReverseIndex => "RI",
            SingleShift2 => "SS2",
            SingleShift3 => "SS3",
            Unexpected(_) => "UNEXPECTED",
        };

        match self {
            Unexpected(b) => write!(f, "{code}: 0x{b:02X}"),
            _ => write!(f, "{code}"),
        }
    }
}

pub(crate) fn perform<A: Actor>(byte: u8, actor: &mut A) {
    let code = ControlCode::from(byte);
    match code {
        ControlCode::Enquiry => actor.handle(Action::TransmitAnswerback),
        ControlCode::Bell => actor.handle(Action::Bell),
        ControlCode::Backspace => actor.handle(Action::Backspace),
        ControlCode::HorizontalTab => actor.handle(Action::Tab),
        ControlCode::LineFeed
        | ControlCode::VerticalTab
        | ControlCode::FormFeed => actor.handle(Action::LineFeed),
        ControlCode::CarriageReturn => actor.handle(Action::CarriageReturn),
        ControlCode::ShiftOut => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gl,
            index: CharsetIndex::G1,
        }),
        ControlCode::ShiftIn => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gl,
            index: CharsetIndex::G0,
        }),
        ControlCode::DeviceControl1 => {
            actor.handle(Action::SetTransmitPaused(false))
        },
        ControlCode::DeviceControl3 => {
            actor.handle(Action::SetTransmitPaused(true))
        },
        ControlCode::Delete => {},
        ControlCode::Index => actor.handle(Action::Index),
        ControlCode::NextLine => actor.handle(Action::NextLine),
        ControlCode::HorizontalTabSet => {
            actor.handle(Action::SetHorizontalTab)
        },
        ControlCode::ReverseIndex => actor.handle(Action::ReverseIndex),
        ControlCode::SingleShift2 => {
            actor.handle(Action::SingleShift(CharsetIndex::G2))
        },
        ControlCode::SingleShift3 => {
            actor.handle(Action::SingleShift(CharsetIndex::G3))
        },
        _ => debug!("[unexpected control code] {code}"),
    }
}
