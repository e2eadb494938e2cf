use crate::actor::{Action, Actor};
use crate::charset::{Charset, CharsetIndex, ShiftSlot};
use crate::mode::LineDimensions;
use log::debug;

/// Dispatch a completed escape sequence: the collected intermediates plus
/// the final byte select the control function.
pub(crate) fn perform<A: Actor>(
    actor: &mut A,
    intermediates: &[u8],
    byte: u8,
) {
    if intermediates.first() == Some(&0xff) {
        debug!("too many intermediates in escape sequence");
        return;
    }

    match (intermediates, byte) {
        ([], b'6') | ([], b'9') => {
            // DECBI/DECFI: back/forward index. Accepted and dropped.
            debug!("[ignored esc] {:?}", byte as char);
        },
        ([], b'7') => actor.handle(Action::SaveCursor),
        ([], b'8') => actor.handle(Action::RestoreCursor),
        // DECANM escape while already in ANSI mode.
        ([], b'<') => {},
        ([], b'=') => actor.handle(Action::SetKeypadApplicationMode(true)),
        ([], b'>') => actor.handle(Action::SetKeypadApplicationMode(false)),
        ([], b'D') => actor.handle(Action::Index),
        ([], b'E') => actor.handle(Action::NextLine),
        // XTerm hpLowerleftBugCompat.
        ([], b'F') => actor.handle(Action::CursorLowerLeft),
        ([], b'H') => actor.handle(Action::SetHorizontalTab),
        ([], b'M') => actor.handle(Action::ReverseIndex),
        ([], b'N') => actor.handle(Action::SingleShift(CharsetIndex::G2)),
        ([], b'O') => actor.handle(Action::SingleShift(CharsetIndex::G3)),
        ([], b'Z') => actor.handle(Action::IdentifyTerminal),
        // ST: string terminator, nothing to do.
        ([], b'\\') => {},
        ([], b'c') => actor.handle(Action::FullReset),
        ([], b'n') => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gl,
            index: CharsetIndex::G2,
        }),
        ([], b'o') => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gl,
            index: CharsetIndex::G3,
        }),
        ([], b'|') => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gr,
            index: CharsetIndex::G3,
        }),
        ([], b'}') => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gr,
            index: CharsetIndex::G2,
        }),
        ([], b'~') => actor.handle(Action::LockingShift {
            slot: ShiftSlot::Gr,
            index: CharsetIndex::G1,
        }),
        ([b' '], b'F') => actor.handle(Action::Set8BitControls(false)),
        ([b' '], b'G') => actor.handle(Action::Set8BitControls(true)),
        ([b'#'], b'3') => actor.handle(Action::SetLineDimensions(
            LineDimensions::DoubleHeightTop,
        )),
        ([b'#'], b'4') => actor.handle(Action::SetLineDimensions(
            LineDimensions::DoubleHeightBottom,
        )),
        ([b'#'], b'5') => actor
            .handle(Action::SetLineDimensions(LineDimensions::SingleWidth)),
        ([b'#'], b'6') => actor
            .handle(Action::SetLineDimensions(LineDimensions::DoubleWidth)),
        ([b'#'], b'8') => actor.handle(Action::ScreenAlignment),
        ([b'%'], b'@') => actor.handle(Action::SetUtf8(false)),
        ([b'%'], b'G') => actor.handle(Action::SetUtf8(true)),
        ([b'('], final_byte) => {
            designate_94(actor, CharsetIndex::G0, final_byte)
        },
        ([b')'], final_byte) => {
            designate_94(actor, CharsetIndex::G1, final_byte)
        },
        ([b'*'], final_byte) => {
            designate_94(actor, CharsetIndex::G2, final_byte)
        },
        ([b'+'], final_byte) => {
            designate_94(actor, CharsetIndex::G3, final_byte)
        },
        ([b'-'], final_byte) => {
            designate_96(actor, CharsetIndex::G1, final_byte)
        },
        ([b'.'], final_byte) => {
            designate_96(actor, CharsetIndex::G2, final_byte)
        },
        ([b'/'], final_byte) => {
            designate_96(actor, CharsetIndex::G3, final_byte)
        },
        _ => debug!(
            "[unexpected esc] intermediates: {intermediates:?}, \
             final: {:?}",
            byte as char
        ),
    }
}

/// Designate one of the 94-character sets to a logical slot.
fn designate_94<A: Actor>(actor: &mut A, index: CharsetIndex, byte: u8) {
    let charset = match byte {
        b'0' => Charset::DecSpecialGraphics,
        b'A' => Charset::UnitedKingdom,
        b'B' => Charset::Ascii,
        _ => {
            debug!("unrecognized 94-character set: {:?}", byte as char);
            Charset::Ascii
        },
    };

    actor.handle(Action::ConfigureCharset(index, charset));
}

/// 96-character sets are recognized but not modeled; the slot falls back
/// to ASCII.
fn designate_96<A: Actor>(actor: &mut A, index: CharsetIndex, byte: u8) {
    debug!("unrecognized 96-character set: {:?}", byte as char);
    actor.handle(Action::ConfigureCharset(index, Charset::Ascii));
}
