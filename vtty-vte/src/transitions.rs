//! Transition table for the VT500-series finite state machine.
//!
//! Each function covers one parser state: given an input byte it returns
//! the next [`State`] and the [`Action`] to perform. The table mirrors the
//! DEC/ECMA-48 parser diagram, with two deviations that predate ECMA-48
//! terminals in the wild: CAN and SUB abort the pending sequence and print
//! U+FFFD, and an ESC received inside an OSC string finalizes the string
//! before the escape is taken.

use crate::enums::{Action, State};

/// Transitions that apply from any state: CAN/SUB/ESC and the 8-bit C1
/// controls.
#[inline(always)]
const fn anywhere(state: State, byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x18 | 0x1a => (Ground, Abort),
        0x1b => (Escape, None),
        0x80..=0x8f | 0x91..=0x97 | 0x99 | 0x9a => (Ground, Execute),
        0x9c => (Ground, None),
        0x90 => (DcsEntry, None),
        0x98 => (SosString, None),
        0x9b => (CsiEntry, None),
        0x9d => (OscString, None),
        0x9e => (PmString, None),
        0x9f => (ApcString, None),
        _ => (state, None),
    }
}

/// Ground state: C0 controls execute, everything else prints.
#[inline(always)]
const fn ground(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Ground, Execute),
        0x20..=0x7f => (Ground, Print),
        0xa0..=0xff => (Utf8Sequence, Utf8),
        _ => anywhere(Ground, byte),
    }
}

/// ESC seen; the next byte identifies the sequence family.
#[inline(always)]
const fn escape(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Escape, Execute),
        0x20..=0x2f => (EscapeIntermediate, Collect),
        0x50 => (DcsEntry, None),
        0x58 => (SosString, None),
        0x5b => (CsiEntry, None),
        0x5d => (OscString, None),
        0x5e => (PmString, None),
        0x5f => (ApcString, None),
        0x30..=0x7e => (Ground, EscDispatch),
        0x7f => (Escape, Ignore),
        _ => anywhere(Escape, byte),
    }
}

/// Escape sequence with collected intermediates awaiting its final byte.
#[inline(always)]
const fn escape_intermediate(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (EscapeIntermediate, Execute),
        0x20..=0x2f => (EscapeIntermediate, Collect),
        0x30..=0x7e => (Ground, EscDispatch),
        0x7f => (EscapeIntermediate, Ignore),
        _ => anywhere(EscapeIntermediate, byte),
    }
}

/// First byte after CSI.
#[inline(always)]
const fn csi_entry(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (CsiEntry, Execute),
        0x20..=0x2f => (CsiIntermediate, Collect),
        0x3a => (CsiIgnore, None),
        0x30..=0x39 | 0x3b => (CsiParam, Param),
        0x3c..=0x3f => (CsiParam, Collect),
        0x40..=0x7e => (Ground, CsiDispatch),
        0x7f => (CsiEntry, Ignore),
        _ => anywhere(CsiEntry, byte),
    }
}

/// Numeric parameter collection.
#[inline(always)]
const fn csi_param(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (CsiParam, Execute),
        0x20..=0x2f => (CsiIntermediate, Collect),
        0x3a | 0x3c..=0x3f => (CsiIgnore, None),
        0x30..=0x3b => (CsiParam, Param),
        0x40..=0x7e => (Ground, CsiDispatch),
        0x7f => (CsiParam, Ignore),
        _ => anywhere(CsiParam, byte),
    }
}

/// Intermediates inside a control sequence; parameters are over.
#[inline(always)]
const fn csi_intermediate(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (CsiIntermediate, Execute),
        0x20..=0x2f => (CsiIntermediate, Collect),
        0x30..=0x3f => (CsiIgnore, None),
        0x40..=0x7e => (Ground, CsiDispatch),
        0x7f => (CsiIntermediate, Ignore),
        _ => anywhere(CsiIntermediate, byte),
    }
}

/// Malformed control sequence; swallow bytes until a final arrives.
#[inline(always)]
const fn csi_ignore(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (CsiIgnore, Execute),
        0x20..=0x3f | 0x7f => (CsiIgnore, Ignore),
        0x40..=0x7e => (Ground, None),
        _ => anywhere(CsiIgnore, byte),
    }
}

/// First byte after DCS.
#[inline(always)]
const fn dcs_entry(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x7f => (DcsEntry, Ignore),
        0x20..=0x2f => (DcsIntermediate, Collect),
        0x3a => (DcsIgnore, None),
        0x30..=0x39 | 0x3b => (DcsParam, Param),
        0x3c..=0x3f => (DcsParam, Collect),
        0x40..=0x7e => (DcsPassthrough, None),
        _ => anywhere(DcsEntry, byte),
    }
}

/// DCS parameter collection.
#[inline(always)]
const fn dcs_param(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x7f => (DcsParam, Ignore),
        0x30..=0x39 | 0x3b => (DcsParam, Param),
        0x3a | 0x3c..=0x3f => (DcsIgnore, None),
        0x20..=0x2f => (DcsIntermediate, Collect),
        0x40..=0x7e => (DcsPassthrough, None),
        _ => anywhere(DcsParam, byte),
    }
}

/// DCS intermediates prior to passthrough.
#[inline(always)]
const fn dcs_intermediate(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x7f => (DcsIntermediate, Ignore),
        0x20..=0x2f => (DcsIntermediate, Collect),
        0x30..=0x3f => (DcsIgnore, None),
        0x40..=0x7e => (DcsPassthrough, None),
        _ => anywhere(DcsIntermediate, byte),
    }
}

/// Device control string payload, forwarded byte by byte.
#[inline(always)]
const fn dcs_passthrough(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x20..=0x7e => {
            (DcsPassthrough, Put)
        },
        0x7f => (DcsPassthrough, Ignore),
        0x9c => (Ground, None),
        _ => anywhere(DcsPassthrough, byte),
    }
}

/// Malformed device control string; swallow until ST.
#[inline(always)]
const fn dcs_ignore(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x20..=0x7f => (DcsIgnore, Ignore),
        0x9c => (Ground, None),
        _ => anywhere(DcsIgnore, byte),
    }
}

/// Operating system command payload, collected until BEL or ST.
#[inline(always)]
const fn osc_string(byte: u8) -> (State, Action) {
    use Action::*;
    use State::*;

    match byte {
        0x07 => (Ground, Ignore),
        0x00..=0x06 | 0x08..=0x17 | 0x19 | 0x1c..=0x1f => (OscString, Ignore),
        0x20..=0x7f => (OscString, OscPut),
        0xa0..=0xff => (Utf8Sequence, Utf8),
        _ => anywhere(OscString, byte),
    }
}

/// SOS/PM/APC strings carry no semantics; everything is dropped.
#[inline(always)]
const fn string_ignore(state: State, byte: u8) -> (State, Action) {
    use Action::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x20..=0x7f => (state, Ignore),
        _ => anywhere(state, byte),
    }
}

/// Action performed upon entering a state, before the next byte is read.
#[inline(always)]
pub(crate) const fn entry_action(state: State) -> Action {
    use Action::*;
    use State::*;

    match state {
        Escape | CsiEntry | DcsEntry => Clear,
        DcsPassthrough => Hook,
        OscString => OscStart,
        _ => None,
    }
}

/// Action performed after leaving a state, finalizing pending buffers.
#[inline(always)]
pub(crate) const fn exit_action(state: State) -> Action {
    use Action::*;
    use State::*;

    match state {
        DcsPassthrough => Unhook,
        OscString => OscEnd,
        _ => None,
    }
}

/// Core transition table delegating to the state-specific helpers.
#[inline(always)]
pub(crate) const fn transit(state: State, byte: u8) -> (State, Action) {
    use State::*;

    match state {
        Ground => ground(byte),
        Escape => escape(byte),
        EscapeIntermediate => escape_intermediate(byte),
        CsiEntry => csi_entry(byte),
        CsiParam => csi_param(byte),
        CsiIntermediate => csi_intermediate(byte),
        CsiIgnore => csi_ignore(byte),
        DcsEntry => dcs_entry(byte),
        DcsParam => dcs_param(byte),
        DcsIntermediate => dcs_intermediate(byte),
        DcsIgnore => dcs_ignore(byte),
        DcsPassthrough => dcs_passthrough(byte),
        OscString => osc_string(byte),
        SosString | PmString | ApcString => string_ignore(state, byte),
        Utf8Sequence => (Utf8Sequence, Action::Utf8),
    }
}
