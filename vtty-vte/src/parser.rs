use crate::actor::Actor;
use crate::enums::{Action, State};
use crate::transitions;
use crate::utf8::Utf8Decoder;

/// Maximum number of numeric parameters retained for a control sequence.
/// Further parameters are dropped and dispatch reuses the last slot.
pub const MAX_PARAMETERS: usize = 16;

/// Upper bound for a single numeric parameter; larger values saturate.
pub const PARAMETER_MAX: u16 = 16383;

const MAX_INTERMEDIATES: usize = 2;

/// Sentinel stored in the first intermediate slot when a third
/// intermediate arrives, marking the sequence as unrecognized.
const INTERMEDIATE_OVERFLOW: u8 = 0xff;

/// Capacity of the OSC accumulation buffer.
const MAX_OSC_RAW: usize = 512;

#[derive(Debug)]
struct Params {
    items: [u16; MAX_PARAMETERS],
    idx: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            items: [0; MAX_PARAMETERS],
            idx: 0,
        }
    }
}

impl Params {
    fn put(&mut self, byte: u8) {
        if self.idx == MAX_PARAMETERS {
            return;
        }

        if byte == b';' {
            self.idx += 1;
            return;
        }

        let value =
            u32::from(self.items[self.idx]) * 10 + u32::from(byte - b'0');
        self.items[self.idx] = value.min(u32::from(PARAMETER_MAX)) as u16;
    }

    fn as_slice(&self) -> &[u16] {
        &self.items[..=self.idx.min(MAX_PARAMETERS - 1)]
    }

    fn clear(&mut self) {
        self.items = [0; MAX_PARAMETERS];
        self.idx = 0;
    }
}

#[derive(Debug, Default)]
struct Intermediates {
    items: [u8; MAX_INTERMEDIATES],
}

impl Intermediates {
    fn collect(&mut self, byte: u8) {
        if self.items[0] == 0 {
            self.items[0] = byte;
        } else if self.items[1] == 0 {
            self.items[1] = byte;
        } else {
            self.items[0] = INTERMEDIATE_OVERFLOW;
        }
    }

    fn as_slice(&self) -> &[u8] {
        let len = self.items.iter().take_while(|&&b| b != 0).count();
        &self.items[..len]
    }

    fn clear(&mut self) {
        self.items = [0; MAX_INTERMEDIATES];
    }
}

#[derive(Debug, Default)]
struct OscBuffer {
    raw: Vec<u8>,
}

impl OscBuffer {
    fn put(&mut self, byte: u8) {
        if self.raw.len() < MAX_OSC_RAW {
            self.raw.push(byte);
        }
    }

    fn put_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        let bytes = c.encode_utf8(&mut tmp).as_bytes();
        if self.raw.len() + bytes.len() <= MAX_OSC_RAW {
            self.raw.extend_from_slice(bytes);
        }
    }

    fn clear(&mut self) {
        self.raw.clear();
    }
}

/// Byte-level parser for the VT100/VT220 escape sequence protocol.
///
/// The parser owns no terminal state; every recognized element is handed
/// to the supplied [`Actor`]. Feed it bytes with [`Parser::advance`].
#[derive(Default)]
pub struct Parser {
    state: State,
    intermediates: Intermediates,
    params: Params,
    osc: OscBuffer,
    utf8: Utf8Decoder,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine with a chunk of bytes.
    pub fn advance<A: Actor>(&mut self, bytes: &[u8], actor: &mut A) {
        for &byte in bytes {
            if self.state == State::Utf8Sequence {
                self.advance_utf8(actor, byte);
                continue;
            }

            let (next_state, action) = transitions::transit(self.state, byte);

            // CAN and SUB abort whatever is pending and leave a
            // replacement character behind.
            if action == Action::Abort {
                self.clear_sequence();
                self.state = State::Ground;
                actor.print(char::REPLACEMENT_CHARACTER);
                continue;
            }

            // High bytes are either the start of a UTF-8 sequence or, with
            // the decoder off, plain 8-bit characters.
            if action == Action::Utf8 {
                if actor.utf8_mode() {
                    self.utf8.set_return_state(self.state);
                    self.state = State::Utf8Sequence;
                    self.advance_utf8(actor, byte);
                } else if self.state == State::OscString {
                    self.osc.put(byte);
                } else {
                    actor.print(byte as char);
                }
                continue;
            }

            if self.state == next_state {
                self.perform(action, byte, actor);
                continue;
            }

            self.perform(transitions::exit_action(self.state), 0, actor);
            self.perform(action, byte, actor);
            self.perform(transitions::entry_action(next_state), byte, actor);
            self.state = next_state;
        }
    }

    fn advance_utf8<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        let Some(c) = self.utf8.advance(byte).get() else {
            return;
        };

        let return_state = self.utf8.return_state();

        // C1 controls that arrived UTF-8 encoded still act as controls:
        // run them through the transition table as raw bytes.
        if (c as u32) <= 0xff {
            let byte = c as u8;
            let (next_state, action) = transitions::transit(return_state, byte);

            if action == Action::Execute
                || (next_state != return_state
                    && next_state != State::Utf8Sequence)
            {
                self.perform(transitions::exit_action(return_state), 0, actor);
                self.perform(action, byte, actor);
                self.perform(transitions::entry_action(next_state), byte, actor);
                self.state = next_state;
                return;
            }
        }

        match return_state {
            State::OscString => self.osc.put_char(c),
            _ => actor.print(c),
        }

        self.state = return_state;
    }

    fn perform<A: Actor>(&mut self, action: Action, byte: u8, actor: &mut A) {
        use Action::*;

        match action {
            Print => actor.print(byte as char),
            Execute => actor.execute(byte),
            Put => actor.put(byte),
            Param => self.params.put(byte),
            Collect => self.intermediates.collect(byte),
            Clear => self.clear_sequence(),
            CsiDispatch => actor.csi_dispatch(
                self.params.as_slice(),
                self.intermediates.as_slice(),
                byte,
            ),
            EscDispatch => {
                actor.esc_dispatch(self.intermediates.as_slice(), byte)
            },
            Hook => actor.hook(
                self.params.as_slice(),
                self.intermediates.as_slice(),
                byte,
            ),
            Unhook => actor.unhook(),
            OscStart => self.osc.clear(),
            OscPut => self.osc.put(byte),
            OscEnd => actor.osc_dispatch(&self.osc.raw),
            None | Ignore | Utf8 | Abort => {},
        }
    }

    fn clear_sequence(&mut self) {
        self.intermediates.clear();
        self.params.clear();
        self.osc.clear();
    }
}
