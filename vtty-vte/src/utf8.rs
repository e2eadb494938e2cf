use crate::enums::State;
use utf8parse::Receiver;

#[derive(Default)]
pub(crate) struct Decoded {
    inner: Option<char>,
}

impl Decoded {
    pub fn get(self) -> Option<char> {
        self.inner
    }
}

impl Receiver for Decoded {
    fn codepoint(&mut self, c: char) {
        self.inner.replace(c);
    }

    fn invalid_sequence(&mut self) {
        self.codepoint(char::REPLACEMENT_CHARACTER);
    }
}

/// UTF-8 sublayer: wraps `utf8parse` and remembers which parser state the
/// machine should fall back to once a scalar (or an error) is produced.
#[derive(Default)]
pub(crate) struct Utf8Decoder {
    return_state: State,
    inner: utf8parse::Parser,
}

impl Utf8Decoder {
    pub(crate) fn return_state(&self) -> State {
        self.return_state
    }

    pub(crate) fn set_return_state(&mut self, state: State) {
        self.return_state = state;
    }

    pub(crate) fn advance(&mut self, byte: u8) -> Decoded {
        let mut decoded = Decoded::default();
        self.inner.advance(&mut decoded, byte);
        decoded
    }
}
