use utf8parse::Receiver;

#[derive(Default)]
struct Scalar {
    inner: Option<char>,
}

impl Receiver for Scalar {
    fn codepoint(&mut self, c: char) {
        self.inner.replace(c);
    }

    fn invalid_sequence(&mut self) {
        self.codepoint(char::REPLACEMENT_CHARACTER);
    }
}

/// Minimal UTF-8 decoder for the VT52 path, which has no string states
/// and only ever prints what it decodes.
#[derive(Default)]
pub(crate) struct Decoder {
    inner: utf8parse::Parser,
}

impl Decoder {
    pub(crate) fn advance(&mut self, byte: u8) -> Option<char> {
        let mut scalar = Scalar::default();
        self.inner.advance(&mut scalar, byte);
        scalar.inner
    }
}
