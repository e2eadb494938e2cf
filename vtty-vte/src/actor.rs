//! Callbacks invoked by the byte-level parser.
//!
//! [`Parser`](crate::parser::Parser) walks a byte stream and reports the
//! recognized protocol elements to an [`Actor`]. The trait methods mirror
//! the action set of the ECMA-48 state machine; a higher layer is expected
//! to attach meaning to final bytes, parameters and payloads.
//!
//! `params` are the decimal integer parameters of a control sequence,
//! separated by `;`. An omitted parameter is reported as 0, the default
//! value. At most [`MAX_PARAMETERS`](crate::MAX_PARAMETERS) are kept and
//! each is clamped to [`PARAMETER_MAX`](crate::PARAMETER_MAX).
//!
//! `intermediates` are the collected bytes in the range 0x20..=0x2F (for
//! control sequences, also the private markers 0x3C..=0x3F). At most two
//! are retained; a third overwrites the first slot with the sentinel
//! `0xFF` so that dispatch can drop the sequence as unrecognized.

/// Consumer-facing interface for the events emitted by the parser.
pub trait Actor {
    /// Emits a single printable Unicode scalar.
    fn print(&mut self, c: char);

    /// Executes an immediate single-byte control function (C0, or a C1
    /// control that is not the start of a longer sequence).
    fn execute(&mut self, byte: u8);

    /// Signals the start of a device control string.
    fn hook(&mut self, params: &[u16], intermediates: &[u8], byte: u8);

    /// Passes one payload byte of the current device control string.
    fn put(&mut self, byte: u8);

    /// Marks the end of the current device control string.
    fn unhook(&mut self);

    /// Dispatches a completed operating system command. `payload` is the
    /// raw accumulated string, command number and all.
    fn osc_dispatch(&mut self, payload: &[u8]);

    /// Dispatches a control sequence.
    fn csi_dispatch(&mut self, params: &[u16], intermediates: &[u8], byte: u8);

    /// Dispatches an escape sequence.
    fn esc_dispatch(&mut self, intermediates: &[u8], byte: u8);

    /// Whether the UTF-8 input layer is currently enabled. When false,
    /// bytes 0xA0..=0xFF print as 8-bit characters instead of being
    /// decoded.
    fn utf8_mode(&self) -> bool {
        false
    }
}
