use bitflags::bitflags;

bitflags! {
    /// The terminal mode set: ANSI modes, DEC private modes and a few
    /// internal states that behave like modes (XOFF, pause, autoprint,
    /// VT52 graphics).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TermMode: u32 {
        /// UTF-8 decoding on the input stream.
        const UTF8      = 1;
        /// Transmission paused by the remote via DC3.
        const XOFF      = 1 << 1;
        /// User-visible pause state; toggling sends DC3/DC1.
        const PAUSED    = 1 << 2;
        /// Autoprint the current line on line feed.
        const AUTOPRINT = 1 << 3;
        /// VT52 graphics character set active.
        const VT52GFX   = 1 << 4;
        /// Emit 8-bit C1 controls rather than 7-bit ESC pairs.
        const S8C1T     = 1 << 5;
        /// LNM: line feed implies carriage return.
        const LNM       = 1 << 6;
        /// DECKPAM: keypad application mode.
        const DECKPAM   = 1 << 7;
        /// DECCKM: cursor keys send application sequences.
        const DECCKM    = 1 << 8;
        /// DECANM: ANSI mode; reset selects the VT52 interpreter.
        const DECANM    = 1 << 9;
        /// DECSCLM: smooth scroll.
        const DECSCLM   = 1 << 10;
        /// DECSCNM: screen-wide reverse video.
        const DECSCNM   = 1 << 11;
        /// DECOM: origin mode, addressing relative to the scroll region.
        const DECOM     = 1 << 12;
        /// DECAWM: autowrap at the last column.
        const DECAWM    = 1 << 13;
        /// DECARM: keyboard auto repeat.
        const DECARM    = 1 << 14;
        /// DECINLM: interlace.
        const DECINLM   = 1 << 15;
        /// DECTCEM: text cursor enable.
        const DECTCEM   = 1 << 16;
    }
}

impl Default for TermMode {
    /// The mode set installed at startup and by a full reset.
    fn default() -> Self {
        Self::DECANM
            | Self::DECSCLM
            | Self::DECARM
            | Self::DECINLM
            | Self::DECTCEM
    }
}
