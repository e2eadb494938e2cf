/// Wrapper for the ANSI (public) modes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    Named(NamedMode),
    Unknown(u16),
}

impl Mode {
    pub(crate) fn from_raw(mode: u16) -> Self {
        match mode {
            20 => Self::Named(NamedMode::LineFeedNewLine),
            _ => Self::Unknown(mode),
        }
    }

    /// Get the raw value of the mode.
    pub fn raw(self) -> u16 {
        match self {
            Self::Named(named) => named as u16,
            Self::Unknown(mode) => mode,
        }
    }
}

impl From<NamedMode> for Mode {
    fn from(value: NamedMode) -> Self {
        Self::Named(value)
    }
}

/// ANSI modes with a defined effect.
#[repr(u16)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NamedMode {
    /// LNM: line feed implies carriage return.
    LineFeedNewLine = 20,
}

/// Wrapper for the private DEC modes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrivateMode {
    Named(NamedPrivateMode),
    Unknown(u16),
}

impl PrivateMode {
    pub(crate) fn from_raw(mode: u16) -> Self {
        match mode {
            1 => Self::Named(NamedPrivateMode::CursorKeys),
            2 => Self::Named(NamedPrivateMode::AnsiMode),
            3 => Self::Named(NamedPrivateMode::ColumnMode),
            4 => Self::Named(NamedPrivateMode::SmoothScroll),
            5 => Self::Named(NamedPrivateMode::ReverseScreen),
            6 => Self::Named(NamedPrivateMode::Origin),
            7 => Self::Named(NamedPrivateMode::AutoWrap),
            8 => Self::Named(NamedPrivateMode::AutoRepeat),
            9 => Self::Named(NamedPrivateMode::Interlace),
            25 => Self::Named(NamedPrivateMode::ShowCursor),
            _ => Self::Unknown(mode),
        }
    }

    /// Get the raw value of the mode.
    pub fn raw(self) -> u16 {
        match self {
            Self::Named(named) => named as u16,
            Self::Unknown(mode) => mode,
        }
    }
}

impl From<NamedPrivateMode> for PrivateMode {
    fn from(value: NamedPrivateMode) -> Self {
        Self::Named(value)
    }
}

/// Private DEC modes of the VT100 family.
#[repr(u16)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NamedPrivateMode {
    /// DECCKM: cursor keys send application sequences.
    CursorKeys = 1,
    /// DECANM: ANSI mode; resetting selects the VT52 interpreter.
    AnsiMode = 2,
    /// DECCOLM: 132 columns when set, 80 when reset.
    ColumnMode = 3,
    /// DECSCLM: smooth scroll. Observable state only.
    SmoothScroll = 4,
    /// DECSCNM: reverse video across the whole screen.
    ReverseScreen = 5,
    /// DECOM: cursor addressing is relative to the scroll region.
    Origin = 6,
    /// DECAWM: autowrap at the last column.
    AutoWrap = 7,
    /// DECARM: keyboard auto repeat.
    AutoRepeat = 8,
    /// DECINLM: interlace. Observable state only.
    Interlace = 9,
    /// DECTCEM: text cursor enable.
    ShowCursor = 25,
}

/// Erase-in-display extents, relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Cursor to end of screen.
    Below,
    /// Start of screen to cursor.
    Above,
    /// The whole screen.
    All,
}

/// Erase-in-line extents, relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClearMode {
    /// Cursor to end of line.
    Right,
    /// Start of line to cursor.
    Left,
    /// The whole line.
    All,
}

/// Tab stop clearing extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClearMode {
    /// The stop under the cursor.
    Current,
    /// Every stop.
    All,
}

/// Line rendering dimensions selected by the DEC double-width and
/// double-height escapes. The ordering is part of the contract: anything
/// above `DoubleWidth` is one of the double-height halves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LineDimensions {
    #[default]
    SingleWidth,
    DoubleWidth,
    DoubleHeightTop,
    DoubleHeightBottom,
}
