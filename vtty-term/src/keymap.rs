//! Key-to-byte encoding, the input half of the windowing contract.
//!
//! The windowing layer decodes its own key events into [`Key`] values;
//! this module turns them into the bytes the child expects, honoring the
//! keypad/cursor/new-line modes the escape stream has configured.

use vtty_screen::TermMode;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, encoded as UTF-8.
    Char(char),
    Enter,
    ShiftEnter,
    Backspace,
    Tab,
    Escape,
    Home,
    End,
    Insert,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    Up,
    Down,
    Right,
    Left,
}

/// Encode a key press under the given terminal modes.
pub fn encode(key: Key, mode: TermMode) -> Vec<u8> {
    match key {
        Key::Char(c) => {
            let mut buffer = [0u8; 4];
            c.encode_utf8(&mut buffer).as_bytes().to_vec()
        },
        Key::Enter => {
            if mode.contains(TermMode::LNM) {
                b"\r\n".to_vec()
            } else {
                b"\r".to_vec()
            }
        },
        Key::ShiftEnter => b"\n".to_vec(),
        Key::Backspace => vec![0x7f],
        Key::Tab => b"\t".to_vec(),
        Key::Escape => vec![0x1b],
        Key::Home => b"\x1b[1~".to_vec(),
        Key::End => b"\x1b[4~".to_vec(),
        Key::Insert => b"\x1b[2~".to_vec(),
        Key::PageUp => b"\x1b[5~".to_vec(),
        Key::PageDown => b"\x1b[6~".to_vec(),
        Key::F1 => b"\x1bOP".to_vec(),
        Key::F2 => b"\x1bOQ".to_vec(),
        Key::F3 => b"\x1bOR".to_vec(),
        Key::F4 => b"\x1bOS".to_vec(),
        Key::Up | Key::Down | Key::Right | Key::Left => {
            let letter = match key {
                Key::Up => b'A',
                Key::Down => b'B',
                Key::Right => b'C',
                _ => b'D',
            };

            if !mode.contains(TermMode::DECANM) {
                vec![0x1b, letter]
            } else if mode.contains(TermMode::DECCKM) {
                vec![0x1b, b'O', letter]
            } else {
                vec![0x1b, b'[', letter]
            }
        },
    }
}
