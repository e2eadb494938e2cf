use crate::actor::{Action, Actor};
use crate::color::Color;
use crate::mode::{
    ClearMode, LineClearMode, NamedPrivateMode, PrivateMode,
};
use crate::sgr::CharacterAttribute;
use crate::{control, utf8};
use log::debug;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Ground,
    Escape,
    /// Direct cursor address: waiting for the row byte.
    Dca1,
    /// Direct cursor address: waiting for the column byte.
    Dca2,
    SetForeground,
    SetBackground,
}

/// The VT52 automaton active while ANSI mode is reset.
///
/// Insert line and delete line follow the Atari interpretation of ESC L
/// and ESC M rather than the VT62 loop-back/maintenance one; a software
/// terminal has far more use for the former.
#[derive(Default)]
pub(crate) struct Vt52Parser {
    state: State,
    utf8: utf8::Decoder,
}

impl Vt52Parser {
    pub(crate) fn advance<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        match self.state {
            State::Ground => self.ground(byte, actor),
            State::Dca1 => {
                actor.handle(Action::GotoRow(
                    usize::from(byte.saturating_sub(0x20)),
                ));
                self.state = State::Dca2;
            },
            State::Dca2 => {
                actor.handle(Action::GotoColumn(
                    usize::from(byte.saturating_sub(0x20)),
                ));
                self.state = State::Ground;
            },
            State::SetForeground => {
                actor.handle(Action::SetCharacterAttribute(
                    CharacterAttribute::Foreground(Color::Indexed(byte & 0xf)),
                ));
                self.state = State::Ground;
            },
            State::SetBackground => {
                actor.handle(Action::SetCharacterAttribute(
                    CharacterAttribute::Background(Color::Indexed(byte & 0xf)),
                ));
                self.state = State::Ground;
            },
            State::Escape => {
                self.state = State::Ground;
                self.escape(byte, actor);
            },
        }
    }

    fn ground<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        match byte {
            0x1b => self.state = State::Escape,
            0x00..=0x1f | 0x7f => control::perform(byte, actor),
            0x20..=0x7e => actor.handle(Action::Print(byte as char)),
            _ => {
                if actor.utf8_mode() {
                    if let Some(c) = self.utf8.advance(byte) {
                        actor.handle(Action::Print(c));
                    }
                } else {
                    actor.handle(Action::Print(byte as char));
                }
            },
        }
    }

    fn escape<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        match byte {
            // Graph drawing mode of the original hardware.
            b'1' | b'2' => debug!("[ignored vt52 esc] {:?}", byte as char),
            b'<' => {
                actor.handle(Action::SetVt52Graphics(false));
                actor.handle(Action::SetPrivateMode(PrivateMode::Named(
                    NamedPrivateMode::AnsiMode,
                )));
            },
            b'=' => actor.handle(Action::SetKeypadApplicationMode(true)),
            b'>' => actor.handle(Action::SetKeypadApplicationMode(false)),
            b'A' => actor.handle(Action::MoveUp(1)),
            b'B' => actor.handle(Action::Vt52CursorDown),
            b'C' => actor.handle(Action::MoveForward(1)),
            b'D' => actor.handle(Action::MoveBackward(1)),
            b'E' => {
                actor.handle(Action::Goto { row: 0, col: 0 });
                actor.handle(Action::ClearScreen(ClearMode::Below));
            },
            b'F' => actor.handle(Action::SetVt52Graphics(true)),
            b'G' => actor.handle(Action::SetVt52Graphics(false)),
            b'H' => actor.handle(Action::Goto { row: 0, col: 0 }),
            b'I' => actor.handle(Action::ReverseIndex),
            b'J' => actor.handle(Action::ClearScreen(ClearMode::Below)),
            b'K' => actor.handle(Action::ClearLine(LineClearMode::Right)),
            b'L' => actor.handle(Action::InsertLine),
            b'M' => actor.handle(Action::DeleteLine),
            b'P' | b'S' => debug!("[ignored vt52 esc] self-test"),
            b'R' => {
                actor.handle(Action::FullReset);
                actor.handle(Action::UnsetPrivateMode(PrivateMode::Named(
                    NamedPrivateMode::AnsiMode,
                )));
            },
            b'T' | b'p' => actor.handle(Action::SetCharacterAttribute(
                CharacterAttribute::Negative,
            )),
            b'U' | b'q' => actor.handle(Action::SetCharacterAttribute(
                CharacterAttribute::CancelNegative,
            )),
            b'V' => debug!("[ignored vt52 esc] print line"),
            // Printer controller handoff; with no printer attached the
            // enable is dropped and the disable is already satisfied.
            b'W' | b'X' => debug!("[ignored vt52 esc] printer controller"),
            b'Y' => self.state = State::Dca1,
            b'Z' => actor.handle(Action::Vt52Identify),
            b'[' | b'\\' => debug!("[ignored vt52 esc] hold screen"),
            b']' => debug!("[ignored vt52 esc] print screen"),
            b'^' => actor.handle(Action::SetAutoprint(true)),
            b'_' => actor.handle(Action::SetAutoprint(false)),
            b'b' => self.state = State::SetForeground,
            b'c' => self.state = State::SetBackground,
            b'd' => actor.handle(Action::ClearScreen(ClearMode::Above)),
            b'e' => actor.handle(Action::SetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::ShowCursor,
            ))),
            b'f' => actor.handle(Action::UnsetPrivateMode(
                PrivateMode::Named(NamedPrivateMode::ShowCursor),
            )),
            b'j' => actor.handle(Action::SaveCursor),
            b'k' => actor.handle(Action::RestoreCursorPosition),
            b'l' => {
                actor.handle(Action::CarriageReturn);
                actor.handle(Action::ClearLine(LineClearMode::Right));
            },
            b'o' => actor.handle(Action::ClearLine(LineClearMode::Left)),
            b'v' => actor.handle(Action::SetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AutoWrap,
            ))),
            b'w' => actor.handle(Action::UnsetPrivateMode(
                PrivateMode::Named(NamedPrivateMode::AutoWrap),
            )),
            _ => debug!("[unexpected vt52 esc] {:?}", byte as char),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingActor {
        actions: Vec<Action>,
    }

    impl Actor for RecordingActor {
        fn handle(&mut self, action: Action) {
            self.actions.push(action);
        }

        fn ansi_mode(&self) -> bool {
            false
        }
    }

    fn parse(bytes: &[u8]) -> Vec<Action> {
        let mut parser = Vt52Parser::default();
        let mut actor = RecordingActor::default();
        for &byte in bytes {
            parser.advance(byte, &mut actor);
        }
        actor.actions
    }

    #[test]
    fn prints_and_executes_in_ground() {
        assert_eq!(parse(b"A\rB"), vec![
            Action::Print('A'),
            Action::CarriageReturn,
            Action::Print('B'),
        ]);
    }

    #[test]
    fn cursor_moves() {
        assert_eq!(parse(b"\x1bA\x1bB\x1bC\x1bD"), vec![
            Action::MoveUp(1),
            Action::Vt52CursorDown,
            Action::MoveForward(1),
            Action::MoveBackward(1),
        ]);
    }

    #[test]
    fn direct_cursor_address() {
        // Row 5, column 12, each biased by 0x20.
        assert_eq!(parse(b"\x1bY\x25\x2cX"), vec![
            Action::GotoRow(5),
            Action::GotoColumn(12),
            Action::Print('X'),
        ]);
    }

    #[test]
    fn identify_and_ansi_entry() {
        assert_eq!(parse(b"\x1bZ"), vec![Action::Vt52Identify]);
        assert_eq!(parse(b"\x1b<"), vec![
            Action::SetVt52Graphics(false),
            Action::SetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AnsiMode
            )),
        ]);
    }

    #[test]
    fn color_extensions_mask_to_four_bits() {
        assert_eq!(parse(b"\x1bb\x17\x1bc7"), vec![
            Action::SetCharacterAttribute(CharacterAttribute::Foreground(
                Color::Indexed(7)
            )),
            Action::SetCharacterAttribute(CharacterAttribute::Background(
                Color::Indexed(7)
            )),
        ]);
    }

    #[test]
    fn erase_and_home() {
        assert_eq!(parse(b"\x1bE"), vec![
            Action::Goto { row: 0, col: 0 },
            Action::ClearScreen(ClearMode::Below),
        ]);
    }

    #[test]
    fn reset_stays_in_vt52() {
        assert_eq!(parse(b"\x1bR"), vec![
            Action::FullReset,
            Action::UnsetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AnsiMode
            )),
        ]);
    }

    #[test]
    fn save_and_restore_position() {
        assert_eq!(parse(b"\x1bj\x1bk"), vec![
            Action::SaveCursor,
            Action::RestoreCursorPosition,
        ]);
    }

    #[test]
    fn graphics_mode_toggles() {
        assert_eq!(parse(b"\x1bF\x1bG"), vec![
            Action::SetVt52Graphics(true),
            Action::SetVt52Graphics(false),
        ]);
    }
}
