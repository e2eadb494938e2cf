use crate::actor::{Action, Actor};
use crate::mode::{
    ClearMode, LineClearMode, Mode, PrivateMode, TabClearMode,
};
use crate::sgr;
use log::debug;

/// Dispatch a completed control sequence. Parameters arrive with their
/// defaults already normalized to zero; each function applies its own
/// default on top of that.
pub(crate) fn perform<A: Actor>(
    actor: &mut A,
    params: &[u16],
    intermediates: &[u8],
    byte: u8,
) {
    match intermediates.first() {
        None => {},
        Some(b'?') => return perform_private(actor, params, byte),
        Some(0xff) => {
            debug!("too many intermediates in control sequence");
            return;
        },
        Some(_) => return unexpected(params, intermediates, byte),
    }

    let arg = |index: usize| params.get(index).copied().unwrap_or(0);
    let count = |index: usize| arg(index).max(1) as usize;

    match byte {
        b'A' => actor.handle(Action::MoveUp(count(0))),
        b'B' => actor.handle(Action::MoveDown(count(0))),
        b'C' => actor.handle(Action::MoveForward(count(0))),
        b'D' => actor.handle(Action::MoveBackward(count(0))),
        b'H' | b'f' => actor.handle(Action::Goto {
            row: arg(0).saturating_sub(1) as usize,
            col: arg(1).saturating_sub(1) as usize,
        }),
        b'J' => {
            let mode = match arg(0) {
                0 => ClearMode::Below,
                1 => ClearMode::Above,
                2 => ClearMode::All,
                _ => return unexpected(params, intermediates, byte),
            };

            actor.handle(Action::ClearScreen(mode));
        },
        b'K' => {
            let mode = match arg(0) {
                0 => LineClearMode::Right,
                1 => LineClearMode::Left,
                2 => LineClearMode::All,
                _ => return unexpected(params, intermediates, byte),
            };

            actor.handle(Action::ClearLine(mode));
        },
        b'P' => actor.handle(Action::DeleteChars(count(0))),
        b'c' => {
            if arg(0) == 0 {
                actor.handle(Action::IdentifyTerminal);
            }
        },
        b'g' => {
            let mode = match arg(0) {
                0 => TabClearMode::Current,
                3 => TabClearMode::All,
                _ => return unexpected(params, intermediates, byte),
            };

            actor.handle(Action::ClearTabs(mode));
        },
        b'h' => {
            for &param in params {
                actor.handle(Action::SetMode(Mode::from_raw(param)));
            }
        },
        b'l' => {
            for &param in params {
                actor.handle(Action::UnsetMode(Mode::from_raw(param)));
            }
        },
        b'm' => sgr::perform(actor, params),
        b'n' => actor.handle(Action::ReportDeviceStatus(arg(0))),
        b'q' => {
            for &param in params {
                actor.handle(Action::LoadLeds(param));
            }
        },
        b'r' => actor.handle(Action::SetScrollingRegion {
            top: arg(0),
            bottom: arg(1),
        }),
        _ => unexpected(params, intermediates, byte),
    }
}

fn perform_private<A: Actor>(actor: &mut A, params: &[u16], byte: u8) {
    match byte {
        b'h' => {
            for &param in params {
                actor
                    .handle(Action::SetPrivateMode(PrivateMode::from_raw(param)));
            }
        },
        b'l' => {
            for &param in params {
                actor.handle(Action::UnsetPrivateMode(PrivateMode::from_raw(
                    param,
                )));
            }
        },
        _ => unexpected(params, &[b'?'], byte),
    }
}

fn unexpected(params: &[u16], intermediates: &[u8], byte: u8) {
    debug!(
        "[unexpected csi] final: {:?}, params: {params:?}, \
         intermediates: {intermediates:?}",
        byte as char
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{NamedMode, NamedPrivateMode};
    use crate::parser::Parser;
    use crate::{CharacterAttribute, Color, Rgb};

    #[derive(Default)]
    struct RecordingActor {
        actions: Vec<Action>,
    }

    impl Actor for RecordingActor {
        fn handle(&mut self, action: Action) {
            self.actions.push(action);
        }
    }

    fn parse(bytes: &[u8]) -> Vec<Action> {
        let mut parser = Parser::new();
        let mut actor = RecordingActor::default();
        parser.advance(bytes, &mut actor);
        actor.actions
    }

    #[test]
    fn cursor_moves_default_to_one() {
        assert_eq!(parse(b"\x1b[A"), vec![Action::MoveUp(1)]);
        assert_eq!(parse(b"\x1b[0B"), vec![Action::MoveDown(1)]);
        assert_eq!(parse(b"\x1b[7C"), vec![Action::MoveForward(7)]);
        assert_eq!(parse(b"\x1b[2D"), vec![Action::MoveBackward(2)]);
    }

    #[test]
    fn cursor_position_is_zero_based() {
        assert_eq!(parse(b"\x1b[H"), vec![Action::Goto { row: 0, col: 0 }]);
        assert_eq!(parse(b"\x1b[5;10H"), vec![Action::Goto {
            row: 4,
            col: 9
        }]);
        assert_eq!(parse(b"\x1b[5;10f"), vec![Action::Goto {
            row: 4,
            col: 9
        }]);
    }

    #[test]
    fn erase_modes() {
        assert_eq!(parse(b"\x1b[J"), vec![Action::ClearScreen(
            ClearMode::Below
        )]);
        assert_eq!(parse(b"\x1b[1J"), vec![Action::ClearScreen(
            ClearMode::Above
        )]);
        assert_eq!(parse(b"\x1b[2J"), vec![Action::ClearScreen(
            ClearMode::All
        )]);
        assert_eq!(parse(b"\x1b[5J"), vec![]);
        assert_eq!(parse(b"\x1b[K"), vec![Action::ClearLine(
            LineClearMode::Right
        )]);
        assert_eq!(parse(b"\x1b[2K"), vec![Action::ClearLine(
            LineClearMode::All
        )]);
    }

    #[test]
    fn delete_characters() {
        assert_eq!(parse(b"\x1b[P"), vec![Action::DeleteChars(1)]);
        assert_eq!(parse(b"\x1b[4P"), vec![Action::DeleteChars(4)]);
    }

    #[test]
    fn device_attributes_and_status() {
        assert_eq!(parse(b"\x1b[c"), vec![Action::IdentifyTerminal]);
        assert_eq!(parse(b"\x1b[1c"), vec![]);
        assert_eq!(parse(b"\x1b[5n"), vec![Action::ReportDeviceStatus(5)]);
        assert_eq!(parse(b"\x1b[6n"), vec![Action::ReportDeviceStatus(6)]);
    }

    #[test]
    fn tab_clearing() {
        assert_eq!(parse(b"\x1b[g"), vec![Action::ClearTabs(
            TabClearMode::Current
        )]);
        assert_eq!(parse(b"\x1b[3g"), vec![Action::ClearTabs(
            TabClearMode::All
        )]);
        assert_eq!(parse(b"\x1b[1g"), vec![]);
    }

    #[test]
    fn ansi_modes() {
        assert_eq!(parse(b"\x1b[20h"), vec![Action::SetMode(Mode::Named(
            NamedMode::LineFeedNewLine
        ))]);
        assert_eq!(parse(b"\x1b[20l"), vec![Action::UnsetMode(Mode::Named(
            NamedMode::LineFeedNewLine
        ))]);
        assert_eq!(parse(b"\x1b[4h"), vec![Action::SetMode(Mode::Unknown(
            4
        ))]);
    }

    #[test]
    fn private_modes() {
        assert_eq!(parse(b"\x1b[?6h"), vec![Action::SetPrivateMode(
            PrivateMode::Named(NamedPrivateMode::Origin)
        )]);
        assert_eq!(parse(b"\x1b[?1;7l"), vec![
            Action::UnsetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::CursorKeys
            )),
            Action::UnsetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AutoWrap
            )),
        ]);
    }

    #[test]
    fn scrolling_region_keeps_raw_parameters() {
        assert_eq!(parse(b"\x1b[2;5r"), vec![Action::SetScrollingRegion {
            top: 2,
            bottom: 5
        }]);
        assert_eq!(parse(b"\x1b[r"), vec![Action::SetScrollingRegion {
            top: 0,
            bottom: 0
        }]);
    }

    #[test]
    fn sgr_truecolor() {
        assert_eq!(parse(b"\x1b[38;2;10;20;30m"), vec![
            Action::SetCharacterAttribute(CharacterAttribute::Foreground(
                Color::Rgb(Rgb::new(10, 20, 30))
            ))
        ]);
    }

    #[test]
    fn unknown_intermediate_drops_sequence() {
        assert_eq!(parse(b"\x1b[1 q"), vec![]);
    }

    #[test]
    fn controls_execute_inside_sequences() {
        assert_eq!(parse(b"\x1b[2\x08C"), vec![
            Action::Backspace,
            Action::MoveForward(2),
        ]);
    }
}
