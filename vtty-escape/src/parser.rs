use crate::actor::{Action, Actor};
use crate::vt52::Vt52Parser;
use crate::{control, csi, esc, osc};
use log::debug;
use vtty_vte::{Actor as VtActor, Parser as VtParser};

struct Performer<'a, A: Actor> {
    actor: &'a mut A,
}

impl<'a, A: Actor> VtActor for Performer<'a, A> {
    fn print(&mut self, c: char) {
        self.actor.handle(Action::Print(c));
    }

    fn execute(&mut self, byte: u8) {
        control::perform(byte, self.actor);
    }

    fn hook(&mut self, params: &[u16], intermediates: &[u8], byte: u8) {
        debug!(
            "[unexpected hook] params: {params:?}, \
             intermediates: {intermediates:?}, final: {byte:?}"
        );
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, payload: &[u8]) {
        osc::perform(self.actor, payload);
    }

    fn csi_dispatch(&mut self, params: &[u16], intermediates: &[u8], byte: u8) {
        csi::perform(self.actor, params, intermediates, byte);
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], byte: u8) {
        esc::perform(self.actor, intermediates, byte);
    }

    fn utf8_mode(&self) -> bool {
        self.actor.utf8_mode()
    }
}

/// Escape sequence parser that forwards semantic [`Action`]s to an
/// [`Actor`].
///
/// Owns both automata: the full ANSI state machine and the VT52 one.
/// Which of the two sees a byte depends on the actor's DECANM mode, so
/// routing is decided per byte — a mode switch inside a chunk must take
/// effect for the very next byte.
#[derive(Default)]
pub struct Parser {
    vt: VtParser,
    vt52: Vt52Parser,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the parser with a new chunk of bytes.
    pub fn advance<A: Actor>(&mut self, bytes: &[u8], actor: &mut A) {
        for byte in bytes {
            if actor.ansi_mode() {
                let mut performer = Performer { actor };
                self.vt.advance(std::slice::from_ref(byte), &mut performer);
            } else {
                self.vt52.advance(*byte, actor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{NamedPrivateMode, PrivateMode};

    /// Actor that tracks ANSI mode the way a real terminal would, so the
    /// router can be exercised across a mode switch.
    struct SwitchingActor {
        actions: Vec<Action>,
        ansi: bool,
    }

    impl Default for SwitchingActor {
        fn default() -> Self {
            Self {
                actions: Vec::new(),
                ansi: true,
            }
        }
    }

    impl Actor for SwitchingActor {
        fn handle(&mut self, action: Action) {
            let ansi_mode =
                PrivateMode::Named(NamedPrivateMode::AnsiMode);

            match &action {
                Action::SetPrivateMode(mode) if *mode == ansi_mode => {
                    self.ansi = true;
                },
                Action::UnsetPrivateMode(mode) if *mode == ansi_mode => {
                    self.ansi = false;
                },
                _ => {},
            }

            self.actions.push(action);
        }

        fn ansi_mode(&self) -> bool {
            self.ansi
        }
    }

    #[test]
    fn routes_to_vt52_after_decanm_reset() {
        let mut parser = Parser::new();
        let mut actor = SwitchingActor::default();

        // Leave ANSI mode, then issue a VT52 identify.
        parser.advance(b"\x1b[?2l\x1bZ", &mut actor);

        assert_eq!(actor.actions, vec![
            Action::UnsetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AnsiMode
            )),
            Action::Vt52Identify,
        ]);
    }

    #[test]
    fn returns_to_ansi_after_vt52_entry_escape() {
        let mut parser = Parser::new();
        let mut actor = SwitchingActor::default();

        parser.advance(b"\x1b[?2l\x1b<\x1b[2C", &mut actor);

        assert_eq!(actor.actions, vec![
            Action::UnsetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AnsiMode
            )),
            Action::SetVt52Graphics(false),
            Action::SetPrivateMode(PrivateMode::Named(
                NamedPrivateMode::AnsiMode
            )),
            Action::MoveForward(2),
        ]);
    }

    #[test]
    fn plain_text_prints_in_both_modes() {
        let mut parser = Parser::new();
        let mut actor = SwitchingActor::default();

        parser.advance(b"a\x1b[?2lb\x1b<c", &mut actor);

        let prints: Vec<_> = actor
            .actions
            .iter()
            .filter_map(|action| match action {
                Action::Print(c) => Some(*c),
                _ => None,
            })
            .collect();

        assert_eq!(prints, vec!['a', 'b', 'c']);
    }
}
