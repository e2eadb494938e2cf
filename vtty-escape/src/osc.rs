use crate::actor::{Action, Actor};
use crate::color::xparse_color;
use log::debug;

/// The operating system commands this terminal acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OperatingSystemCommand {
    /// `0;t` — window title and icon name together.
    SetTitleAndIconName,
    /// `1;t` or `2L;t` — icon name.
    SetIconName,
    /// `2;t` or `21;t` — window title.
    SetWindowTitle,
    /// `4;index;spec…` — palette entries.
    SetPaletteColor,
    Unhandled,
}

impl From<&[u8]> for OperatingSystemCommand {
    fn from(command: &[u8]) -> Self {
        match command {
            b"0" => Self::SetTitleAndIconName,
            b"1" | b"2L" => Self::SetIconName,
            b"2" | b"21" => Self::SetWindowTitle,
            b"4" => Self::SetPaletteColor,
            _ => Self::Unhandled,
        }
    }
}

/// Dispatch a finished operating system command string. The payload is
/// the raw accumulated buffer; the first `;` separates the command from
/// its data. Commands without a separator carry no data and are dropped.
pub(crate) fn perform<A: Actor>(actor: &mut A, payload: &[u8]) {
    let Some(split) = payload.iter().position(|&b| b == b';') else {
        debug!("[unhandled osc] {:?}", String::from_utf8_lossy(payload));
        return;
    };

    let (command, data) = (&payload[..split], &payload[split + 1..]);

    match OperatingSystemCommand::from(command) {
        OperatingSystemCommand::SetTitleAndIconName => {
            let text = text_of(data);
            actor.handle(Action::SetWindowTitle(text.clone()));
            actor.handle(Action::SetIconName(text));
        },
        OperatingSystemCommand::SetIconName => {
            actor.handle(Action::SetIconName(text_of(data)));
        },
        OperatingSystemCommand::SetWindowTitle => {
            actor.handle(Action::SetWindowTitle(text_of(data)));
        },
        OperatingSystemCommand::SetPaletteColor => change_colors(actor, data),
        OperatingSystemCommand::Unhandled => {
            debug!(
                "[unhandled osc] {:?}",
                String::from_utf8_lossy(payload)
            );
        },
    }
}

fn text_of(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Apply `index;spec` pairs from a palette command. Named colors need a
/// window-system lookup and are dropped here.
fn change_colors<A: Actor>(actor: &mut A, data: &[u8]) {
    let mut fields = data.split(|&b| b == b';');

    while let (Some(index), Some(spec)) = (fields.next(), fields.next()) {
        let Some(index) = parse_index(index) else {
            debug!(
                "palette index out of range: {:?}",
                String::from_utf8_lossy(index)
            );
            continue;
        };

        match xparse_color(spec) {
            Some(color) => {
                actor.handle(Action::SetPaletteColor { index, color })
            },
            None => debug!(
                "unparseable color spec: {:?}",
                String::from_utf8_lossy(spec)
            ),
        }
    }
}

fn parse_index(field: &[u8]) -> Option<u8> {
    if field.is_empty() {
        return None;
    }

    field.iter().try_fold(0u8, |acc, &b| {
        let digit = (b as char).to_digit(10)? as u8;
        acc.checked_mul(10)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::parser::Parser;

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
    fn title_and_icon_name() {
        assert_eq!(parse(b"\x1b]0;hello\x07"), vec![
            Action::SetWindowTitle("hello".into()),
            Action::SetIconName("hello".into()),
        ]);
        assert_eq!(parse(b"\x1b]2;title\x07"), vec![Action::SetWindowTitle(
            "title".into()
        )]);
        assert_eq!(parse(b"\x1b]21;title\x07"), vec![Action::SetWindowTitle(
            "title".into()
        )]);
        assert_eq!(parse(b"\x1b]1;icon\x07"), vec![Action::SetIconName(
            "icon".into()
        )]);
        assert_eq!(parse(b"\x1b]2L;icon\x07"), vec![Action::SetIconName(
            "icon".into()
        )]);
    }

    #[test]
    fn palette_single_entry() {
        assert_eq!(parse(b"\x1b]4;1;#11aaff\x07"), vec![
            Action::SetPaletteColor {
                index: 1,
                color: Rgb::new(0x11, 0xaa, 0xff)
            }
        ]);
    }

    #[test]
    fn palette_multiple_entries() {
        assert_eq!(parse(b"\x1b]4;1;#fff;2;rgb:10/20/30\x07"), vec![
            Action::SetPaletteColor {
                index: 1,
                color: Rgb::new(0xf0, 0xf0, 0xf0)
            },
            Action::SetPaletteColor {
                index: 2,
                color: Rgb::new(0x10, 0x20, 0x30)
            },
        ]);
    }

    #[test]
    fn palette_bad_entries_are_skipped() {
        assert_eq!(parse(b"\x1b]4;300;#fff;1;teal;2;#000\x07"), vec![
            Action::SetPaletteColor {
                index: 2,
                color: Rgb::new(0, 0, 0)
            }
        ]);
    }

    #[test]
    fn unknown_verbs_are_dropped() {
        assert_eq!(parse(b"\x1b]52;c;copy\x07"), vec![]);
        assert_eq!(parse(b"\x1b]0\x07"), vec![]);
    }
}
