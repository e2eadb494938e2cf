use crate::actor::{Action, Actor};
use crate::color::{Color, Rgb};

/// One decoded select-graphic-rendition attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterAttribute {
    /// Restore the default attributes and reveal concealed text.
    Reset,
    Bold,
    Faint,
    NormalIntensity,
    Italic,
    /// Also cancels fraktur.
    CancelItalic,
    Underline,
    DoubleUnderline,
    CancelUnderline,
    BlinkSlow,
    BlinkFast,
    CancelBlink,
    Negative,
    CancelNegative,
    Conceal,
    Reveal,
    CrossedOut,
    CancelCrossedOut,
    /// Select an alternate font slot 0..=9.
    Font(u8),
    Fraktur,
    Framed,
    Encircled,
    CancelFrame,
    Overline,
    CancelOverline,
    Foreground(Color),
    Background(Color),
    DefaultForeground,
    DefaultBackground,
}

/// Walk the SGR parameter list, emitting one attribute per recognized
/// code. The 38/48 extended color forms consume their sub-parameters in
/// place; a list that ends mid-consumption terminates processing without
/// further effect. Unknown codes are skipped.
pub(crate) fn perform<A: Actor>(actor: &mut A, params: &[u16]) {
    use CharacterAttribute::*;

    let mut i = 0;
    while i < params.len() {
        let attr = match params[i] {
            0 => Some(Reset),
            1 => Some(Bold),
            2 => Some(Faint),
            3 => Some(Italic),
            4 => Some(Underline),
            5 => Some(BlinkSlow),
            6 => Some(BlinkFast),
            7 => Some(Negative),
            8 => Some(Conceal),
            9 => Some(CrossedOut),
            font @ 10..=19 => Some(Font((font - 10) as u8)),
            20 => Some(Fraktur),
            21 => Some(DoubleUnderline),
            22 => Some(NormalIntensity),
            23 => Some(CancelItalic),
            24 => Some(CancelUnderline),
            25 => Some(CancelBlink),
            27 => Some(CancelNegative),
            28 => Some(Reveal),
            29 => Some(CancelCrossedOut),
            index @ 30..=37 => {
                Some(Foreground(Color::Indexed((index - 30) as u8)))
            },
            38 => match parse_extended_color(params, &mut i) {
                Some(color) => Some(Foreground(color)),
                None => return,
            },
            39 => Some(DefaultForeground),
            index @ 40..=47 => {
                Some(Background(Color::Indexed((index - 40) as u8)))
            },
            48 => match parse_extended_color(params, &mut i) {
                Some(color) => Some(Background(color)),
                None => return,
            },
            49 => Some(DefaultBackground),
            51 => Some(Framed),
            52 => Some(Encircled),
            53 => Some(Overline),
            54 => Some(CancelFrame),
            55 => Some(CancelOverline),
            index @ 90..=97 => {
                Some(Foreground(Color::Indexed((index - 90 + 8) as u8)))
            },
            index @ 100..=107 => {
                Some(Background(Color::Indexed((index - 100 + 8) as u8)))
            },
            _ => None,
        };

        if let Some(attr) = attr {
            actor.handle(Action::SetCharacterAttribute(attr));
        }

        i += 1;
    }
}

/// Consume the sub-parameters of a 38/48 code: `5;index` or `2;r;g;b`.
/// `i` points at the 38/48 slot on entry and at the last consumed slot on
/// success.
fn parse_extended_color(params: &[u16], i: &mut usize) -> Option<Color> {
    let clamp = |value: u16| value.min(u8::MAX as u16) as u8;

    match params.get(*i + 1)? {
        5 => {
            let index = params.get(*i + 2)?;
            *i += 2;
            Some(Color::Indexed(clamp(*index)))
        },
        2 => {
            let r = *params.get(*i + 2)?;
            let g = *params.get(*i + 3)?;
            let b = *params.get(*i + 4)?;
            *i += 4;
            Some(Color::Rgb(Rgb::new(clamp(r), clamp(g), clamp(b))))
        },
        _ => None,
    }
}
