use std::fmt::{self, Display, Formatter};
use std::str::{self, FromStr};

/// A cell color: either a palette slot or a direct truecolor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Indexed(u8),
    Rgb(Rgb),
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        let chars = if s.starts_with("0x") && s.len() == 8 {
            &s[2..]
        } else if s.starts_with('#') && s.len() == 7 {
            &s[1..]
        } else {
            return Err(());
        };

        let r = u8::from_str_radix(&chars[0..=1], 16).map_err(|_| ())?;
        let g = u8::from_str_radix(&chars[2..=3], 16).map_err(|_| ())?;
        let b = u8::from_str_radix(&chars[4..=5], 16).map_err(|_| ())?;

        Ok(Self { r, g, b })
    }
}

/// Parse a color specification in the forms accepted by the palette OSC:
/// `#R…`/`#RR…`/`#RRR…`/`#RRRR…` (per component), `rgb:R/G/B` with 1–4
/// hex digits per component, and `rgbi:R/G/B` with floating point
/// components in `[0, 1]`.
///
/// Components wider than 8 bits are carried to 8 bits by truncation: the
/// high byte of the component survives.
pub(crate) fn xparse_color(color: &[u8]) -> Option<Rgb> {
    if let Some(rest) = color.strip_prefix(b"#") {
        parse_sharp_color(rest)
    } else if let Some(rest) = color.strip_prefix(b"rgbi:") {
        parse_intensity_color(rest)
    } else if let Some(rest) = color.strip_prefix(b"rgb:") {
        parse_rgb_color(rest)
    } else {
        None
    }
}

/// Truncate a 1–4 hex digit component to its top 8 bits.
fn scale_hex(hex: &str) -> Option<u8> {
    if hex.is_empty() || hex.len() > 4 {
        return None;
    }

    let value = u32::from_str_radix(hex, 16).ok()?;
    let wide = value << (4 * (4 - hex.len() as u32));
    Some((wide >> 8) as u8)
}

/// `#R(RRR)G(GGG)B(BBB)` with three equally sized components.
fn parse_sharp_color(color: &[u8]) -> Option<Rgb> {
    let len = color.len() / 3;
    if len == 0 || len > 4 || len * 3 != color.len() {
        return None;
    }

    let s = str::from_utf8(color).ok()?;
    let (r, rest) = s.split_at(len);
    let (g, b) = rest.split_at(len);

    Some(Rgb {
        r: scale_hex(r)?,
        g: scale_hex(g)?,
        b: scale_hex(b)?,
    })
}

/// `rgb:R(RRR)/G(GGG)/B(BBB)`.
fn parse_rgb_color(input: &[u8]) -> Option<Rgb> {
    let s = str::from_utf8(input).ok()?;
    let mut parts = s.split('/');

    let r = scale_hex(parts.next()?)?;
    let g = scale_hex(parts.next()?)?;
    let b = scale_hex(parts.next()?)?;

    if parts.next().is_some() {
        return None;
    }

    Some(Rgb { r, g, b })
}

/// `rgbi:R/G/B` with floating point components in `[0, 1]`, scaled by
/// 255.
fn parse_intensity_color(input: &[u8]) -> Option<Rgb> {
    let s = str::from_utf8(input).ok()?;
    let mut parts = s.split('/');

    let mut scale = || -> Option<u8> {
        let value: f64 = parts.next()?.parse().ok()?;
        if !(0.0..=1.0).contains(&value) {
            return None;
        }
        Some((value * 255.0).round() as u8)
    };

    let r = scale()?;
    let g = scale()?;
    let b = scale()?;

    Some(Rgb { r, g, b })
}
