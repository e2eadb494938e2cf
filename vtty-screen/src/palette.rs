//! The 256-slot color palette.

use std::ops::{Index, IndexMut};

use vtty_escape::{Color, Rgb};

/// Number of palette slots: 16 legacy ANSI/aixterm colors, a 6×6×6 color
/// cube, and a 24-step grayscale ramp.
pub const PALETTE_SIZE: usize = 256;

const ANSI: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x80, 0x00, 0x00),
    Rgb::new(0x00, 0x80, 0x00),
    Rgb::new(0x80, 0x80, 0x00),
    Rgb::new(0x00, 0x00, 0x80),
    Rgb::new(0x80, 0x00, 0x80),
    Rgb::new(0x00, 0x80, 0x80),
    Rgb::new(0xc0, 0xc0, 0xc0),
    Rgb::new(0x80, 0x80, 0x80),
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x00, 0xff, 0x00),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0x00, 0x00, 0xff),
    Rgb::new(0xff, 0x00, 0xff),
    Rgb::new(0x00, 0xff, 0xff),
    Rgb::new(0xff, 0xff, 0xff),
];

const CUBE_LEVELS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette([Rgb; PALETTE_SIZE]);

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];

        colors[..16].copy_from_slice(&ANSI);

        for index in 0..216 {
            colors[16 + index] = Rgb::new(
                CUBE_LEVELS[index / 36],
                CUBE_LEVELS[(index / 6) % 6],
                CUBE_LEVELS[index % 6],
            );
        }

        for (step, color) in colors[232..].iter_mut().enumerate() {
            let level = 0x08 + 10 * step as u8;
            *color = Rgb::new(level, level, level);
        }

        Self(colors)
    }
}

impl Palette {
    /// Resolve a cell color to its concrete value.
    #[inline]
    pub fn resolve(&self, color: Color) -> Rgb {
        match color {
            Color::Indexed(index) => self.0[index as usize],
            Color::Rgb(rgb) => rgb,
        }
    }
}

impl Index<u8> for Palette {
    type Output = Rgb;

    #[inline]
    fn index(&self, index: u8) -> &Rgb {
        &self.0[index as usize]
    }
}

impl IndexMut<u8> for Palette {
    #[inline]
    fn index_mut(&mut self, index: u8) -> &mut Rgb {
        &mut self.0[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_colors() {
        let palette = Palette::default();
        assert_eq!(palette[1], Rgb::new(0x80, 0x00, 0x00));
        assert_eq!(palette[7], Rgb::new(0xc0, 0xc0, 0xc0));
        assert_eq!(palette[15], Rgb::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn color_cube() {
        let palette = Palette::default();
        assert_eq!(palette[16], Rgb::new(0x00, 0x00, 0x00));
        assert_eq!(palette[17], Rgb::new(0x00, 0x00, 0x5f));
        assert_eq!(palette[21], Rgb::new(0x00, 0x00, 0xff));
        assert_eq!(palette[196], Rgb::new(0xff, 0x00, 0x00));
        assert_eq!(palette[231], Rgb::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn grayscale_ramp() {
        let palette = Palette::default();
        assert_eq!(palette[232], Rgb::new(0x08, 0x08, 0x08));
        assert_eq!(palette[255], Rgb::new(0xee, 0xee, 0xee));
    }

    #[test]
    fn resolves_truecolor_directly() {
        let palette = Palette::default();
        let rgb = Rgb::new(1, 2, 3);
        assert_eq!(palette.resolve(Color::Rgb(rgb)), rgb);
        assert_eq!(palette.resolve(Color::Indexed(1)), palette[1]);
    }
}
