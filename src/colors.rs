use rand::distributions::Standard;
use rand::prelude::Distribution;
use rand::Rng;

// type alias for framebuffer colors (rgba)
pub type Color = [u8; 4];

// consts for the ui palette
pub(crate) const WHITE: Color = [0xff, 0xff, 0xff, 0xff]; // FFFFFF
pub(crate) const DARK_GREEN: Color = [0x20, 0x2a, 0x25, 0xff]; // 202A25
pub(crate) const GRAY: Color = [0xeb, 0xe9, 0xe9, 0xff]; // EBE9E9
pub(crate) const GREEN: Color = [0x00, 0xa8, 0x78, 0xff]; // 00A878
pub(crate) const YELLOW: Color = [0xf8, 0xf3, 0x2b, 0xff]; // F8F32B
pub(crate) const SLATE: Color = [0x3a, 0x45, 0x40, 0xff]; // 3A4540
pub(crate) const FLAME: Color = [0xcf, 0x5c, 0x36, 0xff]; // CF5C36

pub(crate) const BACKGROUND: Color = DARK_GREEN;
pub(crate) const PANEL: Color = SLATE;
pub(crate) const HIGHLIGHT: Color = WHITE;

/// A game color as an hsl triple. Hue is in degrees; saturation and
/// lightness are percentages. Guesses compare these by value, so the type
/// is `Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

// random game colors stay in the vivid band: any hue, saturation 70-99,
// lightness 35-64
impl Distribution<Hsl> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Hsl {
        Hsl {
            hue: rng.gen_range(0..360),
            saturation: rng.gen_range(70..100),
            lightness: rng.gen_range(35..65),
        }
    }
}

impl Hsl {
    /// Convert to an rgba pixel for the framebuffer.
    pub fn to_rgba(self) -> Color {
        let h = self.hue as f32;
        let s = self.saturation as f32 / 100.0;
        let l = self.lightness as f32 / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match self.hue {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [
            ((r + m) * 255.0) as u8,
            ((g + m) * 255.0) as u8,
            ((b + m) * 255.0) as u8,
            0xff,
        ]
    }
}
