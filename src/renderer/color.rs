//! Fill colors as the canvas understands them

use std::fmt;

use serde::{Deserialize, Serialize};

/// A CSS fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Rgb(u8, u8, u8),
    /// Hue in degrees, saturation and lightness in percent
    Hsl { h: u16, s: u8, l: u8 },
}

impl Color {
    pub const fn hsl(h: u16, s: u8, l: u8) -> Self {
        Color::Hsl { h, s, l }
    }

    /// CSS string accepted by `fillStyle`
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Hsl { h, s, l } => write!(f, "hsl({}, {}%, {}%)", h, s, l),
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::Rgb(0, 0, 0);
    /// Player, its bullets, the HUD and the floor
    pub const PLAYER: Color = Color::Rgb(0xff, 0xd7, 0x00);
    pub const LEVEL_BANNER: Color = Color::Rgb(0x66, 0x66, 0x66);
}
