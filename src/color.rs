//! Packed ARGB colors and the 16-color EGA palette

use serde::{Deserialize, Serialize};

/// 0xAARRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 170);
    pub const GREEN: Color = Color::rgb(0, 170, 0);
    pub const CYAN: Color = Color::rgb(0, 170, 170);
    pub const RED: Color = Color::rgb(170, 0, 0);
    pub const MAGENTA: Color = Color::rgb(170, 0, 170);
    pub const BROWN: Color = Color::rgb(170, 85, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(170, 170, 170);
    pub const DARK_GRAY: Color = Color::rgb(85, 85, 85);
    pub const LIGHT_BLUE: Color = Color::rgb(85, 85, 170);
    pub const LIGHT_GREEN: Color = Color::rgb(85, 255, 85);
    pub const LIGHT_CYAN: Color = Color::rgb(85, 255, 255);
    pub const LIGHT_RED: Color = Color::rgb(255, 85, 85);
    pub const LIGHT_MAGENTA: Color = Color::rgb(255, 85, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 85);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.0, 0xFF12_3456);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x12, 0x34, 0x56, 0xFF));
        assert_eq!(Color::WHITE.0, 0xFFFF_FFFF);
    }
}
