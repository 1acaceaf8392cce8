//! 24-bit RGB pixel values
//!
//! Every pixel of a program image is reduced to a [`Color`]. Pure white is the
//! only "empty" value; every other colour is data-carrying and binarizes as a
//! filled template cell.

use std::fmt;

/// A 24-bit RGB colour (`0xRRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Mask of the 24 meaningful bits
    pub const MASK: u32 = 0x00FF_FFFF;

    /// Pure white, the only value that binarizes as an empty cell
    pub const WHITE: Color = Color(0x00FF_FFFF);

    /// Pure black, the canonical filled cell and the "no operand" value
    pub const BLACK: Color = Color(0x0000_0000);

    /// Create a colour, discarding bits above 24
    pub const fn new(value: u32) -> Self {
        Color(value & Self::MASK)
    }

    /// Create a colour from its channels
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Color(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Raw `0xRRGGBB` value
    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn is_white(self) -> bool {
        self.0 == Self::WHITE.0
    }

    pub const fn is_black(self) -> bool {
        self.0 == Self::BLACK.0
    }

    /// Sum of the three channels, used as the character code of a colour
    pub const fn channel_sum(self) -> u32 {
        self.red() as u32 + self.green() as u32 + self.blue() as u32
    }

    /// Numeric coercion used by instruction effects
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::new(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.value()
    }
}

impl From<Color> for i64 {
    fn from(color: Color) -> Self {
        color.as_i64()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl fmt::LowerHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_masks_to_24_bits() {
        assert_eq!(Color::new(0xFF12_3456).value(), 0x12_3456);
    }

    #[test]
    fn test_channels() {
        let color = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(color.value(), 0x12_3456);
        assert_eq!(color.red(), 0x12);
        assert_eq!(color.green(), 0x34);
        assert_eq!(color.blue(), 0x56);
        assert_eq!(color.channel_sum(), 0x12 + 0x34 + 0x56);
    }

    #[test]
    fn test_white_and_black() {
        assert!(Color::WHITE.is_white());
        assert!(!Color::WHITE.is_black());
        assert!(Color::BLACK.is_black());
        assert!(!Color::new(0xFF_FFFE).is_white());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::new(0x41).to_string(), "#000041");
        assert_eq!(format!("{:x}", Color::new(0xABC)), "abc");
    }
}
