//! Pixel color for monochrome OLED panels
//!
//! Each pixel is one bit of display RAM:
//!
//! | Color | RAM bit | Normal display | Inverse display |
//! |-------|---------|----------------|-----------------|
//! | White | 1       | lit            | dark            |
//! | Black | 0       | dark           | lit             |
//!
//! ## Example
//!
//! ```
//! use ssd1306::Color;
//!
//! assert_eq!(Color::White.inverse(), Color::Black);
//! assert!(Color::White.is_on());
//! ```

/// Colors supported by SSD1306
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off (RAM bit 0)
    #[default]
    Black,
    /// Pixel on (RAM bit 1)
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::White,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::Black,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Self::On,
            Color::Black => Self::Off,
        }
    }
}

impl Color {
    /// The other color
    ///
    /// Bitmap blits draw clear source bits in the inverse color.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Whether this color sets the RAM bit
    pub fn is_on(self) -> bool {
        self == Self::White
    }

    /// Get a byte with every pixel of a page column in this color
    ///
    /// ```
    /// use ssd1306::Color;
    ///
    /// assert_eq!(Color::Black.fill_byte(), 0x00);
    /// assert_eq!(Color::White.fill_byte(), 0xFF);
    /// ```
    pub fn fill_byte(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White => 0xFF,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on { Self::White } else { Self::Black }
    }
}
