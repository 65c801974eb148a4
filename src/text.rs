//! Text output
//!
//! Text is written at the display cursor one glyph column at a time through
//! the display's [`PixelSink`], so the same calls fill a framebuffer or
//! display RAM. Rows are pages: a glyph is 8 pixels tall and lands on the
//! cursor's page.
//!
//! Control characters move the cursor instead of drawing:
//!
//! | char | effect |
//! |---|---|
//! | `\x08` | back one cell (stops at column 0), draw the font's space there, stay |
//! | `\t` | next tab stop every `tab_width` cells, stops at the last full cell |
//! | `\n` | down one page unless on the last; column kept, no scrolling |
//! | `\r` | column 0 |
//! | `\x0C` | clear the screen and home the cursor |
//!
//! A printable glyph that does not fit before the right edge is dropped and
//! the cursor stays put. With a framebuffer, cursor moves stay local until
//! the next write to display RAM.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306::{GraphicDisplay, Padding, FONT_6X8};
//! # use core::convert::Infallible;
//! # use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! # use ssd1306::{Builder, Dimensions, Display, I2cInterface};
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let dims = match Dimensions::new(128, 32) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let interface = I2cInterface::new(MockI2c, config.i2c_address());
//! let mut display = GraphicDisplay::immediate(Display::new(interface, config));
//!
//! let _ = display.put_str("Hello\r\n\tworld", &FONT_6X8);
//! let _ = display.put_number(42, Padding::Zeros, &FONT_6X8); // "00042"
//! ```

use crate::error::Error;
use crate::font::Font;
use crate::graphics::GraphicDisplay;
use crate::interface::DisplayInterface;
use crate::sink::PixelSink;

type TextResult<I> = core::result::Result<(), Error<I>>;

/// Digits in a [`put_number`](GraphicDisplay::put_number) field
const NUMBER_DIGITS: usize = 5;

/// Leading fill of a number field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Padding {
    /// `00042`
    #[default]
    Zeros,
    /// `   42`
    Spaces,
}

/// Render `value` as a fixed five-character field
fn format_number(value: u16, padding: Padding) -> [u8; NUMBER_DIGITS] {
    let mut field = [b'0'; NUMBER_DIGITS];
    let mut rest = value;
    for slot in field.iter_mut().rev() {
        *slot = b'0' + (rest % 10) as u8;
        rest /= 10;
    }
    if padding == Padding::Spaces {
        for slot in field.iter_mut().take(NUMBER_DIGITS - 1) {
            if *slot != b'0' {
                break;
            }
            *slot = b' ';
        }
    }
    field
}

impl<I, S> GraphicDisplay<I, S>
where
    I: DisplayInterface,
    S: PixelSink,
{
    /// Write one raw column byte at the cursor
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn put_byte(&mut self, column: u8) -> TextResult<I> {
        let (display, sink) = self.parts_mut();
        sink.put_column(display, column)
    }

    /// Write raw column bytes at the cursor
    ///
    /// Bytes past the right edge are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn put_bytes(&mut self, columns: &[u8]) -> TextResult<I> {
        let (display, sink) = self.parts_mut();
        for &column in columns {
            sink.put_column(display, column)?;
        }
        Ok(())
    }

    fn move_cursor(&mut self, x: u8, page: u8) -> TextResult<I> {
        let (display, sink) = self.parts_mut();
        sink.move_cursor(display, x, page)?;
        Ok(())
    }

    /// Write one character in `font`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn put_char(&mut self, c: char, font: &Font<'_>) -> TextResult<I> {
        let cursor = self.display().cursor();
        let dims = *self.display().dimensions();
        let glyph_width = font.glyph_width();

        match c {
            '\x08' => {
                let column = cursor.column.saturating_sub(glyph_width);
                self.move_cursor(column, cursor.page)?;
                self.put_bytes(font.glyph(' '))?;
                self.move_cursor(column, cursor.page)?;
            }
            '\t' => {
                let cell = u16::from(glyph_width);
                let stop = u16::from(self.display().config().tab_width.max(1)) * cell;
                let last_cell = u16::from(dims.width) / cell * cell;
                let next = (u16::from(cursor.column) / stop + 1) * stop;
                let column = u8::try_from(next.min(last_cell)).unwrap_or(dims.width);
                self.move_cursor(column, cursor.page)?;
            }
            '\n' => {
                if cursor.page + 1 < dims.pages() {
                    self.move_cursor(cursor.column, cursor.page + 1)?;
                }
            }
            '\r' => {
                self.move_cursor(0, cursor.page)?;
            }
            '\x0C' => self.clear_screen()?,
            _ => {
                if u16::from(cursor.column) + u16::from(glyph_width) > u16::from(dims.width) {
                    log::trace!("glyph {c:?} does not fit at column {}", cursor.column);
                    return Ok(());
                }
                self.put_bytes(font.glyph(c))?;
            }
        }
        Ok(())
    }

    /// Write a string in `font`, control characters included
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn put_str(&mut self, text: &str, font: &Font<'_>) -> TextResult<I> {
        for c in text.chars() {
            self.put_char(c, font)?;
        }
        Ok(())
    }

    /// Write `value` as a five-character field, left-padded per `padding`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn put_number(&mut self, value: u16, padding: Padding, font: &Font<'_>) -> TextResult<I> {
        for digit in format_number(value, padding) {
            self.put_char(char::from(digit), font)?;
        }
        Ok(())
    }
}
