//! Pixel sinks
//!
//! A [`PixelSink`] decides where the pixels of drawing primitives and glyph
//! columns of text end up:
//!
//! - [`Framebuffer`]: a local page-organized bitmap, sent to the panel by
//!   [`GraphicDisplay::update`](crate::graphics::GraphicDisplay::update)
//! - [`Immediate`]: no local memory; every pixel is a page seek plus one data
//!   byte on the bus
//!
//! ## Memory Layout
//!
//! The framebuffer mirrors display RAM: `pages * width` bytes, page-major.
//! Pixel (x, y) is bit `y % 8` of byte `(y / 8) * width + x`, LSB at the top
//! of the page.
//!
//! Immediate mode cannot read display RAM back, so a pixel write replaces the
//! whole column byte it lands in: drawing white clears the other seven pixels
//! of that page column, drawing black sets them.

use crate::color::Color;
use crate::config::{Dimensions, DrawMode, PAGE_HEIGHT};
use crate::display::Display;
use crate::error::{Error, MAX_WIDTH};
use crate::interface::DisplayInterface;

/// Destination of pixels and glyph columns
///
/// Coordinates handed to a sink are always on the panel; bounds are checked
/// by the caller.
pub trait PixelSink {
    /// Mode this sink implements
    const MODE: DrawMode;

    /// Set or clear the pixel at (`x`, `y`)
    fn set_pixel<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        x: u8,
        y: u8,
        color: Color,
    ) -> Result<(), Error<I>>;

    /// Write one column byte at the display cursor and advance it
    ///
    /// Nothing is written when the cursor is already past the last column.
    fn put_column<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        column: u8,
    ) -> Result<(), Error<I>>;

    /// Move the display cursor to column `x` of `page`
    ///
    /// Returns `false` for an off-panel position, leaving the cursor alone.
    fn move_cursor<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        x: u8,
        page: u8,
    ) -> Result<bool, Error<I>>;

    /// Paint every pixel of the panel `color`
    fn fill<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        color: Color,
    ) -> Result<(), Error<I>>;

    /// Zero local pixel state
    fn clear(&mut self);
}

/// Local page-organized bitmap
pub struct Framebuffer<B> {
    buffer: B,
    dimensions: Dimensions,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap a buffer of at least `dimensions.buffer_size()` bytes
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` when the buffer is undersized. The
    /// interface type only names the error; nothing is sent.
    pub fn new<I: DisplayInterface>(buffer: B, dimensions: Dimensions) -> Result<Self, Error<I>> {
        let required = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(Error::BufferTooSmall { required, provided });
        }
        Ok(Self { buffer, dimensions })
    }

    fn index(&self, x: u8, page: u8) -> usize {
        usize::from(page) * usize::from(self.dimensions.width) + usize::from(x)
    }

    /// The bytes that mirror display RAM, page-major
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.dimensions.buffer_size();
        &self.buffer.as_ref()[..len]
    }

    /// Mutable access to the bytes that mirror display RAM
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.dimensions.buffer_size();
        &mut self.buffer.as_mut()[..len]
    }

    /// Column bytes of one page, or `None` past the last page
    pub fn page(&self, page: u8) -> Option<&[u8]> {
        if page >= self.dimensions.pages() {
            return None;
        }
        let start = self.index(0, page);
        let end = start + usize::from(self.dimensions.width);
        self.as_bytes().get(start..end)
    }

    /// Whether the pixel at (`x`, `y`) is set; off-panel pixels read as unset
    pub fn get_pixel(&self, x: u8, y: u8) -> bool {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return false;
        }
        let index = self.index(x, y / PAGE_HEIGHT);
        self.as_bytes()
            .get(index)
            .is_some_and(|byte| byte & (1 << (y % PAGE_HEIGHT)) != 0)
    }

    /// Panel dimensions the buffer is laid out for
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Release the underlying buffer
    pub fn into_inner(self) -> B {
        self.buffer
    }

    fn write_pixel(&mut self, x: u8, y: u8, color: Color) {
        let index = self.index(x, y / PAGE_HEIGHT);
        let mask = 1 << (y % PAGE_HEIGHT);
        if let Some(byte) = self.as_bytes_mut().get_mut(index) {
            if color.is_on() {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }
}

impl<B> PixelSink for Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    const MODE: DrawMode = DrawMode::Buffered;

    fn set_pixel<I: DisplayInterface>(
        &mut self,
        _display: &mut Display<I>,
        x: u8,
        y: u8,
        color: Color,
    ) -> Result<(), Error<I>> {
        self.write_pixel(x, y, color);
        Ok(())
    }

    fn put_column<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        column: u8,
    ) -> Result<(), Error<I>> {
        let cursor = display.cursor();
        if cursor.column < self.dimensions.width {
            let index = self.index(cursor.column, cursor.page);
            if let Some(byte) = self.as_bytes_mut().get_mut(index) {
                *byte = column;
            }
            display.advance_cursor(1);
        }
        Ok(())
    }

    fn move_cursor<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        x: u8,
        page: u8,
    ) -> Result<bool, Error<I>> {
        Ok(display.defer_seek(x, page))
    }

    fn fill<I: DisplayInterface>(
        &mut self,
        _display: &mut Display<I>,
        color: Color,
    ) -> Result<(), Error<I>> {
        self.as_bytes_mut().fill(color.fill_byte());
        Ok(())
    }

    fn clear(&mut self) {
        self.as_bytes_mut().fill(0);
    }
}

/// Direct-to-device drawing without local memory
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl PixelSink for Immediate {
    const MODE: DrawMode = DrawMode::Immediate;

    fn set_pixel<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        x: u8,
        y: u8,
        color: Color,
    ) -> Result<(), Error<I>> {
        let mask: u8 = 1 << (y % PAGE_HEIGHT);
        let byte = if color.is_on() { mask } else { !mask };
        if display.go_to_pixel_position(x, y / PAGE_HEIGHT)? {
            display.write_data(&[byte])?;
        }
        Ok(())
    }

    fn put_column<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        column: u8,
    ) -> Result<(), Error<I>> {
        if display.cursor().column < display.dimensions().width {
            display.write_data(&[column])?;
        }
        Ok(())
    }

    fn move_cursor<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        x: u8,
        page: u8,
    ) -> Result<bool, Error<I>> {
        display.go_to_pixel_position(x, page)
    }

    fn fill<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        color: Color,
    ) -> Result<(), Error<I>> {
        let row = [color.fill_byte(); MAX_WIDTH as usize];
        let dims = *display.dimensions();
        for page in 0..dims.pages() {
            display.go_to_pixel_position(0, page)?;
            display.write_data(&row[..usize::from(dims.width)])?;
        }
        display.go_to_pixel_position(0, 0)?;
        Ok(())
    }

    fn clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{config, MockInterface};
    use alloc::vec;

    fn test_display() -> Display<MockInterface> {
        Display::new(MockInterface::new(), config(128, 64))
    }

    fn test_framebuffer() -> Framebuffer<[u8; 1024]> {
        let dims = Dimensions::new(128, 64).unwrap();
        Framebuffer::new::<MockInterface>([0; 1024], dims).unwrap()
    }

    #[test]
    fn test_framebuffer_too_small() {
        let dims = Dimensions::new(128, 64).unwrap();
        let result = Framebuffer::new::<MockInterface>([0u8; 512], dims);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 1024,
                provided: 512
            })
        ));
    }

    #[test]
    fn test_framebuffer_pixel_layout() {
        let mut display = test_display();
        let mut fb = test_framebuffer();

        fb.set_pixel(&mut display, 3, 10, Color::White).unwrap();

        // y = 10 -> page 1, bit 2
        assert_eq!(fb.as_bytes()[128 + 3], 0b0000_0100);
        assert!(fb.get_pixel(3, 10));
        assert!(!fb.get_pixel(3, 11));
        assert_eq!(fb.page(1).unwrap()[3], 0b0000_0100);
        assert!(fb.page(8).is_none());
        assert!(display.interface_mut().frames.is_empty());
    }

    #[test]
    fn test_framebuffer_white_then_black_restores_byte() {
        let mut display = test_display();
        let mut fb = test_framebuffer();
        fb.as_bytes_mut()[5] = 0b1010_0000;

        fb.set_pixel(&mut display, 5, 1, Color::White).unwrap();
        assert_eq!(fb.as_bytes()[5], 0b1010_0010);
        fb.set_pixel(&mut display, 5, 1, Color::Black).unwrap();
        assert_eq!(fb.as_bytes()[5], 0b1010_0000);
    }

    #[test]
    fn test_framebuffer_get_pixel_off_panel() {
        let fb = test_framebuffer();
        assert!(!fb.get_pixel(128, 0));
        assert!(!fb.get_pixel(0, 64));
    }

    #[test]
    fn test_framebuffer_put_column_follows_cursor() {
        let mut display = test_display();
        let mut fb = test_framebuffer();
        display.go_to_pixel_position(126, 2).unwrap();

        fb.put_column(&mut display, 0xAA).unwrap();
        fb.put_column(&mut display, 0xBB).unwrap();
        // Past the last column: dropped
        fb.put_column(&mut display, 0xCC).unwrap();

        assert_eq!(fb.page(2).unwrap()[126..], [0xAA, 0xBB]);
        assert_eq!(display.cursor().column, 128);
        assert!(display.interface_mut().data().is_empty());
    }

    #[test]
    fn test_framebuffer_move_cursor_is_local() {
        let mut display = test_display();
        let mut fb = test_framebuffer();

        assert!(fb.move_cursor(&mut display, 30, 5).unwrap());
        assert!(!fb.move_cursor(&mut display, 0, 8).unwrap());

        assert!(display.interface_mut().frames.is_empty());
        assert_eq!(display.cursor().column, 30);
        assert_eq!(display.cursor().page, 5);
    }

    #[test]
    fn test_immediate_move_cursor_addresses_controller() {
        let mut display = test_display();
        assert!(Immediate.move_cursor(&mut display, 30, 5).unwrap());
        assert_eq!(
            display.interface_mut().commands(),
            vec![vec![0xB5, 0x21, 30, 127, 0x22, 5, 7]]
        );
    }

    #[test]
    fn test_framebuffer_clear() {
        let mut fb = test_framebuffer();
        fb.as_bytes_mut().fill(0xFF);
        PixelSink::clear(&mut fb);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_immediate_pixel_is_seek_plus_one_byte() {
        let mut display = test_display();
        let mut sink = Immediate;

        sink.set_pixel(&mut display, 7, 13, Color::White).unwrap();
        sink.set_pixel(&mut display, 7, 13, Color::Black).unwrap();

        let interface = display.interface_mut();
        let commands = interface.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], vec![0xB1, 0x21, 7, 127, 0x22, 1, 7]);
        assert_eq!(
            interface.data(),
            vec![vec![0b0010_0000], vec![0b1101_1111]]
        );
    }

    #[test]
    fn test_framebuffer_fill() {
        let mut display = test_display();
        let mut fb = test_framebuffer();
        fb.fill(&mut display, Color::White).unwrap();
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        assert!(display.interface_mut().frames.is_empty());
    }

    #[test]
    fn test_immediate_fill_writes_every_page() {
        let mut display = Display::new(MockInterface::new(), config(64, 32));
        Immediate.fill(&mut display, Color::White).unwrap();

        let data = display.interface_mut().data();
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|page| page.len() == 64 && page.iter().all(|&b| b == 0xFF)));
        assert_eq!(display.cursor().column, 0);
    }

    #[test]
    fn test_immediate_put_column_writes_at_cursor() {
        let mut display = test_display();
        let mut sink = Immediate;
        display.go_to_pixel_position(127, 0).unwrap();

        sink.put_column(&mut display, 0x7E).unwrap();
        sink.put_column(&mut display, 0x7F).unwrap();

        assert_eq!(display.interface_mut().data(), vec![vec![0x7E]]);
        assert_eq!(display.cursor().column, 128);
    }
}
