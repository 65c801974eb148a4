//! Drawing on top of the driver
//!
//! [`GraphicDisplay`] pairs a [`Display`] with a [`PixelSink`] and draws lines,
//! rectangles, circles and bitmaps through it. The sink type picks the
//! drawing mode:
//!
//! - `GraphicDisplay<I, Framebuffer<B>>` draws into RAM you own and sends it
//!   with [`update`](GraphicDisplay::update)
//! - `GraphicDisplay<I, Immediate>` writes each pixel straight to the panel
//!
//! With the `graphics` feature the display is also an embedded-graphics
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget).
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306::{Color, GraphicDisplay};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use ssd1306::{Builder, Dimensions, Display, SpiInterface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! # let dims = match Dimensions::new(128, 64) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut delay = MockDelay;
//! let mut driver = Display::new(interface, config);
//! let _ = driver.init(&mut delay);
//!
//! // 128 x 64 pixels in 8 pages
//! let mut display = match GraphicDisplay::new(driver, [0u8; 1024]) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//!
//! let _ = display.draw_rect(0, 0, 127, 63, Color::White);
//! let _ = display.fill_circle(64, 32, 10, Color::White);
//! let _ = display.draw_line(0, 63, 127, 0, Color::White);
//!
//! // Nothing reaches the panel until the framebuffer is sent
//! let _ = display.update();
//! ```

#[cfg(feature = "graphics")]
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::color::Color;
use crate::config::DrawMode;
use crate::display::Display;
use crate::error::{DrawStatus, Error};
use crate::interface::DisplayInterface;
use crate::raster;
use crate::sink::{Framebuffer, Immediate, PixelSink};

/// Display with a pixel sink
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `S` - Where pixels go: [`Framebuffer`] or [`Immediate`]
///
/// Every primitive takes signed coordinates and may hang off the panel.
/// Off-panel pixels are dropped and the primitive reports
/// [`DrawStatus::Clipped`].
pub struct GraphicDisplay<I, S>
where
    I: DisplayInterface,
    S: PixelSink,
{
    display: Display<I>,
    sink: S,
}

type GraphicsResult<I> = core::result::Result<(), Error<I>>;
type DrawResult<I> = core::result::Result<DrawStatus, Error<I>>;

/// Plot one pixel if it is on the panel
fn plot<I, S>(
    display: &mut Display<I>,
    sink: &mut S,
    x: i32,
    y: i32,
    color: Color,
) -> DrawResult<I>
where
    I: DisplayInterface,
    S: PixelSink,
{
    let dims = *display.dimensions();
    let (Ok(px), Ok(py)) = (u8::try_from(x), u8::try_from(y)) else {
        return Ok(DrawStatus::Clipped);
    };
    if px >= dims.width || py >= dims.height {
        return Ok(DrawStatus::Clipped);
    }
    sink.set_pixel(display, px, py, color)?;
    Ok(DrawStatus::Drawn)
}

impl<I, B> GraphicDisplay<I, Framebuffer<B>>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Draw into `buffer`, sent to the panel by [`update`](Self::update)
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` holds fewer than
    /// `dimensions.buffer_size()` bytes.
    pub fn new(display: Display<I>, buffer: B) -> Result<Self, Error<I>> {
        let sink = Framebuffer::new::<I>(buffer, *display.dimensions())?;
        Ok(Self { display, sink })
    }

    /// Send the whole framebuffer to display RAM
    ///
    /// One data stream from column 0 of page 0; the controller wraps pages in
    /// horizontal addressing mode. The text cursor keeps its position and
    /// the next RAM write re-addresses it. With
    /// `auto_clear` configured the framebuffer is zeroed afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn update(&mut self) -> GraphicsResult<I> {
        let cursor = self.display.cursor();
        self.display.go_to_pixel_position(0, 0)?;
        self.display.stream_data(self.sink.as_bytes())?;
        self.display.defer_seek(cursor.column, cursor.page);

        if self.display.config().auto_clear {
            PixelSink::clear(&mut self.sink);
        }
        log::debug!("framebuffer sent ({} bytes)", self.sink.as_bytes().len());
        Ok(())
    }

    /// Send one page of the framebuffer
    ///
    /// Unlike [`update`](Self::update) this never clears the framebuffer.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPage` if `page` is past the last page, or
    /// [`Error::Interface`] on a communication error.
    pub fn update_page(&mut self, page: u8) -> GraphicsResult<I> {
        let Some(bytes) = self.sink.page(page) else {
            return Err(Error::InvalidPage { page });
        };
        let cursor = self.display.cursor();
        self.display.go_to_pixel_position(0, page)?;
        self.display.write_data(bytes)?;
        self.display.defer_seek(cursor.column, cursor.page);
        Ok(())
    }

    /// Send `width` framebuffer columns of `page`, starting at column `x`
    ///
    /// The width is clamped to the panel edge. Returns `Ok(false)` without
    /// sending anything when the block starts off the panel or is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn display_block(&mut self, x: u8, page: u8, width: u8) -> Result<bool, Error<I>> {
        let dims = *self.display.dimensions();
        if page >= dims.pages() || x >= dims.width || width == 0 {
            return Ok(false);
        }
        let width = width.min(dims.width - x);
        let start = usize::from(x);
        let Some(block) = self
            .sink
            .page(page)
            .and_then(|row| row.get(start..start + usize::from(width)))
        else {
            return Ok(false);
        };

        let cursor = self.display.cursor();
        self.display.go_to_pixel_position(x, page)?;
        self.display.write_data(block)?;
        self.display.defer_seek(cursor.column, cursor.page);
        Ok(true)
    }

    /// Zero the framebuffer without touching the panel
    pub fn clear_buffer(&mut self) {
        PixelSink::clear(&mut self.sink);
    }

    /// Whether the framebuffer pixel at (`x`, `y`) is set
    ///
    /// Off-panel pixels read as unset.
    pub fn check_buffer(&self, x: u8, y: u8) -> bool {
        self.sink.get_pixel(x, y)
    }

    /// The framebuffer
    pub fn framebuffer(&self) -> &Framebuffer<B> {
        &self.sink
    }

    /// Mutable access to the framebuffer
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<B> {
        &mut self.sink
    }
}

impl<I> GraphicDisplay<I, Immediate>
where
    I: DisplayInterface,
{
    /// Draw straight to display RAM
    ///
    /// The controller's RAM cannot be read back, so each pixel overwrites the
    /// other seven pixels of its page column.
    pub fn immediate(display: Display<I>) -> Self {
        Self {
            display,
            sink: Immediate,
        }
    }
}

impl<I, S> GraphicDisplay<I, S>
where
    I: DisplayInterface,
    S: PixelSink,
{
    /// Drawing mode of the sink
    pub fn draw_mode(&self) -> DrawMode {
        S::MODE
    }

    /// Set the pixel at (`x`, `y`) to `color`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> DrawResult<I> {
        plot(&mut self.display, &mut self.sink, x, y, color)
    }

    /// Line from (`x0`, `y0`) to (`x1`, `y1`), both ends included
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> DrawResult<I> {
        let Self { display, sink } = self;
        raster::line(x0, y0, x1, y1, &mut |x, y| plot(display, sink, x, y, color))
    }

    /// Rectangle outline between two opposite corners
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn draw_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> DrawResult<I> {
        let Self { display, sink } = self;
        raster::rect(x0, y0, x1, y1, &mut |x, y| plot(display, sink, x, y, color))
    }

    /// Filled rectangle between two opposite corners
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn fill_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> DrawResult<I> {
        let Self { display, sink } = self;
        raster::fill_rect(x0, y0, x1, y1, &mut |x, y| plot(display, sink, x, y, color))
    }

    /// Circle outline; a radius of 0 is a single pixel
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: u8, color: Color) -> DrawResult<I> {
        let Self { display, sink } = self;
        raster::circle(cx, cy, i32::from(radius), &mut |x, y| {
            plot(display, sink, x, y, color)
        })
    }

    /// Filled circle
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u8, color: Color) -> DrawResult<I> {
        let Self { display, sink } = self;
        raster::fill_circle(cx, cy, i32::from(radius), &mut |x, y| {
            plot(display, sink, x, y, color)
        })
    }

    /// Packed 1-bpp bitmap with its top-left corner at (`x`, `y`)
    ///
    /// Rows are `(width + 7) / 8` bytes, most significant bit leftmost. Set
    /// bits are drawn in `color`, clear bits in its inverse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn draw_bitmap(
        &mut self,
        x: i32,
        y: i32,
        data: &[u8],
        width: u8,
        height: u8,
        color: Color,
    ) -> DrawResult<I> {
        let Self { display, sink } = self;
        raster::bitmap(x, y, data, width, height, &mut |px, py, set| {
            let color = if set { color } else { color.inverse() };
            plot(display, sink, px, py, color)
        })
    }

    /// Blank the panel and any local pixel state
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn clear_screen(&mut self) -> GraphicsResult<I> {
        self.sink.clear();
        self.display.clear_screen()
    }

    /// Paint every pixel `color`, through the sink
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if an immediate write fails.
    pub fn fill(&mut self, color: Color) -> GraphicsResult<I> {
        self.sink.fill(&mut self.display, color)
    }

    /// The underlying driver
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutable access to the underlying driver
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Driver and sink, borrowed together
    pub(crate) fn parts_mut(&mut self) -> (&mut Display<I>, &mut S) {
        (&mut self.display, &mut self.sink)
    }

    /// Release the driver and the sink
    pub fn release(self) -> (Display<I>, S) {
        (self.display, self.sink)
    }
}

#[cfg(feature = "graphics")]
impl<I, S> DrawTarget for GraphicDisplay<I, S>
where
    I: DisplayInterface,
    S: PixelSink,
{
    type Color = Color;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_pixel(x, y, color)?;
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color)
    }
}

#[cfg(feature = "graphics")]
impl<I, S> OriginDimensions for GraphicDisplay<I, S>
where
    I: DisplayInterface,
    S: PixelSink,
{
    fn size(&self) -> Size {
        let dims = self.display.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use crate::mock::{config, Frame, MockInterface};
    use alloc::vec;

    type Buffered = GraphicDisplay<MockInterface, Framebuffer<[u8; 1024]>>;

    fn buffered(width: u8, height: u8) -> Buffered {
        let display = Display::new(MockInterface::new(), config(width, height));
        GraphicDisplay::new(display, [0; 1024]).unwrap()
    }

    fn immediate() -> GraphicDisplay<MockInterface, Immediate> {
        GraphicDisplay::immediate(Display::new(MockInterface::new(), config(128, 64)))
    }

    #[test]
    fn test_new_rejects_small_buffer() {
        let display = Display::new(MockInterface::new(), config(128, 64));
        let result = GraphicDisplay::new(display, [0u8; 1023]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 1024,
                provided: 1023
            })
        ));
    }

    #[test]
    fn test_draw_mode_follows_sink() {
        assert_eq!(buffered(128, 64).draw_mode(), DrawMode::Buffered);
        assert_eq!(immediate().draw_mode(), DrawMode::Immediate);
    }

    #[test]
    fn test_update_sends_full_framebuffer() {
        let mut gd = buffered(128, 64);
        gd.clear_screen().unwrap();
        gd.display_mut().interface_mut().clear();
        gd.draw_pixel(0, 0, Color::White).unwrap();
        gd.update().unwrap();

        let interface = gd.display_mut().interface_mut();
        assert_eq!(interface.commands(), vec![vec![0xB0, 0x21, 0, 127, 0x22, 0, 7]]);
        let data = interface.data();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].len(), 1024);
        assert_eq!(data[0][0], 0x01);
        assert!(data[0][1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_update_keeps_cursor_and_buffer() {
        let mut gd = buffered(128, 64);
        gd.display_mut().go_to_pixel_position(12, 3).unwrap();
        gd.draw_pixel(5, 5, Color::White).unwrap();
        gd.update().unwrap();

        assert_eq!(gd.display().cursor().column, 12);
        assert_eq!(gd.display().cursor().page, 3);
        assert!(gd.check_buffer(5, 5));
    }

    #[test]
    fn test_write_after_update_lands_at_cursor() {
        let mut gd = buffered(128, 64);
        gd.display_mut().go_to_pixel_position(12, 3).unwrap();
        gd.update().unwrap();
        gd.display_mut().interface_mut().clear();

        gd.display_mut().write_data(&[0xAA]).unwrap();

        assert_eq!(
            gd.display_mut().interface_mut().frames,
            vec![
                Frame::Commands(vec![0xB3, 0x21, 12, 127, 0x22, 3, 7]),
                Frame::Data(vec![0xAA]),
            ]
        );
        assert_eq!(gd.display().cursor().column, 13);
    }

    #[test]
    fn test_write_after_display_block_lands_at_cursor() {
        let mut gd = buffered(128, 64);
        gd.display_mut().go_to_pixel_position(0, 1).unwrap();
        gd.display_block(100, 4, 10).unwrap();
        gd.display_mut().interface_mut().clear();

        gd.display_mut().write_data(&[0x55]).unwrap();

        assert_eq!(
            gd.display_mut().interface_mut().commands(),
            vec![vec![0xB1, 0x21, 0, 127, 0x22, 1, 7]]
        );
    }

    #[test]
    fn test_update_auto_clear() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .auto_clear(true)
            .build()
            .unwrap();
        let display = Display::new(MockInterface::new(), config);
        let mut gd = GraphicDisplay::new(display, [0u8; 1024]).unwrap();
        gd.draw_pixel(5, 5, Color::White).unwrap();
        gd.update().unwrap();

        assert!(!gd.check_buffer(5, 5));
        assert_eq!(gd.display_mut().interface_mut().data()[0][5], 0b0010_0000);
    }

    #[test]
    fn test_update_page() {
        let mut gd = buffered(128, 32);
        gd.draw_pixel(3, 9, Color::White).unwrap();
        gd.update_page(1).unwrap();

        let interface = gd.display_mut().interface_mut();
        assert_eq!(interface.commands(), vec![vec![0xB1, 0x21, 0, 127, 0x22, 1, 3]]);
        let data = interface.data();
        assert_eq!(data[0].len(), 128);
        assert_eq!(data[0][3], 0b0000_0010);

        assert!(matches!(gd.update_page(4), Err(Error::InvalidPage { page: 4 })));
    }

    #[test]
    fn test_pixel_white_then_black_restores_buffer() {
        let mut gd = buffered(128, 64);
        gd.framebuffer_mut().as_bytes_mut()[130] = 0b1000_0001;
        let before = gd.framebuffer().as_bytes()[130];

        gd.draw_pixel(2, 12, Color::White).unwrap();
        assert!(gd.check_buffer(2, 12));
        gd.draw_pixel(2, 12, Color::Black).unwrap();

        assert_eq!(gd.framebuffer().as_bytes()[130], before);
    }

    #[test]
    fn test_off_panel_pixel_is_clipped() {
        let mut gd = buffered(128, 64);
        assert_eq!(gd.draw_pixel(-1, 0, Color::White).unwrap(), DrawStatus::Clipped);
        assert_eq!(gd.draw_pixel(128, 0, Color::White).unwrap(), DrawStatus::Clipped);
        assert_eq!(gd.draw_pixel(0, 64, Color::White).unwrap(), DrawStatus::Clipped);
        assert!(gd.framebuffer().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_line_hanging_off_panel_draws_visible_part() {
        let mut gd = buffered(128, 64);
        let status = gd.draw_line(120, 10, 135, 10, Color::White).unwrap();
        assert_eq!(status, DrawStatus::Clipped);
        assert!(gd.check_buffer(120, 10));
        assert!(gd.check_buffer(127, 10));
    }

    #[test]
    fn test_fill_rect_sets_every_pixel() {
        let mut gd = buffered(128, 64);
        let status = gd.fill_rect(10, 4, 2, 9, Color::White).unwrap();
        assert_eq!(status, DrawStatus::Drawn);
        for x in 2..=10 {
            for y in 4..=9 {
                assert!(gd.check_buffer(x, y));
            }
        }
        assert!(!gd.check_buffer(11, 4));
        assert!(!gd.check_buffer(2, 10));
    }

    #[test]
    fn test_bitmap_draws_clear_bits_inverse() {
        let mut gd = buffered(128, 64);
        gd.fill(Color::White).unwrap();
        gd.draw_bitmap(0, 0, &[0b1010_0000], 3, 1, Color::White).unwrap();

        assert!(gd.check_buffer(0, 0));
        assert!(!gd.check_buffer(1, 0));
        assert!(gd.check_buffer(2, 0));
        assert!(gd.check_buffer(3, 0));
    }

    #[test]
    fn test_immediate_fill_circle_radius_zero_is_one_pixel() {
        let mut gd = immediate();
        gd.fill_circle(10, 20, 0, Color::White).unwrap();

        let interface = gd.display_mut().interface_mut();
        assert_eq!(interface.commands(), vec![vec![0xB2, 0x21, 10, 127, 0x22, 2, 7]]);
        assert_eq!(interface.data(), vec![vec![0b0001_0000]]);
    }

    #[test]
    fn test_display_block_clamps_width() {
        let mut gd = buffered(128, 64);
        gd.framebuffer_mut().as_bytes_mut()[2 * 128 + 125] = 0x5A;

        assert!(gd.display_block(120, 2, 20).unwrap());

        let interface = gd.display_mut().interface_mut();
        assert_eq!(interface.commands(), vec![vec![0xB2, 0x21, 120, 127, 0x22, 2, 7]]);
        let data = interface.data();
        assert_eq!(data[0].len(), 8);
        assert_eq!(data[0][5], 0x5A);
    }

    #[test]
    fn test_display_block_off_panel_is_noop() {
        let mut gd = buffered(128, 64);
        assert!(!gd.display_block(128, 0, 4).unwrap());
        assert!(!gd.display_block(0, 8, 4).unwrap());
        assert!(!gd.display_block(0, 0, 0).unwrap());
        assert!(gd.display_mut().interface_mut().frames.is_empty());
    }

    #[test]
    fn test_clear_screen_blanks_buffer_and_panel() {
        let mut gd = buffered(64, 16);
        gd.fill(Color::White).unwrap();
        gd.clear_screen().unwrap();

        assert!(gd.framebuffer().as_bytes().iter().all(|&b| b == 0));
        let data = gd.display_mut().interface_mut().data();
        assert_eq!(data, vec![vec![0; 64], vec![0; 64]]);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_primitives() {
        use embedded_graphics::prelude::*;
        use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

        let mut gd = buffered(128, 64);
        assert_eq!(gd.size(), Size::new(128, 64));

        Rectangle::new(Point::new(4, 4), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Color::White))
            .draw(&mut gd)
            .unwrap();
        assert!(gd.check_buffer(4, 4));
        assert!(gd.check_buffer(6, 5));
        assert!(!gd.check_buffer(7, 5));

        // Off-panel pixels are dropped, not errors
        Line::new(Point::new(-5, 0), Point::new(2, 0))
            .into_styled(PrimitiveStyle::with_stroke(Color::White, 1))
            .draw(&mut gd)
            .unwrap();
        assert!(gd.check_buffer(0, 0));
        assert!(gd.check_buffer(2, 0));
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_draw_target_clear_fills_framebuffer() {
        let mut gd = buffered(128, 64);
        DrawTarget::clear(&mut gd, Color::White).unwrap();
        assert!(gd.framebuffer().as_bytes().iter().all(|&b| b == 0xFF));
        assert!(gd.display_mut().interface_mut().frames.is_empty());
    }
}
