//! Core display operations
//!
//! [`Display`] owns the interface and the page-addressed cursor. It knows the
//! controller's command set but keeps no pixel memory; see
//! [`GraphicDisplay`](crate::graphics::GraphicDisplay) for drawing.

use embedded_hal::delay::DelayNs;

use crate::command::{
    ACTIVATE_SCROLL, CHARGE_PUMP, CHARGE_PUMP_ENABLE, DEACTIVATE_SCROLL, DISPLAY_ALL_ON_RESUME,
    DISPLAY_OFF, DISPLAY_ON, HORIZONTAL_SCROLL_LEFT, HORIZONTAL_SCROLL_RIGHT, INVERSE_DISPLAY,
    MEMORY_MODE_HORIZONTAL, NORMAL_DISPLAY, SET_CLOCK_DIVIDE, SET_COLUMN_ADDRESS, SET_COM_PINS,
    SET_CONTRAST, SET_DISPLAY_OFFSET, SET_HIGH_COLUMN, SET_LOW_COLUMN, SET_MEMORY_MODE,
    SET_MULTIPLEX_RATIO, SET_PAGE_ADDRESS, SET_PAGE_START, SET_PRECHARGE, SET_START_LINE,
    SET_VCOMH_DESELECT,
};
use crate::config::{Config, Dimensions, MAX_WIDTH};
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Scroll step interval parameter: 5 frames
const SCROLL_INTERVAL_5_FRAMES: u8 = 0x00;

/// Write position in display RAM
///
/// `column` is in pixels and may equal the panel width, meaning "past the
/// last column"; `page` is always a valid page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Column in pixels
    pub column: u8,
    /// Page (8-row band)
    pub page: u8,
}

/// Core display driver for SSD1306
///
/// This struct provides low-level operations for the SSD1306 controller.
/// For drawing support, use `GraphicDisplay`.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Current RAM write position
    cursor: Cursor,
    /// Whether the panel is switched on
    is_display_on: bool,
    /// The controller's address pointer is not at `cursor`
    needs_seek: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            cursor: Cursor::default(),
            is_display_on: false,
            needs_seek: false,
        }
    }

    /// Reset and initialize the controller, then blank its RAM
    ///
    /// Sends the full power-up sequence (multiplex ratio and COM pins derived
    /// from the panel height, contrast, rotation and analog timing from the
    /// [`Config`]), zeroes every page and stops any scroll left running.
    /// The cursor ends at (0, 0).
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay).map_err(Error::Interface)?;

        let config = &self.config;
        let sequence = [
            DISPLAY_OFF,
            SET_MEMORY_MODE,
            MEMORY_MODE_HORIZONTAL,
            SET_PAGE_START,
            config.rotation.com_scan(),
            SET_LOW_COLUMN,
            SET_HIGH_COLUMN,
            SET_START_LINE,
            SET_CONTRAST,
            config.contrast,
            config.rotation.segment_remap(),
            NORMAL_DISPLAY,
            SET_MULTIPLEX_RATIO,
            config.multiplex_ratio(),
            DISPLAY_ALL_ON_RESUME,
            SET_DISPLAY_OFFSET,
            0x00,
            SET_CLOCK_DIVIDE,
            config.clock_divide,
            SET_PRECHARGE,
            config.precharge,
            SET_COM_PINS,
            config.com_pins(),
            SET_VCOMH_DESELECT,
            config.vcomh,
            CHARGE_PUMP,
            CHARGE_PUMP_ENABLE,
            if config.display_on {
                DISPLAY_ON
            } else {
                DISPLAY_OFF
            },
        ];
        self.send_commands(&sequence)?;
        self.is_display_on = self.config.display_on;

        self.clear_screen()?;
        self.stop_scroll()?;

        log::debug!(
            "ssd1306 initialized: {}x{}, {:?}",
            self.config.dimensions.width,
            self.config.dimensions.height,
            self.config.rotation
        );
        Ok(())
    }

    /// Move the RAM write position to column `x` of `page`
    ///
    /// Requests with `x > width` or `page >= pages` are ignored: nothing is
    /// sent, the cursor keeps its value and `Ok(false)` is returned.
    /// `x == width` is accepted and parks the cursor past the last column.
    pub fn go_to_pixel_position(&mut self, x: u8, page: u8) -> Result<bool, Error<I>> {
        if !self.accepts_position(x, page) {
            return Ok(false);
        }

        let dims = self.config.dimensions;
        let last_column = dims.width - 1;
        self.send_commands(&[
            SET_PAGE_START | page,
            SET_COLUMN_ADDRESS,
            x.min(last_column),
            last_column,
            SET_PAGE_ADDRESS,
            page,
            dims.pages() - 1,
        ])?;
        self.cursor = Cursor { column: x, page };
        self.needs_seek = false;
        Ok(true)
    }

    /// Move the cursor without addressing the controller yet
    ///
    /// Same bounds as [`go_to_pixel_position`](Self::go_to_pixel_position).
    /// The address window is sent by the next RAM write.
    pub(crate) fn defer_seek(&mut self, x: u8, page: u8) -> bool {
        if !self.accepts_position(x, page) {
            return false;
        }
        self.cursor = Cursor { column: x, page };
        self.needs_seek = true;
        true
    }

    fn accepts_position(&self, x: u8, page: u8) -> bool {
        let dims = self.config.dimensions;
        let on_panel = x <= dims.width && page < dims.pages();
        if !on_panel {
            log::trace!("ignoring cursor move to ({x}, page {page})");
        }
        on_panel
    }

    fn seek_if_deferred(&mut self) -> DisplayResult<I> {
        if self.needs_seek {
            let Cursor { column, page } = self.cursor;
            self.go_to_pixel_position(column, page)?;
        }
        Ok(())
    }

    /// Move to text cell (`column`, `row`) of a font `glyph_width` pixels wide
    ///
    /// The pixel column is `column * glyph_width`; rows are pages.
    pub fn go_to_position(
        &mut self,
        column: u8,
        row: u8,
        glyph_width: u8,
    ) -> Result<bool, Error<I>> {
        let x = u16::from(column) * u16::from(glyph_width);
        match u8::try_from(x) {
            Ok(x) => self.go_to_pixel_position(x, row),
            Err(_) => Ok(false),
        }
    }

    /// Write display RAM bytes at the cursor
    ///
    /// Only the bytes that fit before the right edge are sent; with the
    /// cursor parked past the last column nothing is. The cursor column
    /// advances by the number of bytes sent.
    pub fn write_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        let room = usize::from(self.config.dimensions.width.saturating_sub(self.cursor.column));
        let data = data.get(..room).unwrap_or(data);
        if data.is_empty() {
            return Ok(());
        }
        self.seek_if_deferred()?;
        self.send_data(data)?;
        self.advance_cursor(data.len());
        Ok(())
    }

    /// Stream bytes from the cursor, wrapping across pages
    ///
    /// The cursor is left at the panel edge; callers re-position it.
    pub(crate) fn stream_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.seek_if_deferred()?;
        self.send_data(data)?;
        self.advance_cursor(data.len());
        Ok(())
    }

    /// Move the cursor right without sending anything
    ///
    /// Used when column bytes land in a framebuffer instead of display RAM.
    pub(crate) fn advance_cursor(&mut self, columns: usize) {
        let advance = u8::try_from(columns).unwrap_or(u8::MAX);
        self.cursor.column = self
            .cursor
            .column
            .saturating_add(advance)
            .min(self.config.dimensions.width);
    }

    /// Zero every page of display RAM and home the cursor
    pub fn clear_screen(&mut self) -> DisplayResult<I> {
        let zeros = [0u8; MAX_WIDTH as usize];
        let width = usize::from(self.config.dimensions.width);
        for page in 0..self.config.dimensions.pages() {
            self.go_to_pixel_position(0, page)?;
            self.write_data(&zeros[..width])?;
        }
        self.go_to_pixel_position(0, 0)?;
        Ok(())
    }

    /// Set contrast (0x00 dimmest, 0xFF brightest)
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<I> {
        self.send_commands(&[SET_CONTRAST, contrast])?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Swap lit and dark pixels without touching RAM
    pub fn set_invert(&mut self, invert: bool) -> DisplayResult<I> {
        self.send_commands(&[if invert {
            INVERSE_DISPLAY
        } else {
            NORMAL_DISPLAY
        }])
    }

    /// Switch the panel on or off
    ///
    /// RAM content is kept while off.
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.send_commands(&[if on { DISPLAY_ON } else { DISPLAY_OFF }])?;
        self.is_display_on = on;
        Ok(())
    }

    /// Enter or leave sleep mode
    pub fn set_sleep(&mut self, sleep: bool) -> DisplayResult<I> {
        self.set_display_on(!sleep)
    }

    /// Continuously scroll pages `start..=stop` to the right
    pub fn start_scroll_right(&mut self, start: u8, stop: u8) -> DisplayResult<I> {
        self.start_scroll(HORIZONTAL_SCROLL_RIGHT, start, stop)
    }

    /// Continuously scroll pages `start..=stop` to the left
    pub fn start_scroll_left(&mut self, start: u8, stop: u8) -> DisplayResult<I> {
        self.start_scroll(HORIZONTAL_SCROLL_LEFT, start, stop)
    }

    fn start_scroll(&mut self, direction: u8, start: u8, stop: u8) -> DisplayResult<I> {
        if start > stop || stop >= self.config.dimensions.pages() {
            return Err(Error::InvalidScrollRange { start, stop });
        }
        self.send_commands(&[
            direction,
            0x00,
            start,
            SCROLL_INTERVAL_5_FRAMES,
            stop,
            0x00,
            0xFF,
            ACTIVATE_SCROLL,
        ])
    }

    /// Stop scrolling
    ///
    /// RAM must be rewritten afterwards; the scrolled image is not restored.
    pub fn stop_scroll(&mut self) -> DisplayResult<I> {
        self.send_commands(&[DEACTIVATE_SCROLL])
    }

    /// Send a command stream to the display controller
    fn send_commands(&mut self, commands: &[u8]) -> DisplayResult<I> {
        self.interface
            .send_commands(commands)
            .map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Get the current RAM write position
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the panel is switched on
    pub fn is_display_on(&self) -> bool {
        self.is_display_on
    }

    /// Access the underlying interface
    ///
    /// Useful for [`MultiSpiInterface::select_display`](crate::interface::MultiSpiInterface::select_display).
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }
}
