//! SSD1306 OLED Display Driver
//!
//! A driver for the SSD1306 monochrome OLED controller, for panels up to
//! 128x64 pixels on SPI or I2C.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - SPI, I2C and several SPI panels sharing one bus
//! - Framebuffered or immediate drawing, chosen by type
//! - Lines, rectangles, circles, bitmaps and fixed-width text
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Hardware horizontal scrolling, contrast, inversion and sleep
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1306::{Builder, Color, Dimensions, Display, GraphicDisplay, SpiInterface, FONT_6X8};
//!
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
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, rst);
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).contrast(0x7F).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut driver = Display::new(interface, config);
//! let _ = driver.init(&mut delay);
//!
//! let mut display = match GraphicDisplay::new(driver, [0u8; 1024]) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.put_str("SSD1306", &FONT_6X8);
//! let _ = display.draw_circle(64, 40, 12, Color::White);
//! let _ = display.update();
//! ```
//!
//! ## Concurrency
//!
//! All state (cursor, framebuffer, selected panel) is owned by the driver
//! value and every operation takes `&mut self`. Sharing a display between an
//! interrupt handler and the main loop needs a critical-section mutex around
//! the whole driver.

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Color type for monochrome panels
pub mod color;
/// SSD1306 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Fixed-width fonts
pub mod font;
/// Drawing primitives and framebuffer flushing
pub mod graphics;
/// Hardware interface abstraction
pub mod interface;
/// Shape rasterization
pub mod raster;
/// Framebuffer and immediate pixel sinks
pub mod sink;
/// Text rendering
pub mod text;

#[cfg(test)]
mod mock;

pub use color::Color;
pub use config::{Builder, Config, Dimensions, DrawMode, MAX_HEIGHT, MAX_WIDTH, Rotation};
pub use display::{Cursor, Display};
pub use error::{BuilderError, DrawStatus, Error};
pub use font::{FONT_6X8, Font};
pub use graphics::GraphicDisplay;
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, I2cInterface, MultiSpiInterface, SpiInterface};
pub use sink::{Framebuffer, Immediate, PixelSink};
pub use text::Padding;
