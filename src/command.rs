//! SSD1306 command definitions
//!
//! This module defines the command bytes used to control the SSD1306 OLED
//! controller. Over SPI, commands are sent with the DC pin low and display RAM
//! data with DC high. Over I2C, every transfer starts with a control byte
//! ([`I2C_CONTROL_COMMAND`] or [`I2C_CONTROL_DATA`]) instead.
//!
//! Multi-byte commands are sent as one command stream: the opcode followed by
//! its parameter bytes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1306::{command, DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! // Contrast is an opcode followed by one parameter byte
//! let _ = interface.send_commands(&[command::SET_CONTRAST, 0x7F]);
//!
//! // Invert the panel
//! let _ = interface.send_commands(&[command::INVERSE_DISPLAY]);
//! ```

// Fundamental commands

/// Display off / sleep mode (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Set contrast control (0x81)
///
/// Requires 1 byte: contrast value 0x00..=0xFF.
pub const SET_CONTRAST: u8 = 0x81;

/// Resume to RAM content display (0xA4)
///
/// Output follows RAM content. 0xA5 would ignore RAM and light every pixel.
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;

/// Normal display (0xA6): a set RAM bit lights the pixel
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display (0xA7): a clear RAM bit lights the pixel
pub const INVERSE_DISPLAY: u8 = 0xA7;

// Addressing commands

/// Set memory addressing mode (0x20)
///
/// Requires 1 byte:
/// - 0x00: Horizontal addressing
/// - 0x01: Vertical addressing
/// - 0x02: Page addressing (reset default)
pub const SET_MEMORY_MODE: u8 = 0x20;

/// Horizontal addressing mode parameter for [`SET_MEMORY_MODE`]
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Set column address range (0x21)
///
/// Requires 2 bytes: [start column, end column]
pub const SET_COLUMN_ADDRESS: u8 = 0x21;

/// Set page address range (0x22)
///
/// Requires 2 bytes: [start page, end page]
pub const SET_PAGE_ADDRESS: u8 = 0x22;

/// Set page start address for page addressing mode (0xB0..=0xB7)
///
/// OR the page number into the low three bits.
pub const SET_PAGE_START: u8 = 0xB0;

/// Set lower nibble of the column start address for page addressing (0x00..=0x0F)
pub const SET_LOW_COLUMN: u8 = 0x00;

/// Set upper nibble of the column start address for page addressing (0x10..=0x1F)
pub const SET_HIGH_COLUMN: u8 = 0x10;

// Hardware configuration commands

/// Set display start line (0x40..=0x7F)
pub const SET_START_LINE: u8 = 0x40;

/// Segment remap: column 0 mapped to SEG0 (0xA0)
pub const SEGMENT_REMAP_NORMAL: u8 = 0xA0;

/// Segment remap: column 127 mapped to SEG0 (0xA1)
pub const SEGMENT_REMAP_REVERSED: u8 = 0xA1;

/// Set multiplex ratio (0xA8)
///
/// Requires 1 byte: number of rows minus one.
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;

/// COM output scan direction: COM0 to COM[N-1] (0xC0)
pub const COM_SCAN_INCREMENT: u8 = 0xC0;

/// COM output scan direction: COM[N-1] to COM0 (0xC8)
pub const COM_SCAN_DECREMENT: u8 = 0xC8;

/// Set display offset (0xD3)
///
/// Requires 1 byte: vertical shift by COM, 0x00..=0x3F.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA)
///
/// Requires 1 byte: 0x02 for 128x32 panels, 0x12 for 128x64 panels.
pub const SET_COM_PINS: u8 = 0xDA;

/// COM pins value for 32-row panels (sequential, no remap)
pub const COM_PINS_SEQUENTIAL: u8 = 0x02;

/// COM pins value for 64-row panels (alternative configuration)
pub const COM_PINS_ALTERNATIVE: u8 = 0x12;

// Timing and driving scheme commands

/// Set display clock divide ratio / oscillator frequency (0xD5)
///
/// Requires 1 byte: high nibble oscillator frequency, low nibble divide ratio.
pub const SET_CLOCK_DIVIDE: u8 = 0xD5;

/// Set pre-charge period (0xD9)
///
/// Requires 1 byte: high nibble phase 2, low nibble phase 1.
pub const SET_PRECHARGE: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB)
///
/// Requires 1 byte: 0x00 = 0.65 Vcc, 0x20 = 0.77 Vcc, 0x30 = 0.83 Vcc.
pub const SET_VCOMH_DESELECT: u8 = 0xDB;

/// Charge pump setting (0x8D)
///
/// Requires 1 byte: 0x14 = enable, 0x10 = disable.
pub const CHARGE_PUMP: u8 = 0x8D;

/// Charge pump enable parameter for [`CHARGE_PUMP`]
pub const CHARGE_PUMP_ENABLE: u8 = 0x14;

// Scrolling commands

/// Continuous horizontal scroll to the right (0x26)
///
/// Requires 6 bytes: [0x00, start page, interval, end page, 0x00, 0xFF]
pub const HORIZONTAL_SCROLL_RIGHT: u8 = 0x26;

/// Continuous horizontal scroll to the left (0x27)
///
/// Requires 6 bytes: [0x00, start page, interval, end page, 0x00, 0xFF]
pub const HORIZONTAL_SCROLL_LEFT: u8 = 0x27;

/// Deactivate scroll (0x2E)
///
/// RAM must be rewritten after scrolling is stopped.
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

/// Activate scroll (0x2F)
///
/// Starts the scroll configured by the last scroll setup command.
pub const ACTIVATE_SCROLL: u8 = 0x2F;

// I2C framing

/// I2C control byte announcing a command stream (Co = 0, D/C# = 0)
pub const I2C_CONTROL_COMMAND: u8 = 0x00;

/// I2C control byte announcing a data stream (Co = 0, D/C# = 1)
pub const I2C_CONTROL_DATA: u8 = 0x40;

/// Default 7-bit I2C address for 32-row panels (SA0 low)
pub const I2C_ADDRESS_PRIMARY: u8 = 0x3C;

/// Default 7-bit I2C address for 64-row panels (SA0 high)
pub const I2C_ADDRESS_SECONDARY: u8 = 0x3D;
