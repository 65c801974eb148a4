//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]), plus the bounds outcome of drawing
//! primitives ([`DrawStatus`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! Drawing outside the panel is not an error: primitives return
//! [`DrawStatus::Clipped`] and keep going.
//!
//! ## Example
//!
//! ```
//! use ssd1306::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(128, 60); // Height not a multiple of 8
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum segment outputs (columns) of the SSD1306 controller
pub const MAX_WIDTH: u8 = 128;

/// Maximum COM outputs (rows) of the SSD1306 controller
pub const MAX_HEIGHT: u8 = 64;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/I2C/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Page index outside the panel
    InvalidPage {
        /// Requested page
        page: u8,
    },
    /// Buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Invalid scroll page range
    ///
    /// Scrolling requires `start <= stop < pages`.
    InvalidScrollRange {
        /// First page of the scrolled area
        start: u8,
        /// Last page of the scrolled area
        stop: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::InvalidPage { page } => write!(f, "Invalid page: {page}"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::InvalidScrollRange { start, stop } => {
                write!(f, "Invalid scroll range: pages {start}..={stop}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

#[cfg(feature = "defmt")]
impl<I: DisplayInterface> defmt::Format for Error<I> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Interface(_e) => defmt::write!(f, "Interface error"),
            Self::InvalidPage { page } => defmt::write!(f, "Invalid page: {}", page),
            Self::BufferTooSmall { required, provided } => defmt::write!(
                f,
                "Buffer too small: required {} bytes, provided {}",
                required,
                provided
            ),
            Self::InvalidScrollRange { start, stop } => {
                defmt::write!(f, "Invalid scroll range: pages {}..={}", start, stop)
            }
        }
    }
}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u8,
        /// Height in pixels requested
        height: u8,
    },
    /// Tab width of zero glyph cells
    InvalidTabWidth,
    /// Multi-display interface created without any chip-select line
    NoDisplays,
    /// Font with zero glyph width or an empty character range
    InvalidFont,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, height must be multiple of 8)"
            ),
            Self::InvalidTabWidth => write!(f, "Tab width must be at least one cell"),
            Self::NoDisplays => write!(f, "At least one display is required"),
            Self::InvalidFont => write!(f, "Font needs a glyph width and a character range"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Bounds outcome of a drawing primitive
///
/// Shapes merge the outcome of every pixel they touch, so a line that leaves
/// the panel halfway reports [`Clipped`](Self::Clipped) even if its last pixel
/// was on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawStatus {
    /// Every pixel landed on the panel
    #[default]
    Drawn,
    /// At least one pixel fell outside the panel and was dropped
    Clipped,
}

impl DrawStatus {
    /// Status of a single pixel
    pub const fn from_visible(visible: bool) -> Self {
        if visible { Self::Drawn } else { Self::Clipped }
    }

    /// Combine two outcomes; clipping wins
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Drawn, Self::Drawn) => Self::Drawn,
            _ => Self::Clipped,
        }
    }

    /// Check whether everything was drawn
    pub const fn is_drawn(self) -> bool {
        matches!(self, Self::Drawn)
    }

    /// Check whether something was clipped
    pub const fn is_clipped(self) -> bool {
        matches!(self, Self::Clipped)
    }
}
