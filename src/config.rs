//! Display configuration types and builder
//!
//! Panel geometry, orientation and the analog timing values written during
//! initialization are runtime values collected by [`Builder`].

use crate::command::{
    COM_PINS_ALTERNATIVE, COM_PINS_SEQUENTIAL, COM_SCAN_DECREMENT, COM_SCAN_INCREMENT,
    I2C_ADDRESS_PRIMARY, I2C_ADDRESS_SECONDARY, SEGMENT_REMAP_NORMAL, SEGMENT_REMAP_REVERSED,
};
pub use crate::error::{BuilderError, MAX_HEIGHT, MAX_WIDTH};

/// Rows of pixels packed into one page byte
pub const PAGE_HEIGHT: u8 = 8;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dimensions {
    /// Width in pixels (segment outputs)
    pub width: u8,
    /// Height in pixels (COM outputs), always a multiple of 8
    pub height: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0 or greater than [`MAX_WIDTH`]
    /// - height is 0 or greater than [`MAX_HEIGHT`]
    /// - height % 8 != 0 (rows are addressed in whole pages)
    pub fn new(width: u8, height: u8) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_HEIGHT || !height.is_multiple_of(PAGE_HEIGHT) {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }

    /// Calculate required framebuffer size in bytes (one byte per page column)
    pub fn buffer_size(&self) -> usize {
        usize::from(self.pages()) * usize::from(self.width)
    }

    /// Check whether a pixel lies on the panel
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..i32::from(self.width)).contains(&x) && (0..i32::from(self.height)).contains(&y)
    }
}

/// Where drawing primitives put their pixels
///
/// Chosen by the [`PixelSink`](crate::sink::PixelSink) a
/// [`GraphicDisplay`](crate::graphics::GraphicDisplay) is built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawMode {
    /// Draw into a local framebuffer, sent with an explicit update
    #[default]
    Buffered,
    /// Write every pixel straight to display RAM
    Immediate,
}

/// Display orientation, applied by the controller's scan direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native orientation of common breakout modules
    #[default]
    Rotate0,
    /// Upside down
    Rotate180,
}

impl Rotation {
    /// Segment remap command for this orientation
    pub fn segment_remap(self) -> u8 {
        match self {
            Self::Rotate0 => SEGMENT_REMAP_REVERSED,
            Self::Rotate180 => SEGMENT_REMAP_NORMAL,
        }
    }

    /// COM scan direction command for this orientation
    pub fn com_scan(self) -> u8 {
        match self {
            Self::Rotate0 => COM_SCAN_DECREMENT,
            Self::Rotate180 => COM_SCAN_INCREMENT,
        }
    }
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SSD1306 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Contrast value sent with 0x81
    pub contrast: u8,
    /// Whether `init` ends with display on (0xAF) or off (0xAE)
    pub display_on: bool,
    /// Whether `update` zeroes the framebuffer after sending it
    pub auto_clear: bool,
    /// Tab stop spacing in glyph cells
    pub tab_width: u8,
    /// Clock divide ratio / oscillator frequency byte
    pub clock_divide: u8,
    /// Pre-charge period byte
    pub precharge: u8,
    /// VCOMH deselect level byte
    pub vcomh: u8,
}

impl Config {
    /// COM pins hardware configuration byte for the panel height
    pub fn com_pins(&self) -> u8 {
        if self.dimensions.height == 32 {
            COM_PINS_SEQUENTIAL
        } else {
            COM_PINS_ALTERNATIVE
        }
    }

    /// Multiplex ratio byte (rows minus one)
    pub fn multiplex_ratio(&self) -> u8 {
        self.dimensions.height - 1
    }

    /// Default 7-bit I2C address for the panel height
    ///
    /// Modules with 32 rows usually strap SA0 low, 64-row modules high.
    pub fn i2c_address(&self) -> u8 {
        if self.dimensions.height == 32 {
            I2C_ADDRESS_PRIMARY
        } else {
            I2C_ADDRESS_SECONDARY
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1306::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .contrast(0x7F)
///     .rotation(Rotation::Rotate180)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Display rotation
    rotation: Rotation,
    /// Contrast value
    contrast: u8,
    /// Display on after init
    display_on: bool,
    /// Clear framebuffer after update
    auto_clear: bool,
    /// Tab stop spacing in glyph cells
    tab_width: u8,
    /// Clock divide ratio / oscillator frequency byte
    clock_divide: u8,
    /// Pre-charge period byte
    precharge: u8,
    /// VCOMH deselect level byte
    vcomh: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            // Mid-low contrast
            contrast: 0x3F,
            display_on: true,
            auto_clear: false,
            tab_width: 4,
            // Fastest oscillator, divide ratio 1
            clock_divide: 0xF0,
            // Phase 1 and phase 2 of two DCLKs each
            precharge: 0x22,
            // ~0.77 Vcc
            vcomh: 0x20,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set contrast
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set whether the display is switched on at the end of `init`
    pub fn display_on(mut self, value: bool) -> Self {
        self.display_on = value;
        self
    }

    /// Set whether `update` clears the framebuffer after sending it
    pub fn auto_clear(mut self, value: bool) -> Self {
        self.auto_clear = value;
        self
    }

    /// Set tab stop spacing in glyph cells
    pub fn tab_width(mut self, cells: u8) -> Self {
        self.tab_width = cells;
        self
    }

    /// Set clock divide ratio / oscillator frequency
    pub fn clock_divide(mut self, value: u8) -> Self {
        self.clock_divide = value;
        self
    }

    /// Set pre-charge period
    pub fn precharge(mut self, value: u8) -> Self {
        self.precharge = value;
        self
    }

    /// Set VCOMH deselect level
    pub fn vcomh(mut self, value: u8) -> Self {
        self.vcomh = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// or `BuilderError::InvalidTabWidth` for a tab width of zero
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.tab_width == 0 {
            return Err(BuilderError::InvalidTabWidth);
        }
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            contrast: self.contrast,
            display_on: self.display_on,
            auto_clear: self.auto_clear,
            tab_width: self.tab_width,
            clock_divide: self.clock_divide,
            precharge: self.precharge,
            vcomh: self.vcomh,
        })
    }
}
