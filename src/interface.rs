//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and three transports
//! for talking to an SSD1306 controller:
//!
//! - [`SpiInterface`]: one panel on an [`SpiDevice`] (the HAL drives chip-select)
//! - [`I2cInterface`]: one panel on an [`I2c`] bus, framed with control bytes
//! - [`MultiSpiInterface`]: several panels sharing one [`SpiBus`], each with its
//!   own chip-select line, switched with [`MultiSpiInterface::select_display`]
//!
//! ## Hardware Requirements
//!
//! The SPI variants need:
//! - SPI bus (MOSI + SCK)
//! - **DC**: Data/Command select (output, low=command, high=data)
//! - **RST**: Reset (output, active low)
//!
//! The I2C variant only needs SDA/SCL; the controller is reset by power-on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1306::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
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
//! # let mut delay = MockDelay;
//! // Create interface with SPI and GPIO pins
//! let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//!
//! // Pulse the reset line
//! let _ = interface.reset(&mut delay);
//!
//! // Send a command stream (display on)
//! let _ = interface.send_commands(&[0xAF]);
//!
//! // Send display RAM data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal::spi::{SpiBus, SpiDevice};

use crate::command::{I2C_CONTROL_COMMAND, I2C_CONTROL_DATA};
use crate::error::BuilderError;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Length of the low phase of the reset pulse
pub const RESET_PULSE_MS: u32 = 10;

/// Trait for hardware interface to SSD1306 controller
///
/// This trait abstracts over the transport, allowing the
/// [`Display`](crate::display::Display) to work with SPI, I2C or any custom
/// link that can frame a byte stream as "command" or "data".
///
/// All byte sequences are explicit-length slices; a zero byte is a valid
/// command parameter and a valid pixel column.
///
/// ## Implementing
///
/// For most cases, use one of the provided transports. If you need custom
/// behavior (e.g., a port expander driving DC), implement this trait on your
/// own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command stream to the controller
    ///
    /// The implementation must mark every byte in `commands` as command bytes
    /// (DC low over SPI, control byte 0x00 over I2C) and transmit them in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send display RAM data to the controller
    ///
    /// The implementation must mark every byte in `data` as data bytes
    /// (DC high over SPI, control byte 0x40 over I2C). The controller writes
    /// them at its current address pointer, which auto-increments.
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// Drives RST low for [`RESET_PULSE_MS`] milliseconds, releases it and
    /// waits the same time again. Transports without a reset line do nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Send a single command byte
    ///
    /// Convenience wrapper around [`send_commands`](Self::send_commands).
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.send_commands(&[command])
    }
}

/// Errors that can occur at the interface level
///
/// Generic over bus (SPI or I2C) and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// Pulse an active-low reset line
fn pulse_reset<RST, D>(rst: &mut RST, delay: &mut D) -> InterfaceResult<(), RST::Error>
where
    RST: OutputPin,
    D: DelayNs,
{
    rst.set_high()?;
    delay.delay_us(1);
    rst.set_low()?;
    delay.delay_ms(RESET_PULSE_MS);
    rst.set_high()?;
    delay.delay_ms(RESET_PULSE_MS);
    Ok(())
}

/// SPI interface for a single SSD1306 panel
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
/// Chip-select is owned by the [`SpiDevice`] implementation.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1306::{Builder, Dimensions, Display, SpiInterface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::{Operation, SpiDevice};
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let interface = SpiInterface::new(
///     MockSpi,  // SpiDevice
///     MockPin,  // DC
///     MockPin,  // RST
/// );
///
/// // Use with Display
/// # let dims = match Dimensions::new(128, 64) {
/// #     Ok(dims) => dims,
/// #     Err(_) => return,
/// # };
/// # let config = match Builder::new().dimensions(dims).build() {
/// #     Ok(config) => config,
/// #     Err(_) => return,
/// # };
/// let _display = Display::new(interface, config);
/// ```
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SPI interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // DC idles high between transfers
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        pulse_reset(&mut self.rst, delay).map_err(InterfaceError::Pin)
    }
}

/// I2C interface for a single SSD1306 panel
///
/// Every transfer is a single I2C write: one control byte
/// ([`I2C_CONTROL_COMMAND`] or [`I2C_CONTROL_DATA`]) followed by the payload.
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1306::{DisplayInterface, I2cInterface};
/// # use core::convert::Infallible;
/// # use embedded_hal::i2c::{I2c, Operation};
/// # struct MockI2c;
/// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// // 64-row panel wired with SA0 high
/// let mut interface = I2cInterface::new(MockI2c, 0x3D);
/// let _ = interface.send_commands(&[0xAF]);
/// ```
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new I2C interface for the device at `address`
    ///
    /// See [`Config::i2c_address`](crate::config::Config::i2c_address) for
    /// the height-derived default address.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Get the 7-bit device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_framed(&mut self, control: u8, payload: &[u8]) -> InterfaceResult<(), I2C::Error> {
        // Adjacent write operations go out as one transfer with no repeated start
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[control]), Operation::Write(payload)],
        )
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
    I2C::Error: Debug,
{
    type Error = InterfaceError<I2C::Error, Infallible>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_COMMAND, commands)
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.write_framed(I2C_CONTROL_DATA, data)
            .map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }
}

/// SPI interface for several SSD1306 panels sharing one bus
///
/// Each panel has its own chip-select line; DC and RST are shared. Transfers
/// target the panel chosen with [`select_display`](Self::select_display),
/// which starts at the index given to [`new`](Self::new).
///
/// The selection is plain state on this struct: wrap the whole
/// [`Display`](crate::display::Display) in a critical section or mutex if
/// more than one execution context drives it.
///
/// ## Example
///
/// ```rust,no_run
/// use ssd1306::{DisplayInterface, MultiSpiInterface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::SpiBus;
/// # struct MockBus;
/// # impl embedded_hal::spi::ErrorType for MockBus { type Error = Infallible; }
/// # impl SpiBus for MockBus {
/// #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// let mut interface = match MultiSpiInterface::new(MockBus, MockPin, MockPin, [MockPin, MockPin], 0) {
///     Ok(interface) => interface,
///     Err(_) => return,
/// };
///
/// // Talk to the second panel
/// interface.select_display(1);
/// let _ = interface.send_commands(&[0xAF]);
/// ```
pub struct MultiSpiInterface<BUS, DC, RST, CS, const N: usize> {
    /// Shared SPI bus
    bus: BUS,
    /// Shared Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Shared reset pin (active low)
    rst: RST,
    /// One chip-select line per panel (active low)
    chip_selects: [CS; N],
    /// Index of the panel that receives transfers
    selected: usize,
}

impl<BUS, DC, RST, CS, const N: usize> MultiSpiInterface<BUS, DC, RST, CS, N>
where
    BUS: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
    CS: OutputPin,
{
    /// Create a new multi-panel interface
    ///
    /// # Arguments
    ///
    /// * `bus` - SPI bus shared by all panels
    /// * `dc` - Shared Data/Command pin
    /// * `rst` - Shared reset pin
    /// * `chip_selects` - Chip-select line of each panel, by display index
    /// * `initial` - Index of the panel selected at start
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::NoDisplays` if `chip_selects` is empty.
    pub fn new(
        bus: BUS,
        dc: DC,
        rst: RST,
        chip_selects: [CS; N],
        initial: usize,
    ) -> Result<Self, BuilderError> {
        if N == 0 {
            return Err(BuilderError::NoDisplays);
        }
        let mut interface = Self {
            bus,
            dc,
            rst,
            chip_selects,
            selected: 0,
        };
        interface.select_display(initial);
        Ok(interface)
    }

    /// Select which panel receives subsequent transfers
    ///
    /// An out-of-range index selects display 0.
    pub fn select_display(&mut self, display: usize) {
        if display < N {
            self.selected = display;
        } else {
            log::warn!("display index {display} out of range (have {N}), selecting 0");
            self.selected = 0;
        }
    }

    /// Index of the currently selected panel
    pub fn selected_display(&self) -> usize {
        self.selected
    }

    /// Number of panels on the bus
    pub fn display_count(&self) -> usize {
        N
    }

    /// Release the bus and pins
    pub fn release(self) -> (BUS, DC, RST, [CS; N]) {
        (self.bus, self.dc, self.rst, self.chip_selects)
    }
}

impl<BUS, DC, RST, CS, PinErr, const N: usize> MultiSpiInterface<BUS, DC, RST, CS, N>
where
    BUS: SpiBus,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
{
    fn transfer(
        &mut self,
        data_mode: bool,
        bytes: &[u8],
    ) -> InterfaceResult<(), InterfaceError<BUS::Error, PinErr>> {
        let Some(cs) = self.chip_selects.get_mut(self.selected) else {
            return Ok(());
        };

        cs.set_low().map_err(InterfaceError::Pin)?;
        let result = if data_mode {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        }
        .map_err(InterfaceError::Pin)
        .and_then(|()| self.bus.write(bytes).map_err(InterfaceError::Bus))
        .and_then(|()| self.bus.flush().map_err(InterfaceError::Bus));

        // Release the panel even when the transfer failed
        let released = cs.set_high().map_err(InterfaceError::Pin);
        result.and(released)
    }
}

impl<BUS, DC, RST, CS, PinErr, const N: usize> DisplayInterface
    for MultiSpiInterface<BUS, DC, RST, CS, N>
where
    BUS: SpiBus,
    BUS::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<BUS::Error, PinErr>;

    fn send_commands(&mut self, commands: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.transfer(false, commands)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.transfer(true, data)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // RST is shared: deselect every panel before pulsing it
        for cs in &mut self.chip_selects {
            cs.set_high().map_err(InterfaceError::Pin)?;
        }
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        pulse_reset(&mut self.rst, delay).map_err(InterfaceError::Pin)
    }
}
