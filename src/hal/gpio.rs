//! SMI Line Driver
//!
//! This module provides the raw primitives used by the transaction engine to
//! drive and sample the two SMI control lines.
//!
//! # Electrical Model
//!
//! The clock line (SCK) is always driven by the host. The data line (SDA) is
//! shared: the host drives it while shifting commands, addresses and write
//! data, and releases it while the chip shifts acks and read data.
//!
//! With `embedded-hal` 1.0 there is no portable way to switch a pin between
//! input and output, so [`GpioLines`] expects SDA to be an open-drain pin
//! that implements both [`OutputPin`] and [`InputPin`] (e.g. esp-hal's
//! `Flex` or `OutputOpenDrain`). Releasing the line means driving it high
//! and letting the pull-up (or the chip) decide the level.
//!
//! | Signal | Direction     | Idle level |
//! |--------|---------------|------------|
//! | SCK    | Output        | High       |
//! | SDA    | Bidirectional | High       |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::constants::SMI_CLK_DELAY_NS;
use crate::error::{BusError, BusResult};

// =============================================================================
// Line Driver Trait
// =============================================================================

/// Raw access to the SMI clock and data lines
///
/// Implementations report collaborator failures (a pin that cannot be
/// driven or sampled) as [`BusError::BusUnavailable`]. The transaction
/// engine never retries those.
pub trait SmiLines {
    /// Drive the clock line
    fn set_clock(&mut self, level: PinState) -> BusResult<()>;

    /// Drive the data line
    fn set_data(&mut self, level: PinState) -> BusResult<()>;

    /// Sample the data line
    fn get_data(&mut self) -> BusResult<PinState>;

    /// Stop driving the data line so the chip can drive it
    fn release_data(&mut self) -> BusResult<()>;

    /// Return both lines to their idle state
    fn release(&mut self) -> BusResult<()>;

    /// Wait for the configured inter-edge interval
    fn delay(&mut self);
}

// =============================================================================
// GPIO Line Driver
// =============================================================================

/// Bit-banged SMI lines on two GPIO pins
///
/// # Example
///
/// ```ignore
/// use rtl8366_smi::hal::GpioLines;
///
/// let sck = Output::new(peripherals.GPIO18, Level::High, OutputConfig::default());
/// let sda = Flex::new(peripherals.GPIO19); // open-drain with pull-up
/// let lines = GpioLines::new(sck, sda, Delay::new());
/// ```
#[derive(Debug)]
pub struct GpioLines<SCK, SDA, D> {
    /// Clock pin
    sck: SCK,
    /// Data pin (open-drain)
    sda: SDA,
    /// Delay provider
    delay: D,
    /// Inter-edge delay in nanoseconds
    clk_delay_ns: u32,
}

impl<SCK, SDA, D> GpioLines<SCK, SDA, D>
where
    SCK: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    /// Create a line driver with the default inter-edge delay
    pub fn new(sck: SCK, sda: SDA, delay: D) -> Self {
        Self::with_clock_delay(sck, sda, delay, SMI_CLK_DELAY_NS)
    }

    /// Create a line driver with a custom inter-edge delay
    pub fn with_clock_delay(sck: SCK, sda: SDA, delay: D, clk_delay_ns: u32) -> Self {
        Self {
            sck,
            sda,
            delay,
            clk_delay_ns,
        }
    }

    /// Get the inter-edge delay in nanoseconds
    pub fn clock_delay_ns(&self) -> u32 {
        self.clk_delay_ns
    }

    /// Set the inter-edge delay in nanoseconds
    pub fn set_clock_delay_ns(&mut self, clk_delay_ns: u32) {
        self.clk_delay_ns = clk_delay_ns;
    }

    /// Consume the driver and return the pins and delay
    pub fn into_inner(self) -> (SCK, SDA, D) {
        (self.sck, self.sda, self.delay)
    }
}

impl<SCK, SDA, D> SmiLines for GpioLines<SCK, SDA, D>
where
    SCK: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    fn set_clock(&mut self, level: PinState) -> BusResult<()> {
        self.sck
            .set_state(level)
            .map_err(|_| BusError::BusUnavailable)
    }

    fn set_data(&mut self, level: PinState) -> BusResult<()> {
        self.sda
            .set_state(level)
            .map_err(|_| BusError::BusUnavailable)
    }

    fn get_data(&mut self) -> BusResult<PinState> {
        self.sda
            .is_high()
            .map(PinState::from)
            .map_err(|_| BusError::BusUnavailable)
    }

    fn release_data(&mut self) -> BusResult<()> {
        self.set_data(PinState::High)
    }

    fn release(&mut self) -> BusResult<()> {
        self.release_data()?;
        self.set_clock(PinState::High)
    }

    fn delay(&mut self) {
        self.delay.delay_ns(self.clk_delay_ns);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
