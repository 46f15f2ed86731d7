//! Hardware Reset HAL
//!
//! Boards that wire the switch reset line to a GPIO can pulse it before the
//! chip is probed. The settle times follow the RTL8366 datasheets: the chip
//! is held in reset for 25 ms and needs 100 ms after release before the SMI
//! interface answers.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::constants::{SMI_HW_START_DELAY_MS, SMI_HW_STOP_DELAY_MS};
use crate::error::{BusError, Result};

// =============================================================================
// Reset Polarity
// =============================================================================

/// Level that holds the chip in reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolarity {
    /// Reset asserted by driving the pin low
    #[default]
    ActiveLow,
    /// Reset asserted by driving the pin high
    ActiveHigh,
}

impl ResetPolarity {
    /// Pin level for the requested reset state
    pub const fn level(self, active: bool) -> PinState {
        match (self, active) {
            (ResetPolarity::ActiveLow, true) | (ResetPolarity::ActiveHigh, false) => {
                PinState::Low
            }
            (ResetPolarity::ActiveLow, false) | (ResetPolarity::ActiveHigh, true) => {
                PinState::High
            }
        }
    }
}

// =============================================================================
// Reset State
// =============================================================================

/// Reset state tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetState {
    /// Not reset (normal operation)
    #[default]
    Normal,
    /// Chip held in reset
    Asserted,
}

// =============================================================================
// Hardware Reset
// =============================================================================

/// Reset line of the switch chip
///
/// # Example
///
/// ```ignore
/// let mut reset = HardwareReset::new(reset_pin);
/// reset.pulse(&mut delay)?;
/// let switch = Switch::attach(bus, chip)?;
/// ```
#[derive(Debug)]
pub struct HardwareReset<RST: OutputPin> {
    /// Reset pin
    pin: RST,
    /// Reset polarity
    polarity: ResetPolarity,
    /// Hold time in milliseconds
    stop_delay_ms: u32,
    /// Recovery time in milliseconds
    start_delay_ms: u32,
    /// Last driven state
    state: ResetState,
}

impl<RST: OutputPin> HardwareReset<RST> {
    /// Create an active-low reset line with datasheet timing
    pub fn new(pin: RST) -> Self {
        Self::with_polarity(pin, ResetPolarity::ActiveLow)
    }

    /// Create a reset line with the given polarity
    pub fn with_polarity(pin: RST, polarity: ResetPolarity) -> Self {
        Self {
            pin,
            polarity,
            stop_delay_ms: SMI_HW_STOP_DELAY_MS,
            start_delay_ms: SMI_HW_START_DELAY_MS,
            state: ResetState::Normal,
        }
    }

    /// Override the hold and recovery times
    #[must_use]
    pub fn with_timing(mut self, stop_delay_ms: u32, start_delay_ms: u32) -> Self {
        self.stop_delay_ms = stop_delay_ms;
        self.start_delay_ms = start_delay_ms;
        self
    }

    /// Hold the chip in reset
    pub fn assert_reset(&mut self) -> Result<()> {
        self.drive(true)
    }

    /// Release the chip from reset
    ///
    /// Wait at least the recovery time before talking to the chip.
    pub fn deassert_reset(&mut self) -> Result<()> {
        self.drive(false)
    }

    /// Pulse the reset line and wait for the chip to come back
    pub fn pulse<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.assert_reset()?;
        delay.delay_ms(self.stop_delay_ms);

        self.deassert_reset()?;
        delay.delay_ms(self.start_delay_ms);

        #[cfg(feature = "defmt")]
        defmt::debug!("switch hardware reset complete");

        Ok(())
    }

    /// Get current reset state
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Consume the driver and return the reset pin
    pub fn into_pin(self) -> RST {
        self.pin
    }

    fn drive(&mut self, active: bool) -> Result<()> {
        self.pin
            .set_state(self.polarity.level(active))
            .map_err(|_| BusError::BusUnavailable)?;
        self.state = if active {
            ResetState::Asserted
        } else {
            ResetState::Normal
        };
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
