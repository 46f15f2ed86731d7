//! SMI Transaction Engine
//!
//! Bit-level implementation of the Realtek SMI protocol. Every register
//! operation is one transaction framed by a start and a stop condition:
//!
//! ```text
//! write: START | CMD_W ack | ADDR[7:0] ack | ADDR[15:8] ack | DATA[7:0] ack | DATA[15:8] ack | STOP
//! read:  START | CMD_R ack | ADDR[7:0] ack | ADDR[15:8] ack | DATA[7:0] 0   | DATA[15:8] 1   | STOP
//! ```
//!
//! Fields are shifted MSB first. The host drives SDA before each rising SCK
//! edge; the chip drives it for ack slots and read data, which the host
//! samples while SCK is high. An ack slot reads 0 when the chip accepted
//! the byte.

use embedded_hal::digital::PinState;

use super::{RegisterBus, check_register};
use crate::constants::{SMI_ACK_RETRY_COUNT, SMI_BYTE_BITS, SMI_CMD_READ, SMI_CMD_WRITE};
use crate::error::{BusError, BusResult, Result};
use crate::hal::gpio::SmiLines;

// =============================================================================
// Configuration
// =============================================================================

/// Chip-variant protocol parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmiConfig {
    /// Command byte that opens a read transaction
    pub cmd_read: u8,
    /// Command byte that opens a write transaction
    pub cmd_write: u8,
    /// Samples taken per ack slot before giving up
    pub ack_retries: u8,
}

impl Default for SmiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SmiConfig {
    /// Create a configuration for the RTL8366RB/RTL8366S command set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cmd_read: SMI_CMD_READ,
            cmd_write: SMI_CMD_WRITE,
            ack_retries: SMI_ACK_RETRY_COUNT,
        }
    }

    /// Set the read and write command bytes
    #[must_use]
    pub const fn with_commands(mut self, cmd_read: u8, cmd_write: u8) -> Self {
        self.cmd_read = cmd_read;
        self.cmd_write = cmd_write;
        self
    }

    /// Set the ack retry budget (at least one sample is always taken)
    #[must_use]
    pub const fn with_ack_retries(mut self, ack_retries: u8) -> Self {
        self.ack_retries = if ack_retries == 0 { 1 } else { ack_retries };
        self
    }
}

// =============================================================================
// Transaction Guard
// =============================================================================

/// One SMI transaction in progress
///
/// Created by [`SmiEngine::begin`], which has already sent the start
/// condition. The stop condition is sent by [`finish`](Self::finish), or by
/// `Drop` when the transaction is abandoned on an error path, so the lines
/// always return to idle.
#[derive(Debug)]
pub struct Transaction<'a, L: SmiLines> {
    lines: &'a mut L,
    ack_retries: u8,
    open: bool,
}

impl<'a, L: SmiLines> Transaction<'a, L> {
    fn start(lines: &'a mut L, ack_retries: u8) -> BusResult<Self> {
        let txn = Self {
            lines,
            ack_retries,
            open: true,
        };

        // SCK = 0, SDA = 1
        txn.lines.set_clock(PinState::Low)?;
        txn.lines.set_data(PinState::High)?;
        txn.lines.delay();

        // CLK 1: 0 -> 1, 1 -> 0
        txn.lines.set_clock(PinState::High)?;
        txn.lines.delay();
        txn.lines.set_clock(PinState::Low)?;
        txn.lines.delay();

        // CLK 2: SDA falls while SCK is high
        txn.lines.set_clock(PinState::High)?;
        txn.lines.delay();
        txn.lines.set_data(PinState::Low)?;
        txn.lines.delay();
        txn.lines.set_clock(PinState::Low)?;
        txn.lines.delay();
        txn.lines.set_data(PinState::High)?;

        Ok(txn)
    }

    /// Shift the low `len` bits of `data` out, MSB first
    pub fn write_bits(&mut self, data: u32, len: u8) -> BusResult<()> {
        for bit in (0..len).rev() {
            self.lines.delay();
            self.lines.set_data(PinState::from(data & (1 << bit) != 0))?;
            self.lines.delay();
            self.lines.set_clock(PinState::High)?;
            self.lines.delay();
            self.lines.set_clock(PinState::Low)?;
        }
        Ok(())
    }

    /// Shift `len` bits in from the chip, MSB first
    pub fn read_bits(&mut self, len: u8) -> BusResult<u32> {
        self.lines.release_data()?;

        let mut data = 0u32;
        for _ in 0..len {
            self.lines.delay();
            self.lines.set_clock(PinState::High)?;
            self.lines.delay();
            let level = self.lines.get_data()?;
            self.lines.set_clock(PinState::Low)?;
            data = (data << 1) | u32::from(level == PinState::High);
        }

        self.lines.set_data(PinState::Low)?;
        Ok(data)
    }

    /// Sample the ack slot until the chip pulls SDA low
    ///
    /// Takes at most `ack_retries` samples and fails with
    /// [`BusError::AckTimeout`] if none of them is an ack.
    pub fn wait_for_ack(&mut self) -> BusResult<()> {
        let mut attempts = 0u8;
        while attempts < self.ack_retries {
            attempts += 1;
            if self.read_bits(1)? == 0 {
                #[cfg(feature = "defmt")]
                if attempts > 1 {
                    defmt::debug!("SMI ack after {} attempts", attempts);
                }
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("SMI ack timeout after {} attempts", attempts);

        Err(BusError::AckTimeout)
    }

    /// Shift one byte out and wait for the ack
    pub fn write_byte(&mut self, data: u8) -> BusResult<()> {
        self.write_bits(u32::from(data), SMI_BYTE_BITS)?;
        self.wait_for_ack()
    }

    /// Shift one byte out without waiting for the ack
    pub fn write_byte_noack(&mut self, data: u8) -> BusResult<()> {
        self.write_bits(u32::from(data), SMI_BYTE_BITS)
    }

    /// Shift one byte in and answer it
    ///
    /// The host answers 0 when more bytes follow and 1 after the last one.
    pub fn read_byte(&mut self, last: bool) -> BusResult<u8> {
        let data = self.read_bits(SMI_BYTE_BITS)?;
        self.write_bits(u32::from(last), 1)?;
        Ok(data as u8)
    }

    /// Send the stop condition and end the transaction
    pub fn finish(mut self) -> BusResult<()> {
        self.open = false;
        stop(self.lines)
    }
}

impl<L: SmiLines> Drop for Transaction<'_, L> {
    fn drop(&mut self) {
        if self.open {
            // The first failure is what the caller sees
            let _ = stop(self.lines);
        }
    }
}

fn stop<L: SmiLines>(lines: &mut L) -> BusResult<()> {
    lines.delay();

    // SDA rises while SCK is high
    lines.set_data(PinState::Low)?;
    lines.set_clock(PinState::High)?;
    lines.delay();
    lines.set_data(PinState::High)?;
    lines.delay();
    lines.set_clock(PinState::High)?;
    lines.delay();
    lines.set_clock(PinState::Low)?;
    lines.delay();
    lines.set_clock(PinState::High)?;

    // One extra clock before releasing the lines
    lines.delay();
    lines.set_clock(PinState::Low)?;
    lines.delay();
    lines.set_clock(PinState::High)?;

    lines.release()
}

// =============================================================================
// SMI Engine
// =============================================================================

/// Bit-banged SMI register transport
///
/// # Example
///
/// ```ignore
/// use rtl8366_smi::hal::GpioLines;
/// use rtl8366_smi::smi::{RegisterBus, SmiConfig, SmiEngine};
///
/// let mut smi = SmiEngine::new(GpioLines::new(sck, sda, delay), SmiConfig::new());
/// let chip_id = smi.read_register(0x0509)?;
/// ```
#[derive(Debug)]
pub struct SmiEngine<L: SmiLines> {
    lines: L,
    config: SmiConfig,
}

impl<L: SmiLines> SmiEngine<L> {
    /// Create an engine on the given lines
    pub const fn new(lines: L, config: SmiConfig) -> Self {
        Self { lines, config }
    }

    /// Get the protocol configuration
    pub fn config(&self) -> &SmiConfig {
        &self.config
    }

    /// Access the line driver
    pub fn lines(&self) -> &L {
        &self.lines
    }

    /// Access the line driver mutably
    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Consume the engine and return the line driver
    pub fn into_inner(self) -> L {
        self.lines
    }

    /// Send the start condition and open a transaction
    ///
    /// The returned guard borrows the engine, so no other transaction can
    /// start until it is finished or dropped.
    pub fn begin(&mut self) -> BusResult<Transaction<'_, L>> {
        Transaction::start(&mut self.lines, self.config.ack_retries)
    }

    fn write(&mut self, addr: u32, data: u32, ack: bool) -> Result<()> {
        check_register(addr, data)?;
        let cmd = self.config.cmd_write;

        let mut txn = self.begin()?;
        txn.write_byte(cmd)?;
        txn.write_byte(addr as u8)?;
        txn.write_byte((addr >> 8) as u8)?;
        txn.write_byte(data as u8)?;
        if ack {
            txn.write_byte((data >> 8) as u8)?;
        } else {
            txn.write_byte_noack((data >> 8) as u8)?;
        }
        txn.finish()?;

        Ok(())
    }
}

impl<L: SmiLines> RegisterBus for SmiEngine<L> {
    fn read_register(&mut self, addr: u32) -> Result<u32> {
        check_register(addr, 0)?;
        let cmd = self.config.cmd_read;

        let mut txn = self.begin()?;
        txn.write_byte(cmd)?;
        txn.write_byte(addr as u8)?;
        txn.write_byte((addr >> 8) as u8)?;
        let lo = txn.read_byte(false)?;
        let hi = txn.read_byte(true)?;
        txn.finish()?;

        Ok(u32::from(lo) | (u32::from(hi) << 8))
    }

    fn write_register(&mut self, addr: u32, data: u32) -> Result<()> {
        self.write(addr, data, true)
    }

    fn write_register_noack(&mut self, addr: u32, data: u32) -> Result<()> {
        self.write(addr, data, false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
