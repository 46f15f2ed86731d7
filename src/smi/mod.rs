//! Register transports for the switch
//!
//! Every layer above this one talks to the chip through [`RegisterBus`]: a
//! flat, 16-bit register space with read, write, no-ack write and
//! read-modify-write. Two transports implement it:
//!
//! - [`SmiEngine`]: the native bit-banged SMI protocol over two GPIO lines
//! - [`MdioTunnel`]: the MDC/MDIO access mode, carrying each register
//!   operation over a standard MDIO bus
//!
//! The transport is chosen once, when the bus context is built, by picking
//! the type. A bus context never mixes both.
//!
//! # Exclusive Access
//!
//! All operations take `&mut self`, so a transaction can never interleave
//! with another one on the same transport. [`read_modify_write`] is provided
//! on the trait for the same reason: the read and the write happen under one
//! borrow. Use [`SharedSwitch`](crate::sync::SharedSwitch) when several
//! contexts need the same chip.
//!
//! [`read_modify_write`]: RegisterBus::read_modify_write

pub mod engine;
pub mod tunnel;

pub use engine::{SmiConfig, SmiEngine, Transaction};
pub use tunnel::MdioTunnel;

use crate::constants::SMI_REGISTER_MASK;
use crate::error::{Error, Result};

// =============================================================================
// Register Bus Trait
// =============================================================================

/// Register-level access to the switch chip
pub trait RegisterBus {
    /// Read a register
    fn read_register(&mut self, addr: u32) -> Result<u32>;

    /// Write a register and wait for the chip to acknowledge it
    fn write_register(&mut self, addr: u32, data: u32) -> Result<()>;

    /// Write a register without waiting for the final acknowledge
    ///
    /// Used for commands whose completion cannot be observed, such as a
    /// chip reset that also resets the management interface.
    fn write_register_noack(&mut self, addr: u32, data: u32) -> Result<()>;

    /// Replace the bits selected by `mask` with the same bits of `data`
    ///
    /// Bits outside `mask` keep their current value. `mask = 0` writes the
    /// current value back unchanged.
    fn read_modify_write(&mut self, addr: u32, mask: u32, data: u32) -> Result<()> {
        let current = self.read_register(addr)?;
        self.write_register(addr, merge_masked(current, mask, data))
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read_register(&mut self, addr: u32) -> Result<u32> {
        (**self).read_register(addr)
    }

    fn write_register(&mut self, addr: u32, data: u32) -> Result<()> {
        (**self).write_register(addr, data)
    }

    fn write_register_noack(&mut self, addr: u32, data: u32) -> Result<()> {
        (**self).write_register_noack(addr, data)
    }

    fn read_modify_write(&mut self, addr: u32, mask: u32, data: u32) -> Result<()> {
        (**self).read_modify_write(addr, mask, data)
    }
}

/// Merge `data` into `current` under `mask`, truncated to the register width
#[inline]
pub const fn merge_masked(current: u32, mask: u32, data: u32) -> u32 {
    ((current & !mask) | (data & mask)) & SMI_REGISTER_MASK
}

/// Reject addresses and values that do not fit a 16-bit register
#[inline]
pub(crate) fn check_register(addr: u32, data: u32) -> Result<()> {
    if addr > SMI_REGISTER_MASK || data > SMI_REGISTER_MASK {
        return Err(Error::invalid_argument());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
