//! MDIO (Management Data Input/Output) HAL
//!
//! This module defines the Clause 22 MDIO bus abstraction used on both sides
//! of the switch:
//!
//! - As a **transport**: hosts whose MAC only speaks MDIO reach the switch
//!   registers through [`MdioTunnel`](crate::smi::MdioTunnel), which drives
//!   an [`MdioBus`] supplied by the platform.
//! - As a **facade**: the switch's embedded PHYs are exposed to the host as
//!   an [`MdioBus`] by [`SwitchMii`](crate::switch::SwitchMii).

use crate::constants::{MAX_PHY_ADDR, MAX_PHY_REG};
use crate::error::{ConfigError, Result};

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends, allowing the
/// switch driver to work with various MDIO implementations.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

impl<M: MdioBus + ?Sized> MdioBus for &mut M {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        (**self).read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        (**self).write(phy_addr, reg_addr, value)
    }
}

/// Validate a Clause 22 PHY/register address pair
pub fn check_address(phy_addr: u8, reg_addr: u8) -> Result<()> {
    if phy_addr > MAX_PHY_ADDR {
        return Err(ConfigError::InvalidPhyAddress.into());
    }
    if reg_addr > MAX_PHY_REG {
        return Err(ConfigError::InvalidArgument.into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
