//! Embedded PHY Access
//!
//! The switch's internal PHYs are not on the host's MDIO bus; they are
//! reached through chip registers. [`SwitchMii`] hides that and presents the
//! PHYs as an ordinary [`MdioBus`], so existing PHY code can drive them.

use super::Switch;
use crate::chip::ChipOps;
use crate::error::Result;
use crate::hal::mdio::{MdioBus, check_address};
use crate::smi::RegisterBus;

impl<B: RegisterBus, C: ChipOps> Switch<B, C> {
    /// Read a register of an embedded PHY
    pub fn mdio_read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        check_address(phy_addr, reg_addr)?;
        self.chip.mii_read(&mut self.bus, phy_addr, reg_addr)
    }

    /// Write a register of an embedded PHY
    pub fn mdio_write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        check_address(phy_addr, reg_addr)?;
        self.chip.mii_write(&mut self.bus, phy_addr, reg_addr, value)
    }

    /// Borrow the embedded PHYs as an MDIO bus
    pub fn mii(&mut self) -> SwitchMii<'_, B, C> {
        SwitchMii { switch: self }
    }
}

/// MDIO bus view of the switch's embedded PHYs
///
/// # Example
///
/// ```ignore
/// let mut mii = switch.mii();
/// let bmsr = mii.read(2, 1)?;
/// ```
#[derive(Debug)]
pub struct SwitchMii<'a, B: RegisterBus, C: ChipOps> {
    switch: &'a mut Switch<B, C>,
}

impl<B: RegisterBus, C: ChipOps> MdioBus for SwitchMii<'_, B, C> {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.switch.mdio_read(phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.switch.mdio_write(phy_addr, reg_addr, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
