//! MDC/MDIO Access Mode
//!
//! Some hosts reach the switch over their MAC's MDIO bus instead of two
//! spare GPIOs. In that mode the chip answers on one PHY address and
//! exposes a small set of emulation registers; a switch register access is
//! a fixed sequence of Clause 22 writes to those registers.
//!
//! Every emulation register write must be preceded by a write of the start
//! opcode to the start register. The sequences are:
//!
//! ```text
//! read:  CTRL0 = ADDR_OP, ADDRESS = addr, CTRL1 = READ_OP, read DATA_READ
//! write: CTRL0 = ADDR_OP, ADDRESS = addr, DATA_WRITE = data, CTRL1 = WRITE_OP
//! ```

use super::{RegisterBus, check_register};
use crate::constants::{
    MDC_MDIO_ADDR_OP, MDC_MDIO_ADDRESS_REG, MDC_MDIO_CTRL0_REG, MDC_MDIO_CTRL1_REG,
    MDC_MDIO_DATA_READ_REG, MDC_MDIO_DATA_WRITE_REG, MDC_MDIO_PHY_ID, MDC_MDIO_READ_OP,
    MDC_MDIO_START_OP, MDC_MDIO_START_REG, MDC_MDIO_WRITE_OP,
};
use crate::error::Result;
use crate::hal::mdio::MdioBus;

/// Switch register transport over an external MDIO bus
///
/// # Example
///
/// ```ignore
/// use rtl8366_smi::smi::{MdioTunnel, RegisterBus};
///
/// let mut bus = MdioTunnel::new(mac_mdio);
/// let chip_id = bus.read_register(0x0509)?;
/// ```
#[derive(Debug)]
pub struct MdioTunnel<M: MdioBus> {
    mdio: M,
    phy_id: u8,
}

impl<M: MdioBus> MdioTunnel<M> {
    /// Create a tunnel to a chip strapped to the default PHY address
    pub const fn new(mdio: M) -> Self {
        Self::with_phy_id(mdio, MDC_MDIO_PHY_ID)
    }

    /// Create a tunnel to a chip answering on `phy_id`
    pub const fn with_phy_id(mdio: M, phy_id: u8) -> Self {
        Self { mdio, phy_id }
    }

    /// PHY address the chip answers on
    pub fn phy_id(&self) -> u8 {
        self.phy_id
    }

    /// Access the underlying MDIO bus
    pub fn mdio(&self) -> &M {
        &self.mdio
    }

    /// Consume the tunnel and return the MDIO bus
    pub fn into_inner(self) -> M {
        self.mdio
    }

    fn start(&mut self) -> Result<()> {
        self.mdio
            .write(self.phy_id, MDC_MDIO_START_REG, MDC_MDIO_START_OP)
    }

    fn emulation_write(&mut self, reg: u8, value: u16) -> Result<()> {
        self.start()?;
        self.mdio.write(self.phy_id, reg, value)
    }
}

impl<M: MdioBus> RegisterBus for MdioTunnel<M> {
    fn read_register(&mut self, addr: u32) -> Result<u32> {
        check_register(addr, 0)?;

        self.emulation_write(MDC_MDIO_CTRL0_REG, MDC_MDIO_ADDR_OP)?;
        self.emulation_write(MDC_MDIO_ADDRESS_REG, addr as u16)?;
        self.emulation_write(MDC_MDIO_CTRL1_REG, MDC_MDIO_READ_OP)?;

        self.start()?;
        let value = self.mdio.read(self.phy_id, MDC_MDIO_DATA_READ_REG)?;
        Ok(u32::from(value))
    }

    fn write_register(&mut self, addr: u32, data: u32) -> Result<()> {
        check_register(addr, data)?;

        self.emulation_write(MDC_MDIO_CTRL0_REG, MDC_MDIO_ADDR_OP)?;
        self.emulation_write(MDC_MDIO_ADDRESS_REG, addr as u16)?;
        self.emulation_write(MDC_MDIO_DATA_WRITE_REG, data as u16)?;
        self.emulation_write(MDC_MDIO_CTRL1_REG, MDC_MDIO_WRITE_OP)
    }

    // MDIO has no acknowledge to skip
    fn write_register_noack(&mut self, addr: u32, data: u32) -> Result<()> {
        self.write_register(addr, data)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
