//! Switch Bus Context
//!
//! [`Switch`] is the one object that owns a physical chip: the register
//! transport, the chip operation table and the description the chip
//! reported during detection. Everything above the transport goes through
//! it, and every operation takes `&mut self`, so no two register
//! transactions can interleave.
//!
//! # Lifecycle
//!
//! ```text
//! probe:        detect -> validate ChipInfo
//! attach:       probe -> reset_chip -> setup -> init_vlan
//! reset_switch: reset_chip -> setup -> reset_vlan -> enable_vlan -> enable_all_ports
//! ```
//!
//! # Submodules
//!
//! - [`vlan`]: VLAN table engine
//! - [`mib`]: MIB counters and per-port reports
//! - [`mii`]: embedded PHY access through the chip

pub mod mib;
pub mod mii;
pub mod vlan;

pub use mib::PortStats;
pub use mii::SwitchMii;
pub use vlan::{VlanPort, VlanPorts};

use crate::chip::{ChipInfo, ChipOps};
use crate::error::{Error, Result};
use crate::smi::RegisterBus;

/// Bus context for one switch chip
///
/// # Example
///
/// ```ignore
/// use rtl8366_smi::hal::GpioLines;
/// use rtl8366_smi::smi::{SmiConfig, SmiEngine};
/// use rtl8366_smi::switch::Switch;
///
/// let smi = SmiEngine::new(GpioLines::new(sck, sda, delay), SmiConfig::new());
/// let mut switch = Switch::attach(smi, Rtl8366rb::new())?;
///
/// let ports = switch.info().num_ports;
/// switch.enable_all_ports(true)?;
/// ```
#[derive(Debug)]
pub struct Switch<B: RegisterBus, C: ChipOps> {
    /// Register transport
    bus: B,
    /// Chip operation table
    chip: C,
    /// Capacities reported by the chip
    info: ChipInfo,
    /// VLAN processing enabled
    vlan_enabled: bool,
    /// 4K table mode enabled
    vlan4k_enabled: bool,
}

impl<B: RegisterBus, C: ChipOps> Switch<B, C> {
    /// Detect the chip without changing its configuration
    ///
    /// # Errors
    ///
    /// Returns the chip's detection error, or
    /// [`ConfigError::InvalidChipInfo`](crate::error::ConfigError::InvalidChipInfo)
    /// if the reported capacities are inconsistent.
    pub fn probe(mut bus: B, mut chip: C) -> Result<Self> {
        let info = chip.detect(&mut bus)?;
        info.validate()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "switch detected: id={=u32:#x} ver={} ports={} cpu={}",
            info.chip_id,
            info.chip_ver,
            info.num_ports,
            info.cpu_port
        );

        Ok(Self {
            bus,
            chip,
            info,
            vlan_enabled: false,
            vlan4k_enabled: false,
        })
    }

    /// Detect, reset and configure the chip
    ///
    /// After attaching every port sits in its own VLAN (`port + 1`) shared
    /// with the CPU port, and VLAN processing is on.
    pub fn attach(bus: B, chip: C) -> Result<Self> {
        let mut switch = Self::probe(bus, chip)?;

        switch.chip.reset_chip(&mut switch.bus)?;
        switch.chip.setup(&mut switch.bus)?;
        switch.init_vlan()?;

        #[cfg(feature = "defmt")]
        defmt::info!("switch attached");

        Ok(switch)
    }

    /// Reset the chip and return it to a flat, all-ports-forwarding state
    pub fn reset_switch(&mut self) -> Result<()> {
        self.chip.reset_chip(&mut self.bus)?;
        self.chip.setup(&mut self.bus)?;
        self.reset_vlan()?;
        self.enable_vlan(true)?;
        self.enable_all_ports(true)
    }

    /// Get the chip description
    pub fn info(&self) -> &ChipInfo {
        &self.info
    }

    /// Whether VLAN processing is enabled
    pub fn is_vlan_enabled(&self) -> bool {
        self.vlan_enabled
    }

    /// Whether the 4K table mode is enabled
    pub fn is_vlan4k_enabled(&self) -> bool {
        self.vlan4k_enabled
    }

    /// Access the register transport
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Access the register transport mutably
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Access the chip operation table
    pub fn chip(&self) -> &C {
        &self.chip
    }

    /// Detach and return the transport and operation table
    pub fn release(self) -> (B, C) {
        (self.bus, self.chip)
    }

    // =========================================================================
    // Register Access
    // =========================================================================

    /// Read a chip register
    pub fn read_register(&mut self, addr: u32) -> Result<u32> {
        self.bus.read_register(addr)
    }

    /// Write a chip register
    pub fn write_register(&mut self, addr: u32, data: u32) -> Result<()> {
        self.bus.write_register(addr, data)
    }

    /// Write a chip register without waiting for the final acknowledge
    pub fn write_register_noack(&mut self, addr: u32, data: u32) -> Result<()> {
        self.bus.write_register_noack(addr, data)
    }

    /// Update the bits of a chip register selected by `mask`
    pub fn read_modify_write(&mut self, addr: u32, mask: u32, data: u32) -> Result<()> {
        self.bus.read_modify_write(addr, mask, data)
    }

    // =========================================================================
    // Argument Checks
    // =========================================================================

    pub(crate) fn check_port(&self, port: u8) -> Result<()> {
        if port >= self.info.num_ports {
            return Err(Error::invalid_argument());
        }
        Ok(())
    }

    pub(crate) fn check_mc_index(&self, index: u8) -> Result<()> {
        if index >= self.info.num_vlan_mc {
            return Err(Error::invalid_argument());
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
