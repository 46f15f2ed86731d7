//! Chip Operation Table
//!
//! This module defines the interface every chip variant implements. The
//! switch layer never hardcodes a register address: it validates arguments
//! against [`ChipInfo`] and calls into the variant, which owns the register
//! layout and talks to the chip through a [`RegisterBus`].

use super::types::{ChipInfo, MibCounter, Vlan4k, VlanMc};
use crate::error::Result;
use crate::smi::RegisterBus;

/// Trait for switch chip variants
///
/// Methods receive the register transport on every call, the same way the
/// bus context owns it. Arguments have already been bounds-checked against
/// the [`ChipInfo`] returned by [`detect`](Self::detect) when they arrive
/// here.
///
/// # Example Implementation
///
/// ```ignore
/// struct Rtl8366rb;
///
/// impl ChipOps for Rtl8366rb {
///     fn detect<B: RegisterBus>(&mut self, bus: &mut B) -> Result<ChipInfo> {
///         match bus.read_register(RTL8366RB_CHIP_ID_REG)? {
///             RTL8366RB_CHIP_ID_8366 => Ok(RTL8366RB_INFO),
///             _ => Err(ConfigError::ChipNotDetected.into()),
///         }
///     }
///
///     // ... other methods
/// }
/// ```
pub trait ChipOps {
    /// Identify the chip and describe its capacities
    fn detect<B: RegisterBus>(&mut self, bus: &mut B) -> Result<ChipInfo>;

    /// Reset the chip core
    ///
    /// Variants that reset the management interface as well should issue the
    /// reset with [`RegisterBus::write_register_noack`].
    fn reset_chip<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()>;

    /// Bring the chip into its operating configuration after a reset
    fn setup<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()>;

    /// Read a register of an embedded PHY
    fn mii_read<B: RegisterBus>(&mut self, bus: &mut B, phy_addr: u8, reg_addr: u8)
    -> Result<u16>;

    /// Write a register of an embedded PHY
    fn mii_write<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        phy_addr: u8,
        reg_addr: u8,
        value: u16,
    ) -> Result<()>;

    /// Read a VLAN member configuration slot
    fn get_vlan_mc<B: RegisterBus>(&mut self, bus: &mut B, index: u8) -> Result<VlanMc>;

    /// Write a VLAN member configuration slot
    fn set_vlan_mc<B: RegisterBus>(&mut self, bus: &mut B, index: u8, entry: &VlanMc)
    -> Result<()>;

    /// Read the 4K table entry for `vid`
    fn get_vlan_4k<B: RegisterBus>(&mut self, bus: &mut B, vid: u16) -> Result<Vlan4k>;

    /// Write the 4K table entry for `entry.vid`
    fn set_vlan_4k<B: RegisterBus>(&mut self, bus: &mut B, entry: &Vlan4k) -> Result<()>;

    /// Member configuration slot a port forwards untagged frames with
    fn get_mc_index<B: RegisterBus>(&mut self, bus: &mut B, port: u8) -> Result<u8>;

    /// Point a port at a member configuration slot
    fn set_mc_index<B: RegisterBus>(&mut self, bus: &mut B, port: u8, index: u8) -> Result<()>;

    /// Read one MIB counter of a port
    fn get_mib_counter<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        counter: &MibCounter,
        port: u8,
    ) -> Result<u64>;

    /// Whether the chip accepts `vid` in its current VLAN mode
    ///
    /// VID 0 has already been rejected by the caller.
    fn is_vlan_valid(&self, vid: u16, vlan4k_enabled: bool) -> bool;

    /// Toggle VLAN processing
    fn enable_vlan<B: RegisterBus>(&mut self, bus: &mut B, enable: bool) -> Result<()>;

    /// Toggle the VID-indexed 4K table mode
    fn enable_vlan4k<B: RegisterBus>(&mut self, bus: &mut B, enable: bool) -> Result<()>;

    /// Toggle forwarding on one port
    fn enable_port<B: RegisterBus>(&mut self, bus: &mut B, port: u8, enable: bool)
    -> Result<()>;
}
