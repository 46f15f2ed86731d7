//! Chip Description and Table Entry Types
//!
//! Register-layout independent representations of what a chip variant
//! reports about itself and of the VLAN and MIB records the switch layer
//! moves through the operation table.

use crate::constants::{MAX_PORTS, VLAN_FID_MAX, VLAN_PRIORITY_MAX, VLAN_VID_MAX};
use crate::error::{ConfigError, Result};

// =============================================================================
// MIB Counter Descriptor
// =============================================================================

/// Location of one statistic in the chip's counter memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MibCounter {
    /// Base register of the counter block
    pub base: u32,
    /// Offset of the counter within the block
    pub offset: u32,
    /// Counter length in 16-bit words
    pub length: u32,
    /// Display name
    pub name: &'static str,
}

impl MibCounter {
    /// Create a counter descriptor
    pub const fn new(base: u32, offset: u32, length: u32, name: &'static str) -> Self {
        Self {
            base,
            offset,
            length,
            name,
        }
    }
}

// =============================================================================
// Chip Description
// =============================================================================

/// What a chip variant reports during detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Chip identification register value
    pub chip_id: u32,
    /// Chip revision
    pub chip_ver: u32,
    /// Port connected to the host CPU
    pub cpu_port: u8,
    /// Number of ports, CPU port included
    pub num_ports: u8,
    /// Number of VLAN member configuration slots
    pub num_vlan_mc: u8,
    /// Counter descriptors, indexed by counter number
    pub mib_counters: &'static [MibCounter],
    /// Chip has the VID-indexed 4K VLAN table mode
    pub has_vlan_4k: bool,
}

impl ChipInfo {
    /// Number of MIB counters per port
    pub fn num_mib_counters(&self) -> usize {
        self.mib_counters.len()
    }

    /// Bitmap with one bit set per port
    pub fn port_mask(&self) -> u16 {
        if self.num_ports >= MAX_PORTS {
            u16::MAX
        } else {
            (1u16 << self.num_ports) - 1
        }
    }

    /// Check that the description is usable
    ///
    /// Port bitmaps are 16 bits wide, the CPU port must be one of the ports
    /// and there must be at least one member configuration slot.
    pub fn validate(&self) -> Result<()> {
        if self.num_ports == 0
            || self.num_ports > MAX_PORTS
            || self.cpu_port >= self.num_ports
            || self.num_vlan_mc == 0
        {
            return Err(ConfigError::InvalidChipInfo.into());
        }
        Ok(())
    }
}

// =============================================================================
// VLAN Entries
// =============================================================================

/// VLAN member configuration slot
///
/// An entry with VID 0 and no members is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VlanMc {
    /// VLAN ID
    pub vid: u16,
    /// Ports that send untagged frames
    pub untag: u16,
    /// Member ports
    pub member: u16,
    /// Filtering database ID
    pub fid: u8,
    /// 802.1p priority
    pub priority: u8,
}

impl VlanMc {
    /// Whether the slot holds no VLAN
    pub fn is_empty(&self) -> bool {
        self.vid == 0 && self.member == 0
    }

    /// Build a slot for `vid` from its 4K table entry
    pub fn from_4k(entry: &Vlan4k) -> Self {
        Self {
            vid: entry.vid,
            untag: entry.untag,
            member: entry.member,
            fid: entry.fid,
            priority: 0,
        }
    }

    pub(crate) fn check(&self, port_mask: u16) -> Result<()> {
        if self.vid > VLAN_VID_MAX
            || self.fid > VLAN_FID_MAX
            || self.priority > VLAN_PRIORITY_MAX
            || self.member & !port_mask != 0
            || self.untag & !port_mask != 0
        {
            return Err(ConfigError::InvalidArgument.into());
        }
        Ok(())
    }
}

/// VID-indexed VLAN table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vlan4k {
    /// VLAN ID
    pub vid: u16,
    /// Ports that send untagged frames
    pub untag: u16,
    /// Member ports
    pub member: u16,
    /// Filtering database ID
    pub fid: u8,
}

impl Vlan4k {
    /// Create an entry for `vid` with no members
    pub const fn new(vid: u16) -> Self {
        Self {
            vid,
            untag: 0,
            member: 0,
            fid: 0,
        }
    }

    pub(crate) fn check(&self, port_mask: u16) -> Result<()> {
        if self.vid > VLAN_VID_MAX
            || self.fid > VLAN_FID_MAX
            || self.member & !port_mask != 0
            || self.untag & !port_mask != 0
        {
            return Err(ConfigError::InvalidArgument.into());
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
