//! VLAN Table Engine
//!
//! Generic VLAN algorithms expressed purely through the chip operation
//! table. The chip holds two kinds of VLAN records:
//!
//! - **Member configurations**: a small number of slots, each describing one
//!   VLAN. A port's PVID is the VID of the slot its forwarding index points
//!   at.
//! - **4K table**: one entry per VID, used for tagged traffic and as the
//!   source of truth when a member configuration slot is (re)filled.
//!
//! Multi-step operations stop at the first failure and do not roll back.

use core::fmt;

use super::Switch;
use crate::chip::{ChipOps, Vlan4k, VlanMc};
use crate::constants::{VLAN_FID_MAX, VLAN_VID_MAX};
use crate::error::{Error, Result, VlanError};
use crate::smi::RegisterBus;

// =============================================================================
// Port Lists
// =============================================================================

/// One port of a VLAN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VlanPort {
    /// Port number
    pub port: u8,
    /// Frames leave the port tagged
    pub tagged: bool,
}

impl VlanPort {
    /// Port that sends untagged frames
    pub const fn untagged(port: u8) -> Self {
        Self {
            port,
            tagged: false,
        }
    }

    /// Port that sends tagged frames
    pub const fn tagged(port: u8) -> Self {
        Self { port, tagged: true }
    }
}

/// Member ports of a VLAN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VlanPorts {
    /// Member bitmap
    pub member: u16,
    /// Untagged bitmap
    pub untag: u16,
}

impl VlanPorts {
    /// Iterate over member ports in ascending order
    pub fn iter(&self) -> impl Iterator<Item = VlanPort> + '_ {
        (0..16u8)
            .filter(|&port| self.member & (1 << port) != 0)
            .map(|port| VlanPort {
                port,
                tagged: self.untag & (1 << port) == 0,
            })
    }
}

// =============================================================================
// VLAN Engine
// =============================================================================

impl<B: RegisterBus, C: ChipOps> Switch<B, C> {
    // -------------------------------------------------------------------------
    // Table access
    // -------------------------------------------------------------------------

    /// Read a member configuration slot
    pub fn get_vlan_mc(&mut self, index: u8) -> Result<VlanMc> {
        self.check_mc_index(index)?;
        self.chip.get_vlan_mc(&mut self.bus, index)
    }

    /// Write a member configuration slot
    pub fn set_vlan_mc(&mut self, index: u8, entry: &VlanMc) -> Result<()> {
        self.check_mc_index(index)?;
        entry.check(self.info.port_mask())?;
        self.chip.set_vlan_mc(&mut self.bus, index, entry)
    }

    /// Read the 4K table entry for `vid`
    pub fn get_vlan_4k(&mut self, vid: u16) -> Result<Vlan4k> {
        if vid > VLAN_VID_MAX {
            return Err(Error::invalid_argument());
        }
        self.chip.get_vlan_4k(&mut self.bus, vid)
    }

    /// Write a 4K table entry
    pub fn set_vlan_4k(&mut self, entry: &Vlan4k) -> Result<()> {
        entry.check(self.info.port_mask())?;
        self.chip.set_vlan_4k(&mut self.bus, entry)
    }

    /// Member configuration slot a port points at
    pub fn get_mc_index(&mut self, port: u8) -> Result<u8> {
        self.check_port(port)?;
        self.chip.get_mc_index(&mut self.bus, port)
    }

    /// Point a port at a member configuration slot
    pub fn set_mc_index(&mut self, port: u8, index: u8) -> Result<()> {
        self.check_port(port)?;
        self.check_mc_index(index)?;
        self.chip.set_mc_index(&mut self.bus, port, index)
    }

    /// Whether `vid` can be used in the current VLAN mode
    ///
    /// VID 0 is reserved and never valid.
    pub fn is_vlan_valid(&self, vid: u16) -> bool {
        if vid == 0 || vid > VLAN_VID_MAX {
            return false;
        }
        self.chip.is_vlan_valid(vid, self.vlan4k_enabled)
    }

    fn check_vid(&self, vid: u16) -> Result<()> {
        if !self.is_vlan_valid(vid) {
            return Err(Error::invalid_argument());
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Global switches
    // -------------------------------------------------------------------------

    /// Toggle VLAN processing
    ///
    /// Disabling VLAN processing also leaves the 4K table mode.
    pub fn enable_vlan(&mut self, enable: bool) -> Result<()> {
        self.chip.enable_vlan(&mut self.bus, enable)?;
        self.vlan_enabled = enable;

        if !enable && self.info.has_vlan_4k {
            self.vlan4k_enabled = false;
            self.chip.enable_vlan4k(&mut self.bus, false)?;
        }
        Ok(())
    }

    /// Toggle the 4K table mode
    ///
    /// Enabling it also enables VLAN processing. Chips without a 4K mode
    /// accept the request and do nothing.
    pub fn enable_vlan4k(&mut self, enable: bool) -> Result<()> {
        if !self.info.has_vlan_4k {
            return Ok(());
        }

        if enable {
            self.chip.enable_vlan(&mut self.bus, true)?;
            self.vlan_enabled = true;
        }

        self.chip.enable_vlan4k(&mut self.bus, enable)?;
        self.vlan4k_enabled = enable;
        Ok(())
    }

    /// Toggle forwarding on one port
    pub fn enable_port(&mut self, port: u8, enable: bool) -> Result<()> {
        self.check_port(port)?;
        self.chip.enable_port(&mut self.bus, port, enable)
    }

    /// Toggle forwarding on every port, the CPU port included
    pub fn enable_all_ports(&mut self, enable: bool) -> Result<()> {
        for port in 0..self.info.num_ports {
            self.chip.enable_port(&mut self.bus, port, enable)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Table maintenance
    // -------------------------------------------------------------------------

    /// Clear every member configuration slot and, if present, the 4K table
    ///
    /// VLAN processing and the 4K mode are switched off first, so the chip
    /// never filters against an empty table.
    pub fn reset_vlan(&mut self) -> Result<()> {
        self.enable_vlan(false)?;

        let empty = VlanMc::default();
        for index in 0..self.info.num_vlan_mc {
            self.chip.set_vlan_mc(&mut self.bus, index, &empty)?;
        }

        if self.info.has_vlan_4k {
            for vid in 1..=VLAN_VID_MAX {
                self.chip.set_vlan_4k(&mut self.bus, &Vlan4k::new(vid))?;
            }
        }
        Ok(())
    }

    /// Give every port its own VLAN shared with the CPU port
    ///
    /// Port `p` gets VLAN `p + 1` as PVID. The CPU port's VLAN contains all
    /// ports.
    pub fn init_vlan(&mut self) -> Result<()> {
        self.reset_vlan()?;

        let cpu_port = self.info.cpu_port;
        for port in 0..self.info.num_ports {
            let mask = if port == cpu_port {
                self.info.port_mask()
            } else {
                (1 << port) | (1 << cpu_port)
            };

            let vid = u16::from(port) + 1;
            self.set_vlan(vid, mask, mask, 0)?;
            self.set_pvid(port, vid)?;
        }

        self.enable_vlan(true)
    }

    /// Set the ports of a VLAN
    ///
    /// Updates the 4K entry and the member configuration slot that carries
    /// `vid`, if there is one.
    pub fn set_vlan(&mut self, vid: u16, member: u16, untag: u16, fid: u8) -> Result<()> {
        let port_mask = self.info.port_mask();
        if vid > VLAN_VID_MAX || member & !port_mask != 0 || untag & !port_mask != 0 {
            return Err(Error::invalid_argument());
        }
        if fid > VLAN_FID_MAX {
            return Err(Error::invalid_argument());
        }

        let mut entry = self.chip.get_vlan_4k(&mut self.bus, vid)?;
        entry.vid = vid;
        entry.member = member;
        entry.untag = untag;
        entry.fid = fid;
        self.chip.set_vlan_4k(&mut self.bus, &entry)?;

        for index in 0..self.info.num_vlan_mc {
            let mut mc = self.chip.get_vlan_mc(&mut self.bus, index)?;
            if mc.vid == vid {
                mc.member = member;
                mc.untag = untag;
                mc.fid = fid;
                return self.chip.set_vlan_mc(&mut self.bus, index, &mc);
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Port VLAN IDs
    // -------------------------------------------------------------------------

    /// VID of the member configuration a port points at
    pub fn get_pvid(&mut self, port: u8) -> Result<u16> {
        self.check_port(port)?;
        let index = self.chip.get_mc_index(&mut self.bus, port)?;
        self.check_mc_index(index)?;
        let mc = self.chip.get_vlan_mc(&mut self.bus, index)?;
        Ok(mc.vid)
    }

    /// Set the VLAN a port assigns to untagged frames
    ///
    /// Reuses the member configuration that already carries `vid`. Otherwise
    /// a free slot, or failing that one no port points at, is filled from
    /// the 4K entry of `vid`.
    ///
    /// # Errors
    ///
    /// Returns [`VlanError::NoFreeMemberConfig`] if every slot is in use.
    pub fn set_pvid(&mut self, port: u8, vid: u16) -> Result<()> {
        self.check_port(port)?;
        self.check_vid(vid)?;

        for index in 0..self.info.num_vlan_mc {
            let mc = self.chip.get_vlan_mc(&mut self.bus, index)?;
            if mc.vid == vid {
                return self.chip.set_mc_index(&mut self.bus, port, index);
            }
        }

        for index in 0..self.info.num_vlan_mc {
            let mc = self.chip.get_vlan_mc(&mut self.bus, index)?;
            if mc.is_empty() {
                return self.claim_mc(index, port, vid);
            }
        }

        for index in 0..self.info.num_vlan_mc {
            if !self.mc_is_used(index)? {
                return self.claim_mc(index, port, vid);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("all VLAN member configurations are in use");

        Err(VlanError::NoFreeMemberConfig.into())
    }

    /// Whether any port points at member configuration `index`
    pub fn mc_is_used(&mut self, index: u8) -> Result<bool> {
        self.check_mc_index(index)?;
        for port in 0..self.info.num_ports {
            if self.chip.get_mc_index(&mut self.bus, port)? == index {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn claim_mc(&mut self, index: u8, port: u8, vid: u16) -> Result<()> {
        let entry = self.chip.get_vlan_4k(&mut self.bus, vid)?;
        let mc = VlanMc::from_4k(&Vlan4k { vid, ..entry });
        self.chip.set_vlan_mc(&mut self.bus, index, &mc)?;
        self.chip.set_mc_index(&mut self.bus, port, index)
    }

    // -------------------------------------------------------------------------
    // Per-VLAN attributes
    // -------------------------------------------------------------------------

    /// Filtering database ID of a VLAN
    pub fn vlan_fid(&mut self, vid: u16) -> Result<u8> {
        self.check_vid(vid)?;
        Ok(self.chip.get_vlan_4k(&mut self.bus, vid)?.fid)
    }

    /// Move a VLAN to another filtering database
    pub fn set_vlan_fid(&mut self, vid: u16, fid: u8) -> Result<()> {
        if fid > VLAN_FID_MAX {
            return Err(Error::invalid_argument());
        }
        self.check_vid(vid)?;

        let entry = self.chip.get_vlan_4k(&mut self.bus, vid)?;
        self.set_vlan(vid, entry.member, entry.untag, fid)
    }

    /// Member ports of a VLAN
    pub fn vlan_ports(&mut self, vid: u16) -> Result<VlanPorts> {
        self.check_vid(vid)?;
        let entry = self.chip.get_vlan_4k(&mut self.bus, vid)?;
        Ok(VlanPorts {
            member: entry.member,
            untag: entry.untag,
        })
    }

    /// Replace the member ports of a VLAN
    ///
    /// Each listed port also gets `vid` as PVID so the VLAN has a member
    /// configuration. The filtering database ID is kept.
    pub fn set_vlan_ports(&mut self, vid: u16, ports: &[VlanPort]) -> Result<()> {
        self.check_vid(vid)?;

        let mut member = 0u16;
        let mut untag = 0u16;
        for port in ports {
            self.check_port(port.port)?;
            member |= 1 << port.port;
            if !port.tagged {
                untag |= 1 << port.port;
            }
        }

        for port in ports {
            self.set_pvid(port.port, vid)?;
        }

        let entry = self.chip.get_vlan_4k(&mut self.bus, vid)?;
        self.set_vlan(vid, member, untag, entry.fid)
    }

    /// Write a one-line summary of a VLAN
    ///
    /// ```text
    /// VLAN 2: Ports: '0t15', members=0023, untag=0021, fid=0
    /// ```
    ///
    /// Tagged ports carry a `t` suffix.
    pub fn write_vlan_info<W: fmt::Write>(&mut self, vid: u16, out: &mut W) -> Result<()> {
        self.check_vid(vid)?;
        let entry = self.chip.get_vlan_4k(&mut self.bus, vid)?;

        write!(out, "VLAN {}: Ports: '", entry.vid)?;
        for port in 0..self.info.num_ports {
            if entry.member & (1 << port) == 0 {
                continue;
            }
            let suffix = if entry.untag & (1 << port) != 0 { "" } else { "t" };
            write!(out, "{port}{suffix}")?;
        }
        write!(
            out,
            "', members={:04x}, untag={:04x}, fid={}",
            entry.member, entry.untag, entry.fid
        )?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
