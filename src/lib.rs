//! RTL8366 SMI Switch Driver
//!
//! A `no_std`, `no_alloc` driver core for the Realtek RTL8366 family of
//! managed Ethernet switches, reached over the chip's two-wire SMI
//! management bus.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **HAL Layer** ([`hal`]): SMI control lines, MDIO bus and reset line
//! 2. **Transport Layer** ([`smi`]): register access over bit-banged SMI or
//!    the MDC/MDIO tunnel, behind [`RegisterBus`]
//! 3. **Chip Layer** ([`chip`]): per-variant register layouts behind
//!    [`ChipOps`]
//! 4. **Switch Layer** ([`switch`]): the bus context with the VLAN table
//!    engine, MIB counters and embedded PHY access
//!
//! Chip variants are added by implementing [`ChipOps`]. The driver itself
//! carries no variant register maps.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for error types and driver logging
//!
//! # Example
//!
//! ```ignore
//! use rtl8366_smi::hal::GpioLines;
//! use rtl8366_smi::smi::{SmiConfig, SmiEngine};
//! use rtl8366_smi::switch::{Switch, VlanPort};
//!
//! let lines = GpioLines::new(sck, sda, delay);
//! let smi = SmiEngine::new(lines, SmiConfig::new());
//!
//! let mut switch = Switch::attach(smi, Rtl8366rb::new())?;
//!
//! // VLAN 100 on ports 0 and 1, tagged towards the CPU port
//! let cpu = switch.info().cpu_port;
//! switch.set_vlan_ports(
//!     100,
//!     &[VlanPort::untagged(0), VlanPort::untagged(1), VlanPort::tagged(cpu)],
//! )?;
//! ```
//!
//! # Shared Access
//!
//! Every [`Switch`] operation takes `&mut self`. When interrupt handlers
//! and tasks need the same chip, place it in a [`SharedSwitch`] instead.

#![no_std]
#![deny(missing_docs)]
// Clippy lint levels live in Cargo.toml.

// =============================================================================
// Modules
// =============================================================================

pub mod chip;
pub mod constants;
pub mod error;
pub mod hal;
pub mod smi;
pub mod switch;
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use chip::{ChipInfo, ChipOps, MibCounter, Vlan4k, VlanMc};
pub use error::{BusError, BusResult, ConfigError, Error, Result, VlanError};
pub use hal::{GpioLines, HardwareReset, MdioBus, ResetPolarity, SmiLines};
pub use smi::{MdioTunnel, RegisterBus, SmiConfig, SmiEngine};
pub use switch::{PortStats, Switch, SwitchMii, VlanPort, VlanPorts};
pub use sync::{CriticalSectionCell, SharedSwitch};
