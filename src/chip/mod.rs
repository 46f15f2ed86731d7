//! Switch Chip Variants
//!
//! This module provides the chip operation table trait and the
//! layout-independent records it exchanges with the switch layer.
//!
//! # Architecture
//!
//! Chip variants differ in register layout but share the same VLAN and
//! statistics model. A variant implements [`ChipOps`] against a
//! [`RegisterBus`](crate::smi::RegisterBus), which keeps it independent of
//! the transport:
//!
//! - The same variant runs over bit-banged SMI or the MDIO tunnel
//! - New variants only add a register map
//! - Variants can be tested against a mock register bus
//!
//! # Example
//!
//! ```ignore
//! use rtl8366_smi::smi::{SmiConfig, SmiEngine};
//! use rtl8366_smi::switch::Switch;
//!
//! let smi = SmiEngine::new(lines, SmiConfig::new());
//! let mut switch = Switch::attach(smi, Rtl8366rb::new())?;
//!
//! switch.set_vlan(100, 0x0023, 0x0003, 0)?;
//! switch.set_pvid(0, 100)?;
//! ```

pub mod ops;
pub mod types;

pub use ops::ChipOps;
pub use types::{ChipInfo, MibCounter, Vlan4k, VlanMc};
