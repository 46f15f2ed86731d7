//! Synchronization and Concurrency Support
//!
//! This module provides the critical-section based wrappers used when more
//! than one execution context talks to the same switch:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!
//! - **Shared Wrappers** (`shared`): ISR-safe switch wrapper
//!   - [`SharedSwitch`] - Critical-section protected bus context
//!
//! A single owner does not need any of this: every [`Switch`] operation
//! takes `&mut self`, which already rules out interleaved transactions.
//!
//! [`Switch`]: crate::switch::Switch
//!
//! # Example
//!
//! ```ignore
//! use rtl8366_smi::sync::SharedSwitch;
//!
//! static SWITCH: SharedSwitch<Smi, Rtl8366rb> = SharedSwitch::new();
//!
//! fn main() {
//!     SWITCH.install(Switch::attach(smi, Rtl8366rb::new()).unwrap());
//! }
//!
//! fn link_task() {
//!     // Safe from any context
//!     let stats = SWITCH.with(|switch| switch.port_stats(0, TX_OCTETS, RX_OCTETS));
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedSwitch;
