//! Hardware Abstraction Layer
//!
//! This module provides the board-facing pieces of the driver: the two SMI
//! control lines, the MDIO bus abstraction and the switch reset line.
//!
//! # Modules
//!
//! - [`gpio`]: SMI line driver trait and the bit-banged GPIO implementation
//! - [`mdio`]: MDIO bus trait shared by the tunnel transport and the MII facade
//! - [`reset`]: Hardware reset line with datasheet settle times
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL (e.g., `esp_hal::delay::Delay`).

pub mod gpio;
pub mod mdio;
pub mod reset;

// Re-export commonly used types
pub use gpio::{GpioLines, SmiLines};
pub use mdio::MdioBus;
pub use reset::{HardwareReset, ResetPolarity, ResetState};
