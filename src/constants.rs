//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers used
//! by the SMI transaction engine, the MDIO tunnel and the VLAN engine.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **SMI protocol**: Command codes, field widths, ack retry budget
//! - **Timing**: Clock edge delay, hardware reset settle times
//! - **MDIO tunnel**: Emulation register numbers and opcodes
//! - **VLAN**: VID and FID ranges
//!
//! # Note
//!
//! Chip-specific register maps are not defined here. Every register address
//! used by the VLAN and MIB layers comes from the chip operation table.

// =============================================================================
// SMI Protocol
// =============================================================================

/// Number of times an ack slot is sampled before the transaction fails
pub const SMI_ACK_RETRY_COUNT: u8 = 5;

/// Default SMI read command (RTL8366RB / RTL8366S)
pub const SMI_CMD_READ: u8 = 0xA9;

/// Default SMI write command (RTL8366RB / RTL8366S)
pub const SMI_CMD_WRITE: u8 = 0xA8;

/// Width of every field shifted on the wire
pub const SMI_BYTE_BITS: u8 = 8;

/// Register addresses and values are 16 bits wide on the wire
pub const SMI_REGISTER_MASK: u32 = 0xFFFF;

// =============================================================================
// Timing
// =============================================================================

/// Default delay between line edges in nanoseconds
pub const SMI_CLK_DELAY_NS: u32 = 10;

/// Settle time with the chip held in reset, in milliseconds
pub const SMI_HW_STOP_DELAY_MS: u32 = 25;

/// Settle time after releasing reset, in milliseconds
pub const SMI_HW_START_DELAY_MS: u32 = 100;

// =============================================================================
// MDIO Tunnel (MDC/MDIO access mode)
// =============================================================================

/// PHY address the chip answers to in MDC/MDIO mode
pub const MDC_MDIO_PHY_ID: u8 = 0;

/// Control register 0 (address phase)
pub const MDC_MDIO_CTRL0_REG: u8 = 31;

/// Start register; must be written before every other tunnel register
pub const MDC_MDIO_START_REG: u8 = 29;

/// Control register 1 (read/write phase)
pub const MDC_MDIO_CTRL1_REG: u8 = 21;

/// Target register address
pub const MDC_MDIO_ADDRESS_REG: u8 = 23;

/// Value to be written
pub const MDC_MDIO_DATA_WRITE_REG: u8 = 24;

/// Value read back
pub const MDC_MDIO_DATA_READ_REG: u8 = 25;

/// Start opcode
pub const MDC_MDIO_START_OP: u16 = 0xFFFF;

/// Address opcode
pub const MDC_MDIO_ADDR_OP: u16 = 0x000E;

/// Read opcode
pub const MDC_MDIO_READ_OP: u16 = 0x0001;

/// Write opcode
pub const MDC_MDIO_WRITE_OP: u16 = 0x0003;

// =============================================================================
// MII
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid PHY register address (5-bit field)
pub const MAX_PHY_REG: u8 = 31;

// =============================================================================
// VLAN
// =============================================================================

/// Highest VLAN ID (12-bit field); VID 0 is reserved
pub const VLAN_VID_MAX: u16 = 0x0FFF;

/// Highest filtering database ID
pub const VLAN_FID_MAX: u8 = 7;

/// Highest 802.1p priority in a member configuration
pub const VLAN_PRIORITY_MAX: u8 = 7;

/// Highest port count a 16-bit member bitmap can describe
pub const MAX_PORTS: u8 = 16;
