//! Error types for the RTL8366 SMI driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`BusError`]: Line-level and acknowledgement failures
//! - [`ConfigError`]: Rejected arguments and chip description problems
//! - [`VlanError`]: VLAN table resource exhaustion
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Bus Errors
// =============================================================================

/// Transport errors raised while a register transaction is on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The chip did not acknowledge within the retry budget
    AckTimeout,
    /// A control line could not be driven or sampled
    BusUnavailable,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BusError::AckTimeout => "acknowledge timeout",
            BusError::BusUnavailable => "bus lines unavailable",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Argument and configuration errors
///
/// These are always detected before any bus access is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Index, VID, port or value outside the configured bounds
    InvalidArgument,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// Chip description reported by `detect` is inconsistent
    InvalidChipInfo,
    /// No supported chip answered on the bus
    ChipNotDetected,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidArgument => "invalid argument",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidChipInfo => "invalid chip description",
            ConfigError::ChipNotDetected => "chip not detected",
        }
    }
}

// =============================================================================
// VLAN Errors
// =============================================================================

/// VLAN table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VlanError {
    /// Every member configuration slot is referenced by a port
    NoFreeMemberConfig,
}

impl core::fmt::Display for VlanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VlanError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            VlanError::NoFreeMemberConfig => "all VLAN member configurations are in use",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Bus(BusError::AckTimeout)) => { /* retry the whole operation */ }
///     Err(Error::Config(ConfigError::InvalidArgument)) => { /* caller bug */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus error
    Bus(BusError),
    /// Configuration error
    Config(ConfigError),
    /// VLAN table error
    Vlan(VlanError),
    /// A report sink refused more output
    Format,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus: {}", e.as_str()),
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Vlan(e) => write!(f, "vlan: {}", e.as_str()),
            Error::Format => f.write_str("report output overflow"),
        }
    }
}

impl Error {
    /// Shorthand for `Error::Config(ConfigError::InvalidArgument)`
    pub(crate) const fn invalid_argument() -> Self {
        Error::Config(ConfigError::InvalidArgument)
    }
}

// From impls for automatic conversion
impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Bus(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<VlanError> for Error {
    fn from(e: VlanError) -> Self {
        Error::Vlan(e)
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for bus operations
pub type BusResult<T> = core::result::Result<T, BusError>;

// =============================================================================
// Unit Tests
// =============================================================================
