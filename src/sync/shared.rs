//! ISR-safe switch wrapper using critical sections.
//!
//! Provides [`SharedSwitch`] for callers in different execution contexts
//! that talk to the same chip.

use super::primitives::CriticalSectionCell;
use crate::chip::ChipOps;
use crate::error::{ConfigError, Result};
use crate::smi::RegisterBus;
use crate::switch::Switch;

/// ISR-safe switch wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, so a closure runs to
/// completion before any other context can touch the chip. Multi-step
/// sequences (read-modify-write, PVID changes, MIB reports) placed in one
/// closure are therefore never interleaved with another caller's
/// transactions.
///
/// The wrapper starts empty so it can live in a `static`; the attached
/// switch is installed afterwards.
///
/// # Example
///
/// ```ignore
/// static SWITCH: SharedSwitch<Smi, Rtl8366rb> = SharedSwitch::new();
///
/// SWITCH.install(Switch::attach(smi, Rtl8366rb::new())?);
///
/// SWITCH.with(|switch| switch.set_pvid(0, 100))??;
/// ```
#[derive(Debug)]
pub struct SharedSwitch<B: RegisterBus, C: ChipOps> {
    inner: CriticalSectionCell<Option<Switch<B, C>>>,
}

impl<B: RegisterBus, C: ChipOps> SharedSwitch<B, C> {
    /// Create an empty wrapper (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Create a wrapper around an attached switch.
    pub const fn from_switch(switch: Switch<B, C>) -> Self {
        Self {
            inner: CriticalSectionCell::new(Some(switch)),
        }
    }

    /// Install a switch, returning the previous one.
    pub fn install(&self, switch: Switch<B, C>) -> Option<Switch<B, C>> {
        self.inner.with(|slot| slot.replace(switch))
    }

    /// Remove the switch.
    pub fn take(&self) -> Option<Switch<B, C>> {
        self.inner.with(Option::take)
    }

    /// Whether a switch is installed.
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the switch.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ChipNotDetected`] if no switch is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Switch<B, C>) -> R,
    {
        self.inner
            .with(|slot| slot.as_mut().map(f))
            .ok_or(ConfigError::ChipNotDetected.into())
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<Result<R>>
    where
        F: FnOnce(&mut Switch<B, C>) -> R,
    {
        self.inner.try_with(|slot| {
            slot.as_mut()
                .map(f)
                .ok_or(ConfigError::ChipNotDetected.into())
        })
    }

    /// Consume the wrapper and return the switch.
    pub fn into_inner(self) -> Option<Switch<B, C>> {
        self.inner.into_inner()
    }

    // =========================================================================
    // Register Shortcuts
    // =========================================================================

    /// Read a chip register.
    pub fn read_register(&self, addr: u32) -> Result<u32> {
        self.with(|switch| switch.read_register(addr))?
    }

    /// Write a chip register.
    pub fn write_register(&self, addr: u32, data: u32) -> Result<()> {
        self.with(|switch| switch.write_register(addr, data))?
    }

    /// Update the bits of a chip register selected by `mask`.
    ///
    /// The read and the write happen inside one critical section.
    pub fn read_modify_write(&self, addr: u32, mask: u32, data: u32) -> Result<()> {
        self.with(|switch| switch.read_modify_write(addr, mask, data))?
    }
}

impl<B: RegisterBus, C: ChipOps> Default for SharedSwitch<B, C> {
    fn default() -> Self {
        Self::new()
    }
}
