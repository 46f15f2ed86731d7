//! MIB Counters
//!
//! Per-port traffic statistics. Counter numbers index the descriptor table
//! the chip reported in [`ChipInfo::mib_counters`](crate::chip::ChipInfo).

use core::fmt;

use super::Switch;
use crate::chip::ChipOps;
use crate::error::{Error, Result};
use crate::smi::RegisterBus;

/// Byte counters of one port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortStats {
    /// Bytes sent
    pub tx_bytes: u64,
    /// Bytes received
    pub rx_bytes: u64,
}

impl<B: RegisterBus, C: ChipOps> Switch<B, C> {
    /// Read MIB counter `counter` of `port`
    pub fn mib_counter(&mut self, counter: usize, port: u8) -> Result<u64> {
        self.check_port(port)?;
        let descriptor = *self
            .info
            .mib_counters
            .get(counter)
            .ok_or(Error::invalid_argument())?;

        self.chip.get_mib_counter(&mut self.bus, &descriptor, port)
    }

    /// Read the byte counters of `port`
    ///
    /// `tx_counter` and `rx_counter` are the chip's counter numbers for
    /// outgoing and incoming octets.
    pub fn port_stats(&mut self, port: u8, tx_counter: usize, rx_counter: usize) -> Result<PortStats> {
        Ok(PortStats {
            tx_bytes: self.mib_counter(tx_counter, port)?,
            rx_bytes: self.mib_counter(rx_counter, port)?,
        })
    }

    /// Write every MIB counter of `port`, one per line
    ///
    /// Counters that cannot be read are reported as `[error]` and do not stop
    /// the report.
    pub fn write_port_mib<W: fmt::Write>(&mut self, port: u8, out: &mut W) -> Result<()> {
        self.check_port(port)?;

        let counters = self.info.mib_counters;
        writeln!(out, "Port {port} MIB counters")?;
        for descriptor in counters {
            write!(out, "{:<36}: ", descriptor.name)?;
            match self.chip.get_mib_counter(&mut self.bus, descriptor, port) {
                Ok(value) => writeln!(out, "{value}")?,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("MIB counter {} of port {}: {}", descriptor.name, port, _e);
                    writeln!(out, "[error]")?;
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
