//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the switch driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin, PinState};

use crate::chip::{ChipInfo, ChipOps, MibCounter, Vlan4k, VlanMc};
use crate::constants::{
    MDC_MDIO_ADDRESS_REG, MDC_MDIO_CTRL1_REG, MDC_MDIO_DATA_READ_REG, MDC_MDIO_DATA_WRITE_REG,
    MDC_MDIO_PHY_ID, MDC_MDIO_READ_OP, MDC_MDIO_START_OP, MDC_MDIO_START_REG, MDC_MDIO_WRITE_OP,
    SMI_CMD_READ, SMI_CMD_WRITE,
};
use crate::error::{BusError, BusResult, ConfigError, Error, Result};
use crate::hal::gpio::SmiLines;
use crate::hal::mdio::MdioBus;
use crate::smi::RegisterBus;

// =============================================================================
// Mock Pin
// =============================================================================

/// Mock GPIO pin
///
/// Remembers the last driven level. Reads return the driven level unless an
/// input level has been forced, which models another device pulling the
/// line.
#[derive(Debug)]
pub struct MockPin {
    level: Cell<PinState>,
    input: Cell<Option<PinState>>,
    failing: Cell<bool>,
}

impl Default for MockPin {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPin {
    /// Create a pin idling high
    pub fn new() -> Self {
        Self {
            level: Cell::new(PinState::High),
            input: Cell::new(None),
            failing: Cell::new(false),
        }
    }

    /// Last driven level
    pub fn level(&self) -> PinState {
        self.level.get()
    }

    /// Force the level seen by reads
    pub fn set_input(&self, level: PinState) {
        self.input.set(Some(level));
    }

    /// Make every access fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> core::result::Result<(), ErrorKind> {
        if self.failing.get() {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.check()?;
        self.level.set(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.check()?;
        self.level.set(PinState::High);
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        self.check()?;
        let level = self.input.get().unwrap_or(self.level.get());
        Ok(level == PinState::High)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Simulated SMI Switch
// =============================================================================

/// Framing events seen on the simulated lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// SDA fell while SCK was high
    Start,
    /// SDA rose while SCK was high
    Stop,
    /// The host released both lines
    Release,
}

/// Register transaction completed by the simulated chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimTransaction {
    Read { addr: u32, data: u32 },
    Write { addr: u32, data: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for a start condition
    Idle,
    /// Shifting in a byte from the host
    HostByte,
    /// Host is sampling the ack slot
    ChipAck,
    /// Shifting a read byte out to the host
    ChipByte,
    /// Host answers a read byte
    HostAckBit,
    /// Transaction complete, waiting for stop
    Done,
    /// Unknown command; every ack slot is a NACK
    Stuck,
}

/// Line-level model of an RTL8366 SMI slave
///
/// Decodes start and stop conditions, shifts bytes on rising SCK edges,
/// answers ack slots and serves reads from a register map. Acks can be
/// withheld to exercise the retry budget.
///
/// # Example
///
/// ```ignore
/// let mut smi = SmiEngine::new(SimulatedSwitch::new(), SmiConfig::new());
/// smi.lines_mut().withhold_acks(2);
/// smi.write_register(0x0010, 0x0001).unwrap();
/// assert_eq!(smi.lines().ack_samples(), 7);
/// ```
#[derive(Debug)]
pub struct SimulatedSwitch {
    registers: HashMap<u32, u32>,
    cmd_read: u8,
    cmd_write: u8,

    // Line state
    sck: PinState,
    sda_host: PinState,
    host_driving: bool,
    chip_out: PinState,
    failing: bool,

    // Protocol state
    phase: Phase,
    shift: u32,
    bits: u8,
    bytes: Vec<u8>,
    is_read: bool,
    ack_given: bool,
    read_value: u32,
    read_bytes_sent: u8,

    // Observations
    withheld_acks: u32,
    ack_samples: u32,
    trace: Vec<LineEvent>,
    transactions: Vec<SimTransaction>,
    received: Vec<u8>,
}

impl Default for SimulatedSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSwitch {
    /// Create a chip answering the default command codes
    pub fn new() -> Self {
        Self {
            registers: HashMap::new(),
            cmd_read: SMI_CMD_READ,
            cmd_write: SMI_CMD_WRITE,
            sck: PinState::High,
            sda_host: PinState::High,
            host_driving: false,
            chip_out: PinState::High,
            failing: false,
            phase: Phase::Idle,
            shift: 0,
            bits: 0,
            bytes: Vec::new(),
            is_read: false,
            ack_given: false,
            read_value: 0,
            read_bytes_sent: 0,
            withheld_acks: 0,
            ack_samples: 0,
            trace: Vec::new(),
            transactions: Vec::new(),
            received: Vec::new(),
        }
    }

    pub fn set_register(&mut self, addr: u32, value: u32) {
        self.registers.insert(addr, value);
    }

    pub fn register(&self, addr: u32) -> u32 {
        self.registers.get(&addr).copied().unwrap_or(0)
    }

    /// Answer the next `count` ack samples with a NACK
    pub fn withhold_acks(&mut self, count: u32) {
        self.withheld_acks = count;
    }

    /// Make every line access fail
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of ack slots the host sampled
    pub fn ack_samples(&self) -> u32 {
        self.ack_samples
    }

    pub fn trace(&self) -> Vec<LineEvent> {
        self.trace.clone()
    }

    pub fn transactions(&self) -> Vec<SimTransaction> {
        self.transactions.clone()
    }

    /// Every byte the host shifted in, across transactions
    pub fn received_bytes(&self) -> Vec<u8> {
        self.received.clone()
    }

    /// Between transactions with both lines released
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle && self.sck == PinState::High && !self.host_driving
    }

    fn check(&self) -> BusResult<()> {
        if self.failing {
            Err(BusError::BusUnavailable)
        } else {
            Ok(())
        }
    }

    fn host_level(&self) -> PinState {
        if self.host_driving {
            self.sda_host
        } else {
            PinState::High
        }
    }

    fn start_condition(&mut self) {
        self.trace.push(LineEvent::Start);
        self.phase = Phase::HostByte;
        self.shift = 0;
        self.bits = 0;
        self.bytes.clear();
        self.ack_given = false;
        self.chip_out = PinState::High;
    }

    fn stop_condition(&mut self) {
        self.trace.push(LineEvent::Stop);
        self.phase = Phase::Idle;
        self.chip_out = PinState::High;
    }

    fn addr(&self) -> u32 {
        u32::from(self.bytes[1]) | (u32::from(self.bytes[2]) << 8)
    }

    fn rising_edge(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Done => {}
            Phase::HostByte => {
                let bit = u32::from(self.host_level() == PinState::High);
                self.shift = (self.shift << 1) | bit;
                self.bits += 1;
                if self.bits == 8 {
                    self.host_byte_complete(self.shift as u8);
                }
            }
            // Only slots sampled with SDA released are acks; the stop sequence clocks with SDA driven
            Phase::ChipAck | Phase::Stuck if self.host_driving => {}
            Phase::ChipAck => {
                self.ack_samples += 1;
                if self.withheld_acks > 0 {
                    self.withheld_acks -= 1;
                    self.chip_out = PinState::High;
                } else {
                    self.chip_out = PinState::Low;
                    self.ack_given = true;
                }
            }
            Phase::Stuck => {
                self.ack_samples += 1;
                self.chip_out = PinState::High;
            }
            Phase::ChipByte => {
                let byte = (self.read_value >> (8 * u32::from(self.read_bytes_sent))) & 0xFF;
                let bit = (byte >> (7 - self.bits)) & 1;
                self.chip_out = PinState::from(bit != 0);
                self.bits += 1;
            }
            Phase::HostAckBit => {
                self.chip_out = PinState::High;
                if self.read_bytes_sent == 1 {
                    self.phase = Phase::ChipByte;
                    self.bits = 0;
                } else {
                    self.phase = Phase::Done;
                    self.transactions.push(SimTransaction::Read {
                        addr: self.addr(),
                        data: self.read_value,
                    });
                }
            }
        }
    }

    fn falling_edge(&mut self) {
        match self.phase {
            Phase::ChipAck if self.ack_given => {
                self.ack_given = false;
                self.chip_out = PinState::High;
                self.after_ack();
            }
            Phase::ChipByte if self.bits == 8 => {
                self.read_bytes_sent += 1;
                self.phase = Phase::HostAckBit;
            }
            _ => {}
        }
    }

    fn host_byte_complete(&mut self, byte: u8) {
        self.received.push(byte);
        self.bytes.push(byte);
        self.shift = 0;
        self.bits = 0;

        if self.bytes.len() == 1 {
            if byte == self.cmd_read {
                self.is_read = true;
            } else if byte == self.cmd_write {
                self.is_read = false;
            } else {
                self.phase = Phase::Stuck;
                return;
            }
        }

        if !self.is_read && self.bytes.len() == 5 {
            let addr = self.addr();
            let data = u32::from(self.bytes[3]) | (u32::from(self.bytes[4]) << 8);
            self.registers.insert(addr, data);
            self.transactions.push(SimTransaction::Write { addr, data });
        }

        self.phase = Phase::ChipAck;
    }

    fn after_ack(&mut self) {
        let received = self.bytes.len();
        if self.is_read && received == 3 {
            self.read_value = self.register(self.addr());
            self.read_bytes_sent = 0;
            self.bits = 0;
            self.phase = Phase::ChipByte;
        } else if !self.is_read && received == 5 {
            self.phase = Phase::Done;
        } else {
            self.phase = Phase::HostByte;
        }
    }
}

impl SmiLines for SimulatedSwitch {
    fn set_clock(&mut self, level: PinState) -> BusResult<()> {
        self.check()?;
        let previous = self.sck;
        self.sck = level;
        match (previous, level) {
            (PinState::Low, PinState::High) => self.rising_edge(),
            (PinState::High, PinState::Low) => self.falling_edge(),
            _ => {}
        }
        Ok(())
    }

    fn set_data(&mut self, level: PinState) -> BusResult<()> {
        self.check()?;
        let previous = self.host_level();
        self.host_driving = true;
        self.sda_host = level;

        if self.sck == PinState::High {
            match (previous, level) {
                (PinState::High, PinState::Low) => self.start_condition(),
                (PinState::Low, PinState::High) => self.stop_condition(),
                _ => {}
            }
        }
        Ok(())
    }

    fn get_data(&mut self) -> BusResult<PinState> {
        self.check()?;
        if self.host_driving {
            Ok(self.sda_host)
        } else {
            Ok(self.chip_out)
        }
    }

    fn release_data(&mut self) -> BusResult<()> {
        self.check()?;
        self.host_driving = false;
        Ok(())
    }

    fn release(&mut self) -> BusResult<()> {
        self.check()?;
        self.host_driving = false;
        self.set_clock(PinState::High)?;
        self.trace.push(LineEvent::Release);
        Ok(())
    }

    fn delay(&mut self) {}
}

// =============================================================================
// Mock Register Bus
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct FailPlan {
    remaining: usize,
    writes_only: bool,
    error: Error,
}

/// Mock register transport
///
/// A flat register map with access counters and failure injection.
///
/// # Example
///
/// ```ignore
/// let mut bus = MockRegisterBus::new();
/// bus.fail_after_writes(2, BusError::AckTimeout.into());
/// ```
#[derive(Debug, Default)]
pub struct MockRegisterBus {
    registers: HashMap<u32, u32>,
    reads: usize,
    writes: usize,
    noack_writes: usize,
    fail: Option<FailPlan>,
}

impl MockRegisterBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_register(&mut self, addr: u32, value: u32) {
        self.registers.insert(addr, value);
    }

    pub fn register(&self, addr: u32) -> u32 {
        self.registers.get(&addr).copied().unwrap_or(0)
    }

    /// Successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Successful reads and writes so far
    pub fn access_count(&self) -> usize {
        self.reads + self.writes
    }

    pub fn noack_writes(&self) -> usize {
        self.noack_writes
    }

    /// Let `count` more accesses succeed, then fail every access with `error`
    pub fn fail_after(&mut self, count: usize, error: Error) {
        self.fail = Some(FailPlan {
            remaining: count,
            writes_only: false,
            error,
        });
    }

    /// Let `count` more writes succeed, then fail every write with `error`
    pub fn fail_after_writes(&mut self, count: usize, error: Error) {
        self.fail = Some(FailPlan {
            remaining: count,
            writes_only: true,
            error,
        });
    }

    fn check(&mut self, is_write: bool) -> Result<()> {
        match self.fail.as_mut() {
            Some(plan) if plan.writes_only && !is_write => Ok(()),
            Some(plan) if plan.remaining == 0 => Err(plan.error),
            Some(plan) => {
                plan.remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl RegisterBus for MockRegisterBus {
    fn read_register(&mut self, addr: u32) -> Result<u32> {
        self.check(false)?;
        self.reads += 1;
        Ok(self.register(addr))
    }

    fn write_register(&mut self, addr: u32, data: u32) -> Result<()> {
        self.check(true)?;
        self.writes += 1;
        self.registers.insert(addr, data);
        Ok(())
    }

    fn write_register_noack(&mut self, addr: u32, data: u32) -> Result<()> {
        self.write_register(addr, data)?;
        self.noack_writes += 1;
        Ok(())
    }
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus
///
/// Plain PHY registers on every address except the tunnel PHY, where it
/// emulates the chip's MDC/MDIO access registers on top of a switch
/// register map.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_tunnel_register(0x0509, 0x5937);
///
/// let mut bus = MdioTunnel::new(mdio);
/// assert_eq!(bus.read_register(0x0509).unwrap(), 0x5937);
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: HashMap<(u8, u8), u16>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: Vec<(u8, u8, u16)>,
    /// Record of reads: (phy_addr, reg_addr)
    read_log: Vec<(u8, u8)>,
    /// PHY address of the emulated switch
    tunnel_phy: u8,
    /// Switch registers behind the tunnel
    tunnel_registers: HashMap<u32, u32>,
    started: bool,
    address: u16,
    data_write: u16,
    data_read: u16,
    unstarted: usize,
    fail: Option<Error>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::with_tunnel_phy(MDC_MDIO_PHY_ID)
    }

    /// Create a bus whose emulated switch answers on `phy_addr`
    pub fn with_tunnel_phy(phy_addr: u8) -> Self {
        Self {
            tunnel_phy: phy_addr,
            ..Self::default()
        }
    }

    pub fn set_tunnel_register(&mut self, addr: u32, value: u32) {
        self.tunnel_registers.insert(addr, value);
    }

    pub fn tunnel_register(&self, addr: u32) -> u32 {
        self.tunnel_registers.get(&addr).copied().unwrap_or(0)
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.clone()
    }

    /// Get all reads that have been made
    pub fn get_reads(&self) -> Vec<(u8, u8)> {
        self.read_log.clone()
    }

    /// Tunnel register accesses not preceded by a start write
    pub fn unstarted_accesses(&self) -> usize {
        self.unstarted
    }

    /// Fail every access with `error`
    pub fn fail_with(&mut self, error: Error) {
        self.fail = Some(error);
    }

    fn check(&self) -> Result<()> {
        match self.fail {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn take_start(&mut self) {
        if !self.started {
            self.unstarted += 1;
        }
        self.started = false;
    }

    fn tunnel_write(&mut self, reg_addr: u8, value: u16) {
        if reg_addr == MDC_MDIO_START_REG && value == MDC_MDIO_START_OP {
            self.started = true;
            return;
        }
        self.take_start();

        match reg_addr {
            MDC_MDIO_ADDRESS_REG => self.address = value,
            MDC_MDIO_DATA_WRITE_REG => self.data_write = value,
            MDC_MDIO_CTRL1_REG if value == MDC_MDIO_READ_OP => {
                self.data_read = self.tunnel_register(u32::from(self.address)) as u16;
            }
            MDC_MDIO_CTRL1_REG if value == MDC_MDIO_WRITE_OP => {
                self.tunnel_registers
                    .insert(u32::from(self.address), u32::from(self.data_write));
            }
            _ => {}
        }
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.check()?;
        self.read_log.push((phy_addr, reg_addr));

        if phy_addr == self.tunnel_phy {
            self.take_start();
            if reg_addr == MDC_MDIO_DATA_READ_REG {
                return Ok(self.data_read);
            }
        }

        // Return from register map (default 0 if not set)
        Ok(self
            .registers
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.check()?;
        self.write_log.push((phy_addr, reg_addr, value));

        if phy_addr == self.tunnel_phy {
            self.tunnel_write(reg_addr, value);
        } else {
            self.registers.insert((phy_addr, reg_addr), value);
        }
        Ok(())
    }
}

// =============================================================================
// Test Chip
// =============================================================================

/// Register map of [`TestChip`]
pub mod test_reg {
    pub const VLAN_CTRL: u32 = 0x0001;
    pub const PORT_DISABLE: u32 = 0x0002;
    pub const RESET: u32 = 0x0003;
    pub const SETUP: u32 = 0x0004;
    pub const MC_INDEX_BASE: u32 = 0x0010;
    pub const VLAN_MC_BASE: u32 = 0x0020;
    pub const VLAN_MC_WORDS: u32 = 4;
    pub const CHIP_ID: u32 = 0x0509;
    pub const CHIP_VER: u32 = 0x050A;
    pub const VLAN_4K_BASE: u32 = 0x1000;
    pub const VLAN_4K_WORDS: u32 = 3;
    pub const MIB_BASE: u32 = 0x4000;
    pub const MIB_PORT_STRIDE: u32 = 0x80;
    pub const PHY_BASE: u32 = 0x8000;

    pub const CHIP_ID_VALUE: u32 = 0x5937;

    pub const fn vlan_mc(index: u8) -> u32 {
        VLAN_MC_BASE + index as u32 * VLAN_MC_WORDS
    }

    pub const fn vlan_4k(vid: u16) -> u32 {
        VLAN_4K_BASE + vid as u32 * VLAN_4K_WORDS
    }

    pub const fn mib(port: u8, offset: u32) -> u32 {
        MIB_BASE + port as u32 * MIB_PORT_STRIDE + offset
    }

    pub const fn phy(phy_addr: u8, reg_addr: u8) -> u32 {
        PHY_BASE + ((phy_addr as u32) << 5) + reg_addr as u32
    }
}

/// Counters of [`TestChip`]
pub const TEST_MIB_COUNTERS: &[MibCounter] = &[
    MibCounter::new(0, 0, 4, "IfInOctets"),
    MibCounter::new(0, 4, 2, "EtherStatsUndersizePkts"),
    MibCounter::new(0, 6, 2, "IfInUcastPkts"),
    MibCounter::new(0, 8, 4, "IfOutOctets"),
];

/// Chip variant over a simple register map
///
/// 6 ports with the CPU on port 5 and 16 member configurations by default.
/// Accepts VIDs below 16 unless the 4K mode is on.
#[derive(Debug, Clone)]
pub struct TestChip {
    num_ports: u8,
    cpu_port: u8,
    num_vlan_mc: u8,
    has_vlan_4k: bool,
    set_vlan_mc_calls: usize,
    set_vlan_4k_calls: usize,
    enable_port_calls: usize,
}

impl Default for TestChip {
    fn default() -> Self {
        Self::new()
    }
}

impl TestChip {
    pub fn new() -> Self {
        Self {
            num_ports: 6,
            cpu_port: 5,
            num_vlan_mc: 16,
            has_vlan_4k: false,
            set_vlan_mc_calls: 0,
            set_vlan_4k_calls: 0,
            enable_port_calls: 0,
        }
    }

    pub fn with_ports(mut self, num_ports: u8, cpu_port: u8) -> Self {
        self.num_ports = num_ports;
        self.cpu_port = cpu_port;
        self
    }

    pub fn with_vlan_mc(mut self, num_vlan_mc: u8) -> Self {
        self.num_vlan_mc = num_vlan_mc;
        self
    }

    pub fn with_vlan_4k(mut self) -> Self {
        self.has_vlan_4k = true;
        self
    }

    pub fn set_vlan_mc_calls(&self) -> usize {
        self.set_vlan_mc_calls
    }

    pub fn set_vlan_4k_calls(&self) -> usize {
        self.set_vlan_4k_calls
    }

    pub fn enable_port_calls(&self) -> usize {
        self.enable_port_calls
    }
}

impl ChipOps for TestChip {
    fn detect<B: RegisterBus>(&mut self, bus: &mut B) -> Result<ChipInfo> {
        let chip_id = bus.read_register(test_reg::CHIP_ID)?;
        if chip_id != test_reg::CHIP_ID_VALUE {
            return Err(ConfigError::ChipNotDetected.into());
        }
        let chip_ver = bus.read_register(test_reg::CHIP_VER)?;

        Ok(ChipInfo {
            chip_id,
            chip_ver,
            cpu_port: self.cpu_port,
            num_ports: self.num_ports,
            num_vlan_mc: self.num_vlan_mc,
            mib_counters: TEST_MIB_COUNTERS,
            has_vlan_4k: self.has_vlan_4k,
        })
    }

    fn reset_chip<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        bus.write_register_noack(test_reg::RESET, 1)
    }

    fn setup<B: RegisterBus>(&mut self, bus: &mut B) -> Result<()> {
        bus.write_register(test_reg::SETUP, 1)
    }

    fn mii_read<B: RegisterBus>(&mut self, bus: &mut B, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        Ok(bus.read_register(test_reg::phy(phy_addr, reg_addr))? as u16)
    }

    fn mii_write<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        phy_addr: u8,
        reg_addr: u8,
        value: u16,
    ) -> Result<()> {
        bus.write_register(test_reg::phy(phy_addr, reg_addr), u32::from(value))
    }

    fn get_vlan_mc<B: RegisterBus>(&mut self, bus: &mut B, index: u8) -> Result<VlanMc> {
        let base = test_reg::vlan_mc(index);
        let word0 = bus.read_register(base)?;
        Ok(VlanMc {
            vid: (word0 & 0x0FFF) as u16,
            priority: ((word0 >> 12) & 0x7) as u8,
            member: bus.read_register(base + 1)? as u16,
            untag: bus.read_register(base + 2)? as u16,
            fid: bus.read_register(base + 3)? as u8,
        })
    }

    fn set_vlan_mc<B: RegisterBus>(&mut self, bus: &mut B, index: u8, entry: &VlanMc) -> Result<()> {
        self.set_vlan_mc_calls += 1;
        let base = test_reg::vlan_mc(index);
        bus.write_register(base, u32::from(entry.vid) | (u32::from(entry.priority) << 12))?;
        bus.write_register(base + 1, u32::from(entry.member))?;
        bus.write_register(base + 2, u32::from(entry.untag))?;
        bus.write_register(base + 3, u32::from(entry.fid))
    }

    fn get_vlan_4k<B: RegisterBus>(&mut self, bus: &mut B, vid: u16) -> Result<Vlan4k> {
        let base = test_reg::vlan_4k(vid);
        Ok(Vlan4k {
            vid,
            member: bus.read_register(base)? as u16,
            untag: bus.read_register(base + 1)? as u16,
            fid: bus.read_register(base + 2)? as u8,
        })
    }

    fn set_vlan_4k<B: RegisterBus>(&mut self, bus: &mut B, entry: &Vlan4k) -> Result<()> {
        self.set_vlan_4k_calls += 1;
        let base = test_reg::vlan_4k(entry.vid);
        bus.write_register(base, u32::from(entry.member))?;
        bus.write_register(base + 1, u32::from(entry.untag))?;
        bus.write_register(base + 2, u32::from(entry.fid))
    }

    fn get_mc_index<B: RegisterBus>(&mut self, bus: &mut B, port: u8) -> Result<u8> {
        Ok(bus.read_register(test_reg::MC_INDEX_BASE + u32::from(port))? as u8)
    }

    fn set_mc_index<B: RegisterBus>(&mut self, bus: &mut B, port: u8, index: u8) -> Result<()> {
        bus.write_register(test_reg::MC_INDEX_BASE + u32::from(port), u32::from(index))
    }

    fn get_mib_counter<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        counter: &MibCounter,
        port: u8,
    ) -> Result<u64> {
        let addr = test_reg::mib(port, counter.base + counter.offset);
        let mut value = 0u64;
        for word in 0..counter.length {
            value |= u64::from(bus.read_register(addr + word)?) << (16 * word);
        }
        Ok(value)
    }

    fn is_vlan_valid(&self, vid: u16, vlan4k_enabled: bool) -> bool {
        let limit = if vlan4k_enabled { 4096 } else { 16 };
        vid < limit
    }

    fn enable_vlan<B: RegisterBus>(&mut self, bus: &mut B, enable: bool) -> Result<()> {
        bus.read_modify_write(test_reg::VLAN_CTRL, 0x1, u32::from(enable))
    }

    fn enable_vlan4k<B: RegisterBus>(&mut self, bus: &mut B, enable: bool) -> Result<()> {
        bus.read_modify_write(test_reg::VLAN_CTRL, 0x2, u32::from(enable) << 1)
    }

    fn enable_port<B: RegisterBus>(&mut self, bus: &mut B, port: u8, enable: bool) -> Result<()> {
        self.enable_port_calls += 1;
        let bit = 1 << port;
        bus.read_modify_write(test_reg::PORT_DISABLE, bit, if enable { 0 } else { bit })
    }
}

/// Register bus holding the [`TestChip`] identification
pub fn test_bus() -> MockRegisterBus {
    let mut bus = MockRegisterBus::new();
    bus.set_register(test_reg::CHIP_ID, test_reg::CHIP_ID_VALUE);
    bus
}
