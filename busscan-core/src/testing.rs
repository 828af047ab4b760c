//! Simulated hardware shared by the unit tests

use core::cell::Cell;
use core::fmt::{self, Write};

use busscan_hal::{AddressAck, BusAddress, BusError, BusSpeed, ConsoleSink, Direction, ProbeBus};
use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};

/// One mutating call made against the simulated bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Configure(BusSpeed),
    Start,
    Address(u8, Direction),
    ClearError,
    Stop,
}

/// I2C bus with a configurable set of devices and failure modes
pub struct SimBus {
    devices: [bool; 128],
    pub calls: Vec<Call, 2048>,
    /// Number of `is_busy` polls that report busy before the bus frees up
    pub busy_polls: Cell<u32>,
    /// Bus held by another master forever
    pub stuck_busy: bool,
    /// No bus attached: address phase never completes
    pub disconnected: bool,
    /// Start condition never confirmed
    pub start_timeout: bool,
    /// Address that raises a bus error during addressing
    pub address_error_at: Option<u8>,
    /// Stop condition never confirmed
    pub stop_timeout: bool,
    /// A start issued while the previous transaction was still open
    pub overlapping_starts: u32,
    pub error_latched: bool,
    open: bool,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            devices: [false; 128],
            calls: Vec::new(),
            busy_polls: Cell::new(0),
            stuck_busy: false,
            disconnected: false,
            start_timeout: false,
            address_error_at: None,
            stop_timeout: false,
            overlapping_starts: 0,
            error_latched: false,
            open: false,
        }
    }

    pub fn with_devices(addrs: &[u8]) -> Self {
        let mut bus = Self::new();
        for &addr in addrs {
            bus.devices[addr as usize] = true;
        }
        bus
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call).expect("call log full");
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn starts(&self) -> usize {
        self.count(Call::Start)
    }

    pub fn stops(&self) -> usize {
        self.count(Call::Stop)
    }

    /// Addresses in the order they were put on the bus
    pub fn probed(&self) -> Vec<u8, 256> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Address(addr, _) => Some(*addr),
                _ => None,
            })
            .collect()
    }

    pub fn speeds(&self) -> Vec<BusSpeed, 16> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Configure(speed) => Some(*speed),
                _ => None,
            })
            .collect()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl ProbeBus for SimBus {
    fn configure(&mut self, speed: BusSpeed) {
        self.record(Call::Configure(speed));
    }

    fn is_busy(&self) -> bool {
        if self.stuck_busy {
            return true;
        }
        let remaining = self.busy_polls.get();
        if remaining > 0 {
            self.busy_polls.set(remaining - 1);
            return true;
        }
        false
    }

    fn start(&mut self) -> Result<(), BusError> {
        if self.stuck_busy {
            return Err(BusError::BusBusy);
        }
        self.record(Call::Start);
        if self.open {
            self.overlapping_starts += 1;
        }
        self.open = true;
        if self.start_timeout {
            return Err(BusError::Timeout);
        }
        Ok(())
    }

    fn address(&mut self, addr: BusAddress, direction: Direction) -> Result<AddressAck, BusError> {
        self.record(Call::Address(addr.get(), direction));
        if self.disconnected {
            return Err(BusError::Timeout);
        }
        if self.address_error_at == Some(addr.get()) {
            self.error_latched = true;
            return Err(BusError::AddressingError);
        }
        if self.devices[addr.get() as usize] {
            Ok(AddressAck::Acknowledged)
        } else {
            Ok(AddressAck::NotAcknowledged)
        }
    }

    fn clear_address_error(&mut self) {
        self.record(Call::ClearError);
        self.error_latched = false;
    }

    fn stop(&mut self) -> Result<(), BusError> {
        self.record(Call::Stop);
        self.open = false;
        if self.stop_timeout {
            return Err(BusError::Timeout);
        }
        Ok(())
    }
}

/// Console that keeps every line
pub struct RecordingConsole {
    pub lines: Vec<String<64>, 64>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn found_lines(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.starts_with("Found device"))
            .count()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l.as_str() == line)
    }
}

impl ConsoleSink for RecordingConsole {
    type Error = fmt::Error;

    fn write_line(&mut self, line: fmt::Arguments<'_>) -> Result<(), fmt::Error> {
        let mut text = String::new();
        text.write_fmt(line)?;
        self.lines.push(text).map_err(|_| fmt::Error)
    }
}

/// Delay that returns immediately and remembers how long it was asked to wait
pub struct RecordingDelay {
    pub total_ms: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self { total_ms: 0 }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}
