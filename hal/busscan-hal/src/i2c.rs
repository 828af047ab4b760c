//! I2C bus abstractions
//!
//! Provides the single-transaction master interface the scan engine needs:
//! start condition, address frame, acknowledge check, stop condition.
//! Data phases are deliberately absent.

use core::ops::Range;

/// 7-bit I2C bus address
///
/// Always below `0x80`. The constructor is the only way in, so a
/// `BusAddress` never carries the direction bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress(u8);

impl BusAddress {
    /// Highest 7-bit address
    pub const MAX: u8 = 0x7F;

    /// Addresses that may be probed
    ///
    /// `0x00..0x08` (general call, CBUS, HS-mode master codes) and
    /// `0x78..0x80` (10-bit addressing, device ID) are reserved.
    pub const SCAN_RANGE: Range<u8> = 0x08..0x78;

    /// Create an address, rejecting anything wider than 7 bits
    pub const fn new(addr: u8) -> Option<Self> {
        if addr <= Self::MAX {
            Some(Self(addr))
        } else {
            None
        }
    }

    /// Get the raw 7-bit value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Check if this address lies in one of the reserved blocks
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::SCAN_RANGE.start || self.0 >= Self::SCAN_RANGE.end
    }

    /// Build the byte sent during the address phase
    pub const fn frame(self, direction: Direction) -> u8 {
        (self.0 << 1) | direction.bit()
    }
}

impl From<BusAddress> for u8 {
    fn from(addr: BusAddress) -> Self {
        addr.0
    }
}

/// Transfer direction encoded in the address frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master transmits (R/W bit = 0)
    Write,
    /// Master receives (R/W bit = 1)
    Read,
}

impl Direction {
    /// Value of the R/W bit
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => 1,
        }
    }
}

/// Bus clock rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// Standard mode (100 kHz)
    Standard,
    /// Fast mode (400 kHz)
    Fast,
}

impl BusSpeed {
    /// SCL frequency in Hz
    pub const fn hz(self) -> u32 {
        match self {
            BusSpeed::Standard => 100_000,
            BusSpeed::Fast => 400_000,
        }
    }

    /// SCL frequency in kHz, for banners and logs
    pub const fn khz(self) -> u32 {
        self.hz() / 1000
    }
}

/// Result of the address phase when the peripheral completed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressAck {
    /// A slave pulled SDA low during the ninth clock
    Acknowledged,
    /// Nobody answered
    NotAcknowledged,
}

/// Errors from a single I2C transaction step
///
/// None of these are fatal. They are the routine result of probing an
/// address nobody owns or a bus that is not connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus was already held when a start condition was requested
    BusBusy,
    /// Peripheral flagged a bus error or lost arbitration during addressing
    AddressingError,
    /// A status flag did not change within the polling budget
    Timeout,
}

/// I2C master able to run one probe transaction
///
/// Every method that waits on hardware must do so through a bounded
/// poll (see [`PollBudget`]) so a disconnected bus degrades into
/// [`BusError::Timeout`] instead of a hang.
pub trait ProbeBus {
    /// Set the bus clock divisor for the given speed
    ///
    /// Idempotent. Only called between transactions.
    fn configure(&mut self, speed: BusSpeed);

    /// Check if the bus is currently held (by us or by anyone else)
    fn is_busy(&self) -> bool;

    /// Issue a start condition
    ///
    /// Returns [`BusError::BusBusy`] without touching the bus when it is
    /// already held.
    fn start(&mut self) -> Result<(), BusError>;

    /// Send the address frame and wait for the acknowledge bit
    ///
    /// A NAK is reported as `Ok(AddressAck::NotAcknowledged)`, not as an
    /// error. Peripherals that latch NAK as an error flag clear it here.
    fn address(&mut self, addr: BusAddress, direction: Direction)
        -> Result<AddressAck, BusError>;

    /// Clear the latched addressing error flags
    fn clear_address_error(&mut self);

    /// Issue a stop condition and wait until the peripheral releases the bus
    fn stop(&mut self) -> Result<(), BusError>;
}

/// Bounded busy-poll helper
///
/// Replaces open-ended `while !flag {}` loops. The limit counts loop
/// iterations, not time, because the only thing it protects against is a
/// flag that will never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    limit: u32,
}

impl Default for PollBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

impl PollBudget {
    /// Iteration cap used unless configured otherwise
    pub const DEFAULT_LIMIT: u32 = 1_000_000;

    /// Create a budget of `limit` polls (at least one)
    pub const fn new(limit: u32) -> Self {
        Self {
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// Get the iteration cap
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Poll `done` until it returns true or the budget runs out
    pub fn wait_for(&self, mut done: impl FnMut() -> bool) -> Result<(), BusError> {
        self.poll(|| if done() { Some(()) } else { None })
    }

    /// Poll `check` until it yields a value or the budget runs out
    ///
    /// Useful when several flags end the wait with different results.
    pub fn poll<T>(&self, mut check: impl FnMut() -> Option<T>) -> Result<T, BusError> {
        for _ in 0..self.limit {
            if let Some(value) = check() {
                return Ok(value);
            }
        }
        Err(BusError::Timeout)
    }
}
