//! Board-agnostic I2C scan engine
//!
//! This crate contains everything that does not depend on a specific
//! I2C peripheral:
//!
//! - Address prober (one start/address/stop transaction per address)
//! - Bus sweep over the non-reserved address range
//! - Scan cycle controller (100 kHz sweep, 400 kHz sweep, idle, repeat)
//! - Scan configuration types
//!
//! Hardware is reached only through the `busscan-hal` traits.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod probe;
pub mod scan;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, ScanConfig};
pub use cycle::{CyclePhase, ScanCycle};
pub use probe::{ProbeOutcome, Prober};
pub use scan::{BusScanner, Sweep, SweepSummary};
