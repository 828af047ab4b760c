//! Bus sweep
//!
//! Walks the address range in increasing order, one probe at a time,
//! and reports every address that acknowledges.

pub mod scanner;
pub mod sweep;

pub use scanner::{report_found, BusScanner};
pub use sweep::{Sweep, SweepSummary};
