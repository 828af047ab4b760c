//! Address probing
//!
//! One probe is one complete I2C transaction: wait for an idle bus,
//! start, address frame with the write bit, check the acknowledge,
//! stop. Nothing is ever written past the address.

pub mod outcome;
pub mod prober;

pub use outcome::ProbeOutcome;
pub use prober::Prober;
