//! Scan cycle controller
//!
//! The firmware's whole foreground loop, modelled as an explicit,
//! never-ending three-phase cycle.

pub mod controller;
pub mod phase;

pub use controller::ScanCycle;
pub use phase::CyclePhase;
