//! Cycle phase definition
//!
//! ```text
//! ┌────────────────┐     ┌────────────┐     ┌──────┐
//! │ StandardSweep  │ ──► │ FastSweep  │ ──► │ Idle │ ─┐
//! └────────────────┘     └────────────┘     └──────┘  │
//!         ▲                                           │
//!         └───────────────────────────────────────────┘
//! ```
//!
//! There is no terminal phase.

use busscan_hal::BusSpeed;

/// Scan cycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CyclePhase {
    /// Sweep the bus at 100 kHz
    #[default]
    StandardSweep,
    /// Sweep the bus at 400 kHz
    FastSweep,
    /// Bus parked at 100 kHz, waiting for the next cycle
    Idle,
}

impl CyclePhase {
    /// Phase that follows this one
    pub fn next(self) -> Self {
        match self {
            CyclePhase::StandardSweep => CyclePhase::FastSweep,
            CyclePhase::FastSweep => CyclePhase::Idle,
            CyclePhase::Idle => CyclePhase::StandardSweep,
        }
    }

    /// Bus speed applied on entering this phase
    pub fn speed(self) -> BusSpeed {
        match self {
            CyclePhase::StandardSweep => BusSpeed::Standard,
            CyclePhase::FastSweep => BusSpeed::Fast,
            // Leave the bus in the gentler mode while nobody is scanning
            CyclePhase::Idle => BusSpeed::Standard,
        }
    }

    /// Check if this phase puts traffic on the bus
    pub fn is_sweep(self) -> bool {
        matches!(self, CyclePhase::StandardSweep | CyclePhase::FastSweep)
    }
}
