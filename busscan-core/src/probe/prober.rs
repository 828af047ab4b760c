//! Single-address probe transaction

use busscan_hal::{BusAddress, BusError, Direction, PollBudget, ProbeBus};

use super::ProbeOutcome;

/// Runs one probe transaction per call
///
/// Transaction shape:
///
/// ```text
/// wait !busy ─► START ─► ADDR+W ─┬─ ACK ──────────────┐
///                  │              ├─ NAK ──────────────┤
///                  │              ├─ bus error ─► clear┤
///                  │              └─ timeout ──────────┤
///                  │                                   ▼
///                  └─ busy: skip (no STOP)            STOP
/// ```
///
/// Every START that was issued is followed by exactly one STOP.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prober {
    budget: PollBudget,
}

impl Prober {
    /// Create a prober that gives up on the idle-bus wait after `budget` polls
    pub fn new(budget: PollBudget) -> Self {
        Self { budget }
    }

    /// Probe one address with a write-direction address frame
    pub fn probe<B: ProbeBus>(&self, bus: &mut B, addr: BusAddress) -> ProbeOutcome {
        // The previous STOP may still be on the wire. If the bus never
        // frees up, start() reports it as busy below.
        let _ = self.budget.wait_for(|| !bus.is_busy());

        match bus.start() {
            Ok(()) => {}
            // Nothing was put on the bus, so there is nothing to release
            Err(BusError::BusBusy) => return ProbeOutcome::NotPresent,
            Err(e) => {
                Self::release(bus, addr);
                return e.into();
            }
        }

        let outcome = match bus.address(addr, Direction::Write) {
            Ok(ack) => ack.into(),
            Err(BusError::AddressingError) => {
                bus.clear_address_error();
                ProbeOutcome::AddressError
            }
            Err(e) => e.into(),
        };

        Self::release(bus, addr);

        #[cfg(feature = "defmt")]
        defmt::trace!("probe {=u8:#x}: {}", addr.get(), outcome);

        outcome
    }

    /// Send the STOP that closes the transaction
    ///
    /// A STOP that never completes does not change the outcome; the next
    /// probe's idle wait absorbs the stuck bus.
    fn release<B: ProbeBus>(bus: &mut B, _addr: BusAddress) {
        if let Err(_e) = bus.stop() {
            #[cfg(feature = "defmt")]
            defmt::warn!("stop after {=u8:#x} not confirmed: {}", _addr.get(), _e);
        }
    }
}
