//! Lazy single-pass sweep over the address range

use core::iter::FusedIterator;
use core::ops::Range;

use busscan_hal::{BusAddress, ProbeBus};

use crate::probe::{ProbeOutcome, Prober};

/// Tally of probe outcomes for one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepSummary {
    /// Addresses probed so far
    pub probed: u8,
    /// Addresses that acknowledged
    pub found: u8,
    /// Addresses that NAKed or were skipped on a busy bus
    pub not_present: u8,
    /// Addresses that raised a bus error
    pub address_errors: u8,
    /// Addresses whose transaction timed out
    pub timeouts: u8,
}

impl SweepSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: ProbeOutcome) {
        self.probed = self.probed.saturating_add(1);
        let slot = match outcome {
            ProbeOutcome::Acknowledged => &mut self.found,
            ProbeOutcome::NotPresent => &mut self.not_present,
            ProbeOutcome::AddressError => &mut self.address_errors,
            ProbeOutcome::Timeout => &mut self.timeouts,
        };
        *slot = slot.saturating_add(1);
    }

    /// Check if every probe timed out (usually means no bus is attached)
    pub fn all_timed_out(&self) -> bool {
        self.probed > 0 && self.timeouts == self.probed
    }
}

/// Iterator over the addresses that acknowledge
///
/// Each call to `next` probes forward from where the previous call
/// stopped, so a caller can act on a hit before the next address is put
/// on the bus. The sweep is finite and cannot be rewound; start a new
/// one for a new pass.
pub struct Sweep<'a, B> {
    bus: &'a mut B,
    prober: Prober,
    addresses: Range<u8>,
    summary: SweepSummary,
}

impl<'a, B: ProbeBus> Sweep<'a, B> {
    /// Create a sweep over `addresses`
    ///
    /// Anything outside the non-reserved block is dropped from the range.
    pub fn new(bus: &'a mut B, prober: Prober, addresses: Range<u8>) -> Self {
        let start = addresses.start.max(BusAddress::SCAN_RANGE.start);
        let end = addresses.end.min(BusAddress::SCAN_RANGE.end);
        Self {
            bus,
            prober,
            addresses: start..end.max(start),
            summary: SweepSummary::default(),
        }
    }

    /// Outcome tally for the addresses probed so far
    pub fn summary(&self) -> SweepSummary {
        self.summary
    }
}

impl<B: ProbeBus> Iterator for Sweep<'_, B> {
    type Item = BusAddress;

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.addresses.by_ref() {
            let Some(addr) = BusAddress::new(raw) else {
                continue;
            };
            let outcome = self.prober.probe(&mut *self.bus, addr);
            self.summary.record(outcome);
            if outcome.is_present() {
                return Some(addr);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.addresses.len()))
    }
}

impl<B: ProbeBus> FusedIterator for Sweep<'_, B> {}
