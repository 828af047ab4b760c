//! Bus scanner with console reporting

use core::ops::Range;

use busscan_hal::{BusAddress, ConsoleSink, ProbeBus};

use super::{Sweep, SweepSummary};
use crate::config::ScanConfig;
use crate::probe::Prober;

/// Write the report line for an acknowledged address
pub fn report_found<C: ConsoleSink>(console: &mut C, addr: BusAddress) -> Result<(), C::Error> {
    let raw = addr.get();
    console.write_line(format_args!(
        "Found device on address: 0x{:02X} ({})",
        raw, raw
    ))
}

/// Sweeps the configured address range at whatever speed the bus is set to
#[derive(Debug, Clone)]
pub struct BusScanner {
    prober: Prober,
    range: Range<u8>,
}

impl Default for BusScanner {
    fn default() -> Self {
        Self::new(&ScanConfig::DEFAULT)
    }
}

impl BusScanner {
    /// Create a scanner from the scan configuration
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            prober: Prober::new(config.poll_budget()),
            range: config.scan_range(),
        }
    }

    /// Start a fresh sweep at the first address
    pub fn sweep<'a, B: ProbeBus>(&self, bus: &'a mut B) -> Sweep<'a, B> {
        Sweep::new(bus, self.prober, self.range.clone())
    }

    /// Run one full sweep, reporting each hit before probing on
    ///
    /// Console failures are not allowed to stop the sweep.
    pub fn scan<B, C>(&self, bus: &mut B, console: &mut C) -> SweepSummary
    where
        B: ProbeBus,
        C: ConsoleSink,
    {
        let mut sweep = self.sweep(bus);
        for addr in sweep.by_ref() {
            #[cfg(feature = "defmt")]
            defmt::info!("found device at {=u8:#x}", addr.get());

            let _ = report_found(console, addr);
        }

        let summary = sweep.summary();
        #[cfg(feature = "defmt")]
        defmt::debug!("sweep complete: {}", summary);
        summary
    }
}
