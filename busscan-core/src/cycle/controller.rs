//! Scan cycle execution

use busscan_hal::{BusSpeed, ConsoleSink, ProbeBus};
use embedded_hal::delay::DelayNs;

use super::CyclePhase;
use crate::config::ScanConfig;
use crate::scan::{BusScanner, SweepSummary};

/// Drives the bus through standard sweep, fast sweep and idle, forever
///
/// Owns the bus for its whole lifetime, so transactions can never
/// interleave.
pub struct ScanCycle<B, C, D> {
    bus: B,
    console: C,
    delay: D,
    scanner: BusScanner,
    idle_ms: u32,
    phase: CyclePhase,
    completed: u32,
    last_sweep: Option<SweepSummary>,
}

impl<B, C, D> ScanCycle<B, C, D>
where
    B: ProbeBus,
    C: ConsoleSink,
    D: DelayNs,
{
    /// Create a controller positioned at the start of a cycle
    pub fn new(bus: B, console: C, delay: D, config: &ScanConfig) -> Self {
        Self {
            bus,
            console,
            delay,
            scanner: BusScanner::new(config),
            idle_ms: config.idle_ms,
            phase: CyclePhase::default(),
            completed: 0,
            last_sweep: None,
        }
    }

    /// Phase that the next [`step`](Self::step) will execute
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Number of full cycles finished so far
    pub fn completed_cycles(&self) -> u32 {
        self.completed
    }

    /// Outcome tally of the most recent sweep
    pub fn last_sweep(&self) -> Option<SweepSummary> {
        self.last_sweep
    }

    /// Get access to the bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get access to the console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Give back the owned hardware
    pub fn release(self) -> (B, C, D) {
        (self.bus, self.console, self.delay)
    }

    /// Execute the current phase and advance to the next one
    ///
    /// Returns the phase that will run on the following call.
    pub fn step(&mut self) -> CyclePhase {
        let phase = self.phase;
        if phase.is_sweep() {
            self.sweep(phase.speed());
        }

        match phase {
            CyclePhase::StandardSweep => {}
            CyclePhase::FastSweep => {
                let _ = self.console.write_line(format_args!("done"));
                let _ = self.console.blank_line();
            }
            CyclePhase::Idle => {
                self.bus.configure(phase.speed());
                self.delay.delay_ms(self.idle_ms);
                self.completed = self.completed.wrapping_add(1);
            }
        }

        self.phase = self.phase.next();
        self.phase
    }

    /// Run cycles until the device is reset
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn sweep(&mut self, speed: BusSpeed) {
        let _ = self.console.write_line(format_args!(
            "Scanning I2C bus at {} kHz ...",
            speed.khz()
        ));
        self.bus.configure(speed);

        #[cfg(feature = "defmt")]
        defmt::info!("cycle {}: sweeping at {} kHz", self.completed, speed.khz());

        let summary = self.scanner.scan(&mut self.bus, &mut self.console);

        #[cfg(feature = "defmt")]
        if summary.all_timed_out() {
            defmt::warn!("every probe timed out at {} kHz - is the bus connected?", speed.khz());
        }

        self.last_sweep = Some(summary);
    }
}
