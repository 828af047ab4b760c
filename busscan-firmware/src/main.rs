//! Busscan - I2C Bus Scanner Firmware
//!
//! Sweeps every non-reserved 7-bit address at 100 kHz and then at
//! 400 kHz, prints each device that acknowledges on the serial console,
//! idles, and starts over. Runs until reset.
//!
//! Build for one board at a time:
//!
//! ```text
//! cargo build -p busscan-firmware --features stm32f0 --target thumbv6m-none-eabi
//! cargo build -p busscan-firmware --features stm32f1 --target thumbv7m-none-eabi
//! ```

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Delay;
#[cfg(feature = "defmt")]
use {defmt_rtt as _, panic_probe as _};

use busscan_core::ScanCycle;

mod boards;
mod config;
mod serial;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("Busscan firmware starting...");
    #[cfg(feature = "defmt")]
    config::log_config();

    let p = embassy_stm32::init(Default::default());
    let board = boards::init(p, config::SCAN.poll_budget());

    #[cfg(feature = "defmt")]
    defmt::info!("Peripherals ready, scanning");

    // The cycle owns the bus from here on; nothing else may touch it
    let mut cycle = ScanCycle::new(board.bus, board.console, Delay, &config::SCAN);
    cycle.run()
}
