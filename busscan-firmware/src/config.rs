//! Build-time configuration
//!
//! `build.rs` validates `scan.toml` and turns it into the constants
//! below, so a bad range or poll limit never makes it onto a board.

use busscan_core::ScanConfig;

include!(concat!(env!("OUT_DIR"), "/scan_config.rs"));

#[cfg(feature = "defmt")]
pub fn log_config() {
    defmt::info!(
        "config: {}, i2c clock {} Hz, console {} baud",
        SCAN,
        I2C_CLOCK_HZ,
        CONSOLE_BAUD
    );
}
