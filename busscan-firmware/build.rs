//! Build script for busscan-firmware
//!
//! - Sets up linker search paths for the selected board's memory.x
//! - Validates scan.toml at compile time
//! - Generates the configuration constants the firmware is built with

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use busscan_core::config::{ConfigError, ScanConfig};
use serde::Deserialize;

/// Board settings that never reach the scan engine
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BoardConfig {
    i2c_clock_hz: u32,
    console_baud: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            i2c_clock_hz: 8_000_000,
            console_baud: 115_200,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    scan: ScanConfig,
    #[serde(default)]
    board: BoardConfig,
}

fn main() {
    setup_linker();
    let config = load_config();
    validate_scan(&config.scan);
    validate_board(&config.board);
    generate_config(&config);
}

/// Copy the board's memory layout to memory.x and point the linker at it
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let f0 = env::var_os("CARGO_FEATURE_STM32F0").is_some();
    let f1 = env::var_os("CARGO_FEATURE_STM32F1").is_some();
    let memory_x: &[u8] = match (f0, f1) {
        (true, false) => include_bytes!("memory-stm32f0.x"),
        (false, true) => include_bytes!("memory-stm32f1.x"),
        _ => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: No board selected!                                       ║\n\
            ║                                                                  ║\n\
            ║  Enable exactly one of the `stm32f0` or `stm32f1` features.      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        ),
    };

    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory-stm32f0.x");
    println!("cargo:rerun-if-changed=memory-stm32f1.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and deserialize scan.toml
fn load_config() -> ConfigFile {
    println!("cargo:rerun-if-changed=scan.toml");

    let config_path = Path::new("scan.toml");

    // A missing file means "use the defaults"
    if !config_path.exists() {
        println!("cargo:warning=scan.toml not found, using default scan settings");
        return ConfigFile::default();
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read scan.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            )
        }
    };

    match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid scan.toml                                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e.to_string()
                    .lines()
                    .map(|line| format!("║  {:<64} ║", line))
                    .collect::<Vec<_>>()
                    .join("\n")
            )
        }
    }
}

/// Validate the [scan] section
fn validate_scan(scan: &ScanConfig) {
    let message = match scan.validate() {
        Ok(()) => return,
        Err(ConfigError::EmptyRange) => format!(
            "first_address (0x{:02X}) must be below end_address (0x{:02X})",
            scan.first_address, scan.end_address
        ),
        Err(ConfigError::ReservedAddress) => {
            "addresses must stay within 0x08..0x78 (0x00-0x07 and 0x78-0x7F are reserved)".into()
        }
        Err(ConfigError::ZeroPollLimit) => "poll_limit must be at least 1".into(),
    };

    report_errors("scan", &[message]);
}

/// Validate the [board] section
fn validate_board(board: &BoardConfig) {
    let mut errors = Vec::new();

    if board.i2c_clock_hz < 2_000_000 {
        errors.push("i2c_clock_hz must be at least 2 MHz".to_string());
    }
    if board.console_baud == 0 {
        errors.push("console_baud cannot be zero".to_string());
    }

    if !errors.is_empty() {
        report_errors("board", &errors);
    }
}

fn report_errors(section: &str, errors: &[String]) {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid [{}] configuration{:<width$}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        section,
        "",
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n"),
        width = 48usize.saturating_sub(section.len()),
    );
}

/// Write the validated settings as Rust constants
fn generate_config(config: &ConfigFile) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let scan = &config.scan;
    let board = &config.board;

    let source = format!(
        "// Generated from scan.toml by build.rs\n\
        \n\
        pub const SCAN: ScanConfig = ScanConfig {{\n    \
            first_address: 0x{:02X},\n    \
            end_address: 0x{:02X},\n    \
            idle_ms: {},\n    \
            poll_limit: {},\n\
        }};\n\
        \n\
        pub const I2C_CLOCK_HZ: u32 = {};\n\
        \n\
        pub const CONSOLE_BAUD: u32 = {};\n",
        scan.first_address,
        scan.end_address,
        scan.idle_ms,
        scan.poll_limit,
        board.i2c_clock_hz,
        board.console_baud,
    );

    let mut f = File::create(out_dir.join("scan_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
