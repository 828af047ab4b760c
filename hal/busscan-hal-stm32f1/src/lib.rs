//! STM32F1-specific HAL for Busscan
//!
//! Implements the `busscan-hal` traits for the older ("v1") I2C block
//! found on the STM32F1 family. The same register layout is used by the
//! GD32VF103, so the probe sequence here carries over unchanged.
//!
//! # Features
//!
//! - `stm32f103c8`, `stm32f103cb` - Chip selection (pick one)
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod i2c;

// Re-export shared types from busscan-hal
pub use busscan_hal::{BusSpeed, ClockControl, PollBudget};
pub use i2c::I2cProbe;
