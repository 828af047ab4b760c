//! STM32F0-specific HAL for Busscan
//!
//! This crate implements the `busscan-hal` traits on top of the STM32F0
//! peripherals. It supports various STM32F0 chips including:
//!
//! - STM32F042F6 / STM32F042K6
//!
//! # Features
//!
//! - `stm32f042f6`, `stm32f042k6` - Chip selection (pick one)
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Clocks and pin muxing stay with embassy-stm32: create the embassy
//! `I2c` driver as usual, keep it alive, and hand the register block to
//! [`i2c::I2cProbe`].

#![no_std]

pub mod i2c;

// Re-export shared types from busscan-hal
pub use busscan_hal::{BusSpeed, PollBudget, Timing};
pub use i2c::I2cProbe;
