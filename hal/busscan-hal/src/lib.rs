//! Busscan Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits implemented by the
//! chip-specific HALs (STM32F0, STM32F1, etc.). The scan engine in
//! `busscan-core` only ever talks to these traits, so the same probe and
//! sweep logic drives every supported I2C peripheral.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  busscan-firmware (board selection)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  busscan-core (probe, sweep, cycle)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  busscan-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ busscan-hal-  │       │ busscan-hal-  │
//! │    stm32f0    │       │   stm32f1     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::ProbeBus`] - Single-transaction I2C master control
//! - [`uart::UartTx`] - Serial transmit
//! - [`console::ConsoleSink`] - Line-oriented text output
//!
//! [`clock`] holds the SCL divider arithmetic for both peripheral
//! generations so it can be tested on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod console;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::{ClockControl, Timing};
pub use console::{ConsoleSink, UartConsole};
pub use i2c::{AddressAck, BusAddress, BusError, BusSpeed, Direction, PollBudget, ProbeBus};
pub use uart::UartTx;
