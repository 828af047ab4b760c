//! Board bring-up
//!
//! Each board module wires the chip's I2C and USART peripherals to the
//! pins it uses and hands back the two halves the scan cycle needs.

use busscan_hal::UartConsole;

use crate::serial::SerialConsole;

#[cfg(all(feature = "stm32f0", feature = "stm32f1"))]
compile_error!("Enable only one of the `stm32f0` and `stm32f1` features");

#[cfg(not(any(feature = "stm32f0", feature = "stm32f1")))]
compile_error!("Select a board with the `stm32f0` or `stm32f1` feature");

#[cfg(feature = "stm32f0")]
mod stm32f0;
#[cfg(feature = "stm32f0")]
pub use stm32f0::{init, I2cProbe};

#[cfg(feature = "stm32f1")]
mod stm32f1;
#[cfg(feature = "stm32f1")]
pub use stm32f1::{init, I2cProbe};

/// Hardware owned by the scan cycle
pub struct Board {
    pub bus: I2cProbe,
    pub console: UartConsole<SerialConsole<'static>>,
}
