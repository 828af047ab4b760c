//! STM32F042K6
//!
//! I2C1 on PB6 (SCL) / PB7 (SDA), console on USART2 TX (PA2).

use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::usart::{self, UartTx};
use embassy_stm32::Peripherals;

use busscan_hal::{PollBudget, UartConsole};
pub use busscan_hal_stm32f0::I2cProbe;

use super::Board;
use crate::config::{CONSOLE_BAUD, I2C_CLOCK_HZ};
use crate::serial::SerialConsole;

/// Bring up the scanner's peripherals
pub fn init(p: Peripherals, budget: PollBudget) -> Board {
    // embassy clocks the peripheral and muxes the pins; the probe driver
    // takes over the registers from here
    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c::Config::default());
    // Dropping the driver would gate the I2C clock again
    core::mem::forget(i2c);
    let bus = I2cProbe::new(embassy_stm32::pac::I2C1, I2C_CLOCK_HZ, budget);

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = CONSOLE_BAUD;
    let tx = match UartTx::new_blocking(p.USART2, p.PA2, uart_config) {
        Ok(tx) => tx,
        Err(_) => panic!("console UART rejected {} baud", CONSOLE_BAUD),
    };

    Board {
        bus,
        console: UartConsole::new(SerialConsole::new(tx)),
    }
}
