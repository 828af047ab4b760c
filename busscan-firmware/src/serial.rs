//! Serial console
//!
//! Both supported chips use the same embassy USART driver, so a single
//! adapter serves every board. Transmit-only: the scanner never reads
//! from the serial port.

use busscan_hal::UartTx;
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{self, Error as UsartError};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too small
    BufferTooSmall,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooSmall,
            _ => UartBusError::Other,
        }
    }
}

/// Blocking USART transmitter used as the scan console
pub struct SerialConsole<'d> {
    tx: usart::UartTx<'d, Blocking>,
}

impl<'d> SerialConsole<'d> {
    /// Wrap an embassy transmitter
    pub fn new(tx: usart::UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for SerialConsole<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data).map_err(UartBusError::from)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush().map_err(UartBusError::from)
    }
}
