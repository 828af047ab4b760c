//! Console output
//!
//! The scan report is plain text, one line per event, written to
//! whatever serial terminal is attached.

use core::fmt::{self, Write};

use crate::uart::UartTx;

/// Line-oriented text sink
pub trait ConsoleSink {
    /// Error type for write operations
    type Error;

    /// Write one line of text; the sink appends the line terminator
    fn write_line(&mut self, line: fmt::Arguments<'_>) -> Result<(), Self::Error>;

    /// Write an empty line
    fn blank_line(&mut self) -> Result<(), Self::Error> {
        self.write_line(format_args!(""))
    }
}

impl<C: ConsoleSink + ?Sized> ConsoleSink for &mut C {
    type Error = C::Error;

    fn write_line(&mut self, line: fmt::Arguments<'_>) -> Result<(), Self::Error> {
        (**self).write_line(line)
    }
}

/// Console over any UART transmitter
///
/// Serial terminals expect CR LF, so every `\n` in the formatted text
/// goes out as `\r\n`, as does the terminator.
pub struct UartConsole<T> {
    tx: T,
}

impl<T: UartTx> UartConsole<T> {
    /// Create a console writing to `tx`
    pub fn new(tx: T) -> Self {
        Self { tx }
    }

    /// Get access to the underlying transmitter
    pub fn inner(&mut self) -> &mut T {
        &mut self.tx
    }

    /// Release the underlying transmitter
    pub fn into_inner(self) -> T {
        self.tx
    }
}

impl<T: UartTx> ConsoleSink for UartConsole<T> {
    type Error = T::Error;

    fn write_line(&mut self, line: fmt::Arguments<'_>) -> Result<(), Self::Error> {
        let mut writer = CrLfWriter {
            tx: &mut self.tx,
            error: None,
        };
        // fmt::Error only ever comes from our own writer, which parks the
        // real error in `writer.error`
        let _ = writer.write_fmt(line);
        if writer.error.is_none() {
            let _ = writer.write_str("\n");
        }
        if let Some(e) = writer.error {
            return Err(e);
        }
        self.tx.flush()
    }
}

/// `fmt::Write` adapter that expands `\n` and keeps the first UART error
struct CrLfWriter<'a, T: UartTx> {
    tx: &'a mut T,
    error: Option<T::Error>,
}

impl<T: UartTx> Write for CrLfWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut rest = s;
        while let Some(pos) = rest.find('\n') {
            self.send(&rest.as_bytes()[..pos])?;
            self.send(b"\r\n")?;
            rest = &rest[pos + 1..];
        }
        self.send(rest.as_bytes())
    }
}

impl<T: UartTx> CrLfWriter<'_, T> {
    fn send(&mut self, bytes: &[u8]) -> fmt::Result {
        if bytes.is_empty() || self.error.is_some() {
            return Ok(());
        }
        self.tx.write_blocking(bytes).map_err(|e| {
            self.error.get_or_insert(e);
            fmt::Error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct MockUart {
        sent: Vec<u8, 256>,
        flushes: u32,
        fail: bool,
    }

    impl MockUart {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                flushes: 0,
                fail: false,
            }
        }
    }

    impl UartTx for MockUart {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.sent.extend_from_slice(data).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_line_gets_crlf() {
        let mut console = UartConsole::new(MockUart::new());
        console
            .write_line(format_args!("Found device on address: 0x{:02X} ({})", 0x3C, 0x3C))
            .unwrap();
        assert_eq!(
            console.inner().sent.as_slice(),
            b"Found device on address: 0x3C (60)\r\n"
        );
        assert_eq!(console.inner().flushes, 1);
    }

    #[test]
    fn test_embedded_newlines_expanded() {
        let mut console = UartConsole::new(MockUart::new());
        console.write_line(format_args!("done\n")).unwrap();
        assert_eq!(console.inner().sent.as_slice(), b"done\r\n\r\n");
    }

    #[test]
    fn test_blank_line() {
        let mut console = UartConsole::new(MockUart::new());
        console.blank_line().unwrap();
        assert_eq!(console.inner().sent.as_slice(), b"\r\n");
    }

    /// Fails every write with the write's sequence number
    struct CountingFailUart {
        writes: u32,
    }

    impl UartTx for CountingFailUart {
        type Error = u32;

        fn write_blocking(&mut self, _data: &[u8]) -> Result<(), u32> {
            self.writes += 1;
            Err(self.writes)
        }

        fn flush(&mut self) -> Result<(), u32> {
            Ok(())
        }
    }

    #[test]
    fn test_first_uart_error_wins() {
        let mut console = UartConsole::new(CountingFailUart { writes: 0 });
        let result = console.write_line(format_args!("Scanning {} ...", 100));

        assert_eq!(result, Err(1));
        // Nothing more is sent once the UART has failed
        assert_eq!(console.inner().writes, 1);
    }

    #[test]
    fn test_uart_error_propagates() {
        let mut uart = MockUart::new();
        uart.fail = true;
        let mut console = UartConsole::new(uart);
        assert_eq!(console.write_line(format_args!("lost")), Err(()));
        assert_eq!(console.inner().flushes, 0);
    }
}
