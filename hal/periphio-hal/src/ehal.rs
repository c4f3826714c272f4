//! Adapters for `embedded-hal` 1.0 and `embedded-io` 0.6 drivers
//!
//! Most vendor HALs (embassy, rp-hal, esp-hal, ...) implement the
//! ecosystem traits for their blocking peripherals. Wrapping such a
//! peripheral in one of these adapters makes it usable as a periphio bus
//! without a chip-specific crate.
//!
//! Errors are collapsed into [`ErrorKind`]; the vendor error value itself
//! is not kept.

use embedded_hal::i2c::{self as eh_i2c, Error as _};
use embedded_hal::spi::{self as eh_spi, Error as _};
use embedded_io::Error as _;

use crate::error::ErrorKind;
use crate::i2c::I2cBus;
use crate::spi::SpiBus;
use crate::uart::{UartRx, UartTx};

fn spi_kind(kind: eh_spi::ErrorKind) -> ErrorKind {
    match kind {
        eh_spi::ErrorKind::Overrun => ErrorKind::Overrun,
        eh_spi::ErrorKind::ModeFault => ErrorKind::Mode,
        eh_spi::ErrorKind::FrameFormat => ErrorKind::Framing,
        eh_spi::ErrorKind::ChipSelectFault => ErrorKind::Bus,
        _ => ErrorKind::Other,
    }
}

fn i2c_kind(kind: eh_i2c::ErrorKind) -> ErrorKind {
    match kind {
        eh_i2c::ErrorKind::Bus => ErrorKind::Bus,
        eh_i2c::ErrorKind::ArbitrationLoss => ErrorKind::ArbitrationLost,
        eh_i2c::ErrorKind::NoAcknowledge(_) => ErrorKind::Nack,
        eh_i2c::ErrorKind::Overrun => ErrorKind::Overrun,
        _ => ErrorKind::Other,
    }
}

fn io_kind(kind: embedded_io::ErrorKind) -> ErrorKind {
    match kind {
        embedded_io::ErrorKind::TimedOut => ErrorKind::Timeout,
        embedded_io::ErrorKind::InvalidData => ErrorKind::Framing,
        _ => ErrorKind::Other,
    }
}

/// SPI bus backed by an `embedded_hal::spi::SpiBus`
#[derive(Debug)]
pub struct EhSpi<T> {
    inner: T,
}

impl<T> EhSpi<T> {
    /// Wrap a vendor SPI bus
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the wrapped peripheral
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: eh_spi::SpiBus<u8>> SpiBus for EhSpi<T> {
    type Error = ErrorKind;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(data).map_err(|e| spi_kind(e.kind()))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(buf).map_err(|e| spi_kind(e.kind()))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush().map_err(|e| spi_kind(e.kind()))
    }
}

/// I2C bus backed by an `embedded_hal::i2c::I2c`
#[derive(Debug)]
pub struct EhI2c<T> {
    inner: T,
    last_error: Option<ErrorKind>,
}

impl<T> EhI2c<T> {
    /// Wrap a vendor I2C bus
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            last_error: None,
        }
    }

    /// Access the wrapped peripheral
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn track<R>(&mut self, result: Result<R, eh_i2c::ErrorKind>) -> Result<R, ErrorKind> {
        let result = result.map_err(i2c_kind);
        self.last_error = result.as_ref().err().copied();
        result
    }
}

impl<T: eh_i2c::I2c> I2cBus for EhI2c<T> {
    type Error = ErrorKind;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let result = self.inner.write(address, data).map_err(|e| e.kind());
        self.track(result)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let result = self.inner.read(address, buf).map_err(|e| e.kind());
        self.track(result)
    }

    /// Generic drivers expose no register, so the code is the
    /// position of the last [`ErrorKind`] plus one.
    fn last_error_code(&self) -> u32 {
        self.last_error.map_or(0, |kind| kind as u32 + 1)
    }
}

/// UART backed by an `embedded_io` reader/writer
#[derive(Debug)]
pub struct EioUart<T> {
    inner: T,
}

impl<T> EioUart<T> {
    /// Wrap a vendor serial port
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped peripheral
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Access the wrapped peripheral
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_io::Write> UartTx for EioUart<T> {
    type Error = ErrorKind;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data).map_err(|e| io_kind(e.kind()))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush().map_err(|e| io_kind(e.kind()))
    }
}

impl<T: embedded_io::Read> UartRx for EioUart<T> {
    type Error = ErrorKind;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut n = 0;
        while n < buf.len() {
            match self.inner.read(&mut buf[n..]) {
                // Line went quiet
                Ok(0) => break,
                Ok(k) => n += k,
                // Bytes already taken from the port are still reported
                Err(_) if n > 0 => break,
                Err(e) => return Err(io_kind(e.kind())),
            }
        }
        if n == 0 {
            return Err(ErrorKind::Timeout);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock SPI bus that echoes what it was sent, or fails
    struct MockSpi {
        fail: Option<eh_spi::ErrorKind>,
        written: [u8; 8],
        len: usize,
    }

    impl MockSpi {
        fn new() -> Self {
            Self {
                fail: None,
                written: [0; 8],
                len: 0,
            }
        }

        fn check(&self) -> Result<(), eh_spi::ErrorKind> {
            match self.fail {
                Some(kind) => Err(kind),
                None => Ok(()),
            }
        }
    }

    impl eh_spi::ErrorType for MockSpi {
        type Error = eh_spi::ErrorKind;
    }

    impl eh_spi::SpiBus<u8> for MockSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            self.check()?;
            words.copy_from_slice(&self.written[..words.len()]);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.check()?;
            self.written[..words.len()].copy_from_slice(words);
            self.len = words.len();
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.check()?;
            read.copy_from_slice(write);
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            self.check()
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.check()
        }
    }

    /// Mock I2C bus that NACKs every address except one
    struct MockI2c {
        present: u8,
    }

    impl eh_i2c::ErrorType for MockI2c {
        type Error = eh_i2c::ErrorKind;
    }

    impl eh_i2c::I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [eh_i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.present {
                return Err(eh_i2c::ErrorKind::NoAcknowledge(
                    eh_i2c::NoAcknowledgeSource::Address,
                ));
            }
            for op in operations {
                if let eh_i2c::Operation::Read(buf) = op {
                    buf.fill(0x5A);
                }
            }
            Ok(())
        }
    }

    /// Mock serial port with a fixed amount of pending input
    struct MockSerial {
        pending: usize,
    }

    impl embedded_io::ErrorType for MockSerial {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Read for MockSerial {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.pending);
            buf[..n].fill(b'x');
            self.pending -= n;
            Ok(n)
        }
    }

    impl embedded_io::Write for MockSerial {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_spi_write_then_read() {
        let mut spi = EhSpi::new(MockSpi::new());
        spi.write(&[1, 2, 3]).unwrap();
        let mut buf = [0u8; 3];
        spi.read(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(spi.inner_mut().len, 3);
    }

    #[test]
    fn test_spi_error_mapping() {
        let mut mock = MockSpi::new();
        mock.fail = Some(eh_spi::ErrorKind::Overrun);
        let mut spi = EhSpi::new(mock);
        assert_eq!(spi.write(&[0]), Err(ErrorKind::Overrun));

        spi.inner_mut().fail = Some(eh_spi::ErrorKind::ModeFault);
        assert_eq!(spi.flush(), Err(ErrorKind::Mode));
    }

    #[test]
    fn test_i2c_nack_is_latched() {
        let mut i2c = EhI2c::new(MockI2c { present: 0x3C });
        assert_eq!(i2c.last_error_code(), 0);

        assert_eq!(i2c.write(0x50, &[0]), Err(ErrorKind::Nack));
        assert_ne!(i2c.last_error_code(), 0);

        let mut buf = [0u8; 2];
        i2c.read(0x3C, &mut buf).unwrap();
        assert_eq!(buf, [0x5A, 0x5A]);
        // A good transfer clears the latch
        assert_eq!(i2c.last_error_code(), 0);
    }

    #[test]
    fn test_uart_short_read_keeps_bytes() {
        let mut uart = EioUart::new(MockSerial { pending: 2 });
        let mut buf = [0u8; 4];
        assert_eq!(uart.read_blocking(&mut buf), Ok(2));
        assert_eq!(&buf, b"xx\0\0");

        // Nothing left on the line
        assert_eq!(uart.read_blocking(&mut buf), Err(ErrorKind::Timeout));
        assert_eq!(uart.read_blocking(&mut []), Ok(0));

        let mut uart = EioUart::new(MockSerial { pending: 4 });
        assert_eq!(uart.read_blocking(&mut buf), Ok(4));
        assert_eq!(&buf, b"xxxx");
        uart.write_blocking(b"ok").unwrap();
    }
}
