//! UART serial communication abstractions
//!
//! Provides the blocking serial contract that chip-specific HALs
//! implement for the UART transport adapter.

use crate::error::Error;

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error: Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error: Error;

    /// Read data from the UART
    ///
    /// Blocks until the buffer is filled or the line goes quiet, and
    /// returns the number of bytes received.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_blocking(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

impl<T: UartRx + ?Sized> UartRx for &mut T {
    type Error = T::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read_blocking(self, buf)
    }
}
