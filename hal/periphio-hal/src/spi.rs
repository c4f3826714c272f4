//! SPI bus abstractions
//!
//! Provides the blocking SPI master contract that chip-specific HALs
//! implement for the SPI transport adapter.

use crate::error::Error;

/// SPI bus master
///
/// All operations block until the transfer completes. Chip select and
/// bus configuration belong to the board bring-up code.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error: Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data (writes zeros)
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Wait until the bus is idle
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}
