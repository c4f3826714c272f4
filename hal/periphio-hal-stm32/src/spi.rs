//! SPI bus driver for STM32
//!
//! Wraps an embassy-stm32 blocking SPI master.

use embassy_stm32::spi::Error as SpiError;
use periphio_hal::{ErrorKind, SpiBus};

/// Error from SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError {
    /// Invalid frame format
    Framing,
    /// CRC error
    Crc,
    /// Mode fault
    ModeFault,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<SpiError> for SpiBusError {
    fn from(e: SpiError) -> Self {
        match e {
            SpiError::Framing => SpiBusError::Framing,
            SpiError::Crc => SpiBusError::Crc,
            SpiError::ModeFault => SpiBusError::ModeFault,
            SpiError::Overrun => SpiBusError::Overrun,
            #[allow(unreachable_patterns)]
            _ => SpiBusError::Other,
        }
    }
}

impl periphio_hal::Error for SpiBusError {
    fn kind(&self) -> ErrorKind {
        match self {
            SpiBusError::Framing | SpiBusError::Crc => ErrorKind::Framing,
            SpiBusError::ModeFault => ErrorKind::Mode,
            SpiBusError::Overrun => ErrorKind::Overrun,
            SpiBusError::Other => ErrorKind::Other,
        }
    }
}

/// STM32 SPI master bound to the periphio bus contract
pub struct Stm32Spi<T> {
    inner: T,
}

impl<T> Stm32Spi<T>
where
    T: embedded_hal::spi::SpiBus<u8, Error = SpiError>,
{
    /// Wrap a configured embassy-stm32 SPI master
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T> SpiBus for Stm32Spi<T>
where
    T: embedded_hal::spi::SpiBus<u8, Error = SpiError>,
{
    type Error = SpiBusError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Ok(self.inner.write(data)?)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        Ok(self.inner.read(buf)?)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(self.inner.flush()?)
    }
}
