//! I2C bus driver for STM32
//!
//! Wraps an embassy-stm32 blocking I2C master and latches an STM32
//! HAL-style error register after each transfer, so callers can fetch
//! the hardware error code after a timeout or NACK.

use embassy_stm32::i2c::Error as I2cError;
use periphio_hal::{ErrorKind, I2cBus};

/// STM32 HAL error bits for I2C
pub mod errcode {
    /// No error
    pub const NONE: u32 = 0x00;
    /// Bus error (misplaced start/stop)
    pub const BERR: u32 = 0x01;
    /// Arbitration lost
    pub const ARLO: u32 = 0x02;
    /// Acknowledge failure
    pub const AF: u32 = 0x04;
    /// Overrun / underrun
    pub const OVR: u32 = 0x08;
    /// Timeout
    pub const TIMEOUT: u32 = 0x20;
    /// Errors with no STM32 HAL bit (CRC, zero-length transfer)
    pub const OTHER: u32 = 0x100;
}

// Note: embassy-stm32 v0.5 I2C has different generics (Mode, MasterMode).
// The wrapper is generic over the embedded-hal implementation instead.

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Timeout
    Timeout,
    /// CRC error
    Crc,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl I2cBusError {
    /// STM32 HAL error bit for this error
    pub fn hal_code(self) -> u32 {
        match self {
            I2cBusError::Bus => errcode::BERR,
            I2cBusError::ArbitrationLost => errcode::ARLO,
            I2cBusError::Nack => errcode::AF,
            I2cBusError::Overrun => errcode::OVR,
            I2cBusError::Timeout => errcode::TIMEOUT,
            I2cBusError::Crc | I2cBusError::Other => errcode::OTHER,
        }
    }
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Bus => I2cBusError::Bus,
            I2cError::Arbitration => I2cBusError::ArbitrationLost,
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Crc => I2cBusError::Crc,
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl periphio_hal::Error for I2cBusError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2cBusError::Bus => ErrorKind::Bus,
            I2cBusError::ArbitrationLost => ErrorKind::ArbitrationLost,
            I2cBusError::Nack => ErrorKind::Nack,
            I2cBusError::Timeout => ErrorKind::Timeout,
            I2cBusError::Crc => ErrorKind::Framing,
            I2cBusError::Overrun => ErrorKind::Overrun,
            I2cBusError::Other => ErrorKind::Other,
        }
    }

    fn code(&self) -> u32 {
        self.hal_code()
    }
}

/// STM32 I2C master bound to the periphio bus contract
pub struct Stm32I2c<T> {
    inner: T,
    error_code: u32,
}

impl<T> Stm32I2c<T>
where
    T: embedded_hal::i2c::I2c<Error = I2cError>,
{
    /// Wrap a configured embassy-stm32 I2C master
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            error_code: errcode::NONE,
        }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> T {
        self.inner
    }

    fn latch<R>(&mut self, result: Result<R, I2cError>) -> Result<R, I2cBusError> {
        match result {
            Ok(value) => {
                self.error_code = errcode::NONE;
                Ok(value)
            }
            Err(e) => {
                let error = I2cBusError::from(e);
                self.error_code = error.hal_code();
                Err(error)
            }
        }
    }
}

impl<T> I2cBus for Stm32I2c<T>
where
    T: embedded_hal::i2c::I2c<Error = I2cError>,
{
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let result = self.inner.write(address, data);
        self.latch(result)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let result = self.inner.read(address, buf);
        self.latch(result)
    }

    fn last_error_code(&self) -> u32 {
        self.error_code
    }
}
