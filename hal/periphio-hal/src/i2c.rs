//! I2C bus abstractions
//!
//! Provides the blocking I2C master contract that chip-specific HALs
//! implement for the I2C transport adapter.

use crate::error::Error;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Error code latched by the peripheral after the last transfer
    ///
    /// Zero means no error. The encoding is vendor specific; callers
    /// inspect it after a transfer reported a timeout or hardware fault.
    fn last_error_code(&self) -> u32 {
        0
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn last_error_code(&self) -> u32 {
        T::last_error_code(self)
    }
}

/// Highest valid 7-bit address
pub const MAX_ADDRESS: u8 = 0x7F;
