//! I2C transport
//!
//! Binds one I2C master. The per-call address is the 7-bit slave address;
//! anything wider is refused before the bus is touched.
//!
//! After a transfer reports a timeout or hardware fault, the vendor's
//! latched error code is available from
//! [`I2cTransport::last_hardware_error`].

use periphio_core::{Address, Target, TransferError, TransferKind, Transport};
use periphio_hal::i2c::MAX_ADDRESS;
use periphio_hal::I2cBus;

use crate::error::transfer_error;

/// I2C device transport
pub struct I2cTransport<B> {
    bus: B,
}

impl<B: I2cBus> I2cTransport<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Vendor error code latched by the last transfer, zero if none
    pub fn last_hardware_error(&self) -> u32 {
        self.bus.last_error_code()
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    fn fault(&self, error: &B::Error) -> TransferError {
        let mut fault = transfer_error(error);
        if fault.code == 0 {
            fault.code = self.bus.last_error_code();
        }
        fault
    }
}

/// 7-bit slave address, if `addr` fits
fn slave_address(addr: Address) -> Result<u8, TransferError> {
    match u8::try_from(addr.get()) {
        Ok(a) if a <= MAX_ADDRESS => Ok(a),
        _ => Err(TransferError::new(TransferKind::Address)),
    }
}

impl<B: I2cBus> Transport for I2cTransport<B> {
    fn read_ex(&mut self, target: Target, buf: &mut [u8]) -> Result<usize, TransferError> {
        let address = slave_address(target.addr)?;
        self.bus
            .read(address, buf)
            .map_err(|e| self.fault(&e))?;
        Ok(buf.len())
    }

    fn write_ex(&mut self, target: Target, buf: &[u8]) -> Result<usize, TransferError> {
        let address = slave_address(target.addr)?;
        self.bus
            .write(address, buf)
            .map_err(|e| self.fault(&e))?;
        Ok(buf.len())
    }
}
