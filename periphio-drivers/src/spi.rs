//! SPI transport
//!
//! Binds one SPI master. The per-call address is ignored; chip select is
//! the caller's business, as with the vendor blocking drivers.

use periphio_core::{Target, TransferError, Transport};
use periphio_hal::SpiBus;

use crate::error::transfer_error;

/// SPI device transport
pub struct SpiTransport<B> {
    bus: B,
}

impl<B: SpiBus> SpiTransport<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
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
}

impl<B: SpiBus> Transport for SpiTransport<B> {
    fn read_ex(&mut self, _target: Target, buf: &mut [u8]) -> Result<usize, TransferError> {
        self.bus.read(buf).map_err(|e| transfer_error(&e))?;
        Ok(buf.len())
    }

    fn write_ex(&mut self, _target: Target, buf: &[u8]) -> Result<usize, TransferError> {
        self.bus.write(buf).map_err(|e| transfer_error(&e))?;
        self.bus.flush().map_err(|e| transfer_error(&e))?;
        Ok(buf.len())
    }

    fn on_shutdown(&mut self) {
        // Let the last frame leave the shift register
        if let Err(_e) = self.bus.flush() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "spi flush on shutdown failed: {}",
                periphio_hal::Error::kind(&_e)
            );
        }
    }
}
