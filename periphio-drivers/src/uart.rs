//! UART transport
//!
//! Binds one serial port. The per-call address is ignored. Reads block
//! until the buffer is full or the vendor driver gives up.

use periphio_core::{Opcode, Status, Target, TransferError, Transport};
use periphio_hal::{UartRx, UartTx};

use crate::error::transfer_error;

/// Flush the transmitter (single-argument overload)
pub const UART_FLUSH: u32 = Opcode::TRANSPORT_BASE;

/// UART device transport
pub struct UartTransport<U> {
    port: U,
}

impl<U: UartTx + UartRx> UartTransport<U> {
    pub fn new(port: U) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &U {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut U {
        &mut self.port
    }

    pub fn into_inner(self) -> U {
        self.port
    }

    fn flush(&mut self) -> Result<(), TransferError> {
        UartTx::flush(&mut self.port).map_err(|e| transfer_error(&e))
    }
}

impl<U: UartTx + UartRx> Transport for UartTransport<U> {
    fn read_ex(&mut self, _target: Target, buf: &mut [u8]) -> Result<usize, TransferError> {
        self.port.read_blocking(buf).map_err(|e| transfer_error(&e))
    }

    fn write_ex(&mut self, _target: Target, buf: &[u8]) -> Result<usize, TransferError> {
        self.port
            .write_blocking(buf)
            .map_err(|e| transfer_error(&e))?;
        Ok(buf.len())
    }

    fn on_shutdown(&mut self) {
        if let Err(_e) = self.flush() {
            #[cfg(feature = "defmt")]
            defmt::warn!("uart flush on shutdown failed: {}", _e);
        }
    }

    fn command(&mut self, opcode: u32, params: Option<(usize, usize)>) -> Option<Status> {
        match (opcode, params) {
            (UART_FLUSH, None) => Some(match self.flush() {
                Ok(()) => Status::Ok,
                Err(_) => Status::Rejected,
            }),
            _ => None,
        }
    }
}
