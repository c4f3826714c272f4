//! UART driver for STM32
//!
//! Wraps an embassy-stm32 blocking USART.

use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::{Error as UsartError, Uart};
use periphio_hal::{ErrorKind, UartRx, UartTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too small
    BufferTooSmall,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooSmall,
            _ => UartBusError::Other,
        }
    }
}

impl periphio_hal::Error for UartBusError {
    fn kind(&self) -> ErrorKind {
        match self {
            UartBusError::Framing => ErrorKind::Framing,
            UartBusError::Noise => ErrorKind::Noise,
            UartBusError::Overrun => ErrorKind::Overrun,
            UartBusError::Parity => ErrorKind::Parity,
            UartBusError::BufferTooSmall | UartBusError::Other => ErrorKind::Other,
        }
    }
}

/// STM32 USART bound to the periphio bus contract
pub struct Stm32Uart<'d> {
    inner: Uart<'d, Blocking>,
}

impl<'d> Stm32Uart<'d> {
    /// Wrap a configured embassy-stm32 blocking USART
    pub fn new(inner: Uart<'d, Blocking>) -> Self {
        Self { inner }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> Uart<'d, Blocking> {
        self.inner
    }
}

impl UartTx for Stm32Uart<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Ok(self.inner.blocking_write(data)?)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(self.inner.blocking_flush()?)
    }
}

impl UartRx for Stm32Uart<'_> {
    type Error = UartBusError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.blocking_read(buf)?;
        Ok(buf.len())
    }
}
