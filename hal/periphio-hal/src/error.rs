//! Bus error classification
//!
//! Vendor drivers each have their own error enums. Transport adapters only
//! need to know what class of fault happened, so every bus error type
//! reports an [`ErrorKind`] and, optionally, the raw vendor code.

/// Class of a bus fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Transfer did not complete in time
    Timeout,
    /// Target did not acknowledge (I2C)
    Nack,
    /// Data was lost because it was not read in time
    Overrun,
    /// Another master won the bus (I2C)
    ArbitrationLost,
    /// Misplaced start/stop or other bus-level fault
    Bus,
    /// Frame format violated (UART stop bit, SPI frame)
    Framing,
    /// Parity check failed
    Parity,
    /// Line noise detected
    Noise,
    /// Peripheral in the wrong mode for the request
    Mode,
    /// Anything the vendor driver could not classify
    Other,
}

/// Bus error reported by a vendor driver
pub trait Error: core::fmt::Debug {
    /// Classify this error
    fn kind(&self) -> ErrorKind;

    /// Raw vendor error code, if the driver keeps one
    fn code(&self) -> u32 {
        0
    }
}

impl Error for ErrorKind {
    fn kind(&self) -> ErrorKind {
        *self
    }
}

impl Error for core::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}
