//! periphio Hardware Abstraction Layer
//!
//! This crate defines the narrow contract between periphio transport
//! adapters and the blocking vendor drivers underneath them. Chip-specific
//! crates (STM32, etc.) implement these traits on top of their peripheral
//! handles, so the transport adapters never see a register.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (read / write / command)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periphio-core + periphio-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  periphio-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ periphio-hal- │       │ any embedded- │
//! │    stm32      │       │ hal 1.0 HAL   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`error::Error`] - Classification of vendor bus errors
//!
//! The [`ehal`] module wraps any `embedded-hal` / `embedded-io`
//! implementation so it can be used as one of the buses above.

#![no_std]
#![deny(unsafe_code)]

pub mod ehal;
pub mod error;
pub mod i2c;
pub mod spi;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use error::{Error, ErrorKind};
pub use i2c::I2cBus;
pub use spi::SpiBus;
pub use uart::{UartRx, UartTx};
