//! Transport implementations
//!
//! This crate provides concrete implementations of the
//! [`Transport`](periphio_core::Transport) trait for the buses described
//! in periphio-hal:
//!
//! - SPI master ([`SpiTransport`])
//! - I2C master with hardware error retrieval ([`I2cTransport`])
//! - UART ([`UartTransport`])
//! - In-memory loopback for bring-up and tests ([`LoopbackTransport`])
//!
//! A transport is wrapped in a [`Device`](periphio_core::Device) to get
//! gating, lifecycle and the command protocol.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod error;
pub mod i2c;
pub mod loopback;
pub mod spi;
pub mod uart;

pub use i2c::I2cTransport;
pub use loopback::LoopbackTransport;
pub use spi::SpiTransport;
pub use uart::{UartTransport, UART_FLUSH};
