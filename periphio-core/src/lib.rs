//! Board-agnostic peripheral device core
//!
//! This crate contains everything about a peripheral device that does not
//! depend on the bus it sits on:
//!
//! - Packed state record and lifecycle state machine
//! - Capability, lock and readiness gating of reads and writes
//! - Numeric command protocol
//! - Diagnostics taxonomy and sinks
//! - Configuration type definitions
//!
//! Bus-specific behavior enters through the [`Transport`] trait; the
//! `periphio-drivers` crate provides SPI, UART and I2C transports.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

pub mod address;
pub mod command;
pub mod config;
pub mod control;
pub mod device;
pub mod diag;
pub mod state;
pub mod transport;

pub use address::{Address, Target};
pub use command::{Opcode, Status};
pub use config::DeviceConfig;
pub use control::{broadcast, BroadcastReport, Control, IoDevice};
pub use device::Device;
pub use diag::{Diagnostics, Fault, Severity};
pub use state::{Capabilities, DeviceState, Direction, Lifecycle, Verbosity};
pub use transport::{IoError, Refusal, TransferError, TransferKind, Transport};
