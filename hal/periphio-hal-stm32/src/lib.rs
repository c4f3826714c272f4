//! STM32-specific bindings for periphio
//!
//! This crate binds `embassy-stm32` blocking peripherals to the
//! `periphio-hal` bus traits, so they can back the SPI / I2C / UART
//! transport adapters. It supports the STM32 families embassy covers,
//! including:
//!
//! - STM32L151CB / STM32L152RE
//! - STM32F042K6
//!
//! # Features
//!
//! - `stm32l151cb`, `stm32l152re`, `stm32f042k6` - chip selection
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Peripheral construction (pins, clocks, interrupts) stays with the
//! board bring-up code. Hand the finished embassy handle to one of the
//! wrappers here and pass the wrapper to a transport adapter.

#![no_std]

pub mod i2c;
pub mod spi;
pub mod uart;

pub use i2c::{I2cBusError, Stm32I2c};
pub use spi::{SpiBusError, Stm32Spi};
pub use uart::{Stm32Uart, UartBusError};
