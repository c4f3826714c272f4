//! Transport-erased device handles
//!
//! Bring-up code usually holds a table of heterogeneous devices. These
//! traits are object safe so such a table can be `&mut [&mut dyn Control]`
//! without naming any transport type.

use crate::address::Address;
use crate::command::Status;
use crate::device::Device;
use crate::diag::Diagnostics;
use crate::state::{Lifecycle, Verbosity};
use crate::transport::{IoError, Transport};

/// Command channel and state queries
pub trait Control {
    fn command(&mut self, opcode: u32) -> Status;
    fn command_ex(&mut self, opcode: u32, wparam: usize, lparam: usize) -> Status;
    fn lifecycle(&self) -> Lifecycle;
    fn is_locked(&self) -> bool;
    fn verbosity(&self) -> Verbosity;
    fn base_address(&self) -> Option<Address>;
}

/// Gated data path
pub trait IoDevice {
    fn read(&mut self, addr: Address, buf: Option<&mut [u8]>) -> Result<usize, IoError>;
    fn write(&mut self, addr: Address, buf: Option<&[u8]>) -> Result<usize, IoError>;
}

impl<T: Transport, D: Diagnostics> Control for Device<T, D> {
    fn command(&mut self, opcode: u32) -> Status {
        Device::command(self, opcode)
    }

    fn command_ex(&mut self, opcode: u32, wparam: usize, lparam: usize) -> Status {
        Device::command_ex(self, opcode, wparam, lparam)
    }

    fn lifecycle(&self) -> Lifecycle {
        Device::lifecycle(self)
    }

    fn is_locked(&self) -> bool {
        Device::is_locked(self)
    }

    fn verbosity(&self) -> Verbosity {
        Device::verbosity(self)
    }

    fn base_address(&self) -> Option<Address> {
        Device::base_address(self)
    }
}

impl<T: Transport, D: Diagnostics> IoDevice for Device<T, D> {
    fn read(&mut self, addr: Address, buf: Option<&mut [u8]>) -> Result<usize, IoError> {
        Device::read(self, addr, buf)
    }

    fn write(&mut self, addr: Address, buf: Option<&[u8]>) -> Result<usize, IoError> {
        Device::write(self, addr, buf)
    }
}

/// Outcome counts of a [`broadcast`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BroadcastReport {
    pub ok: usize,
    pub rejected: usize,
    pub unknown: usize,
    /// Devices left outside `Ready` after the command
    pub not_ready: usize,
}

impl BroadcastReport {
    pub fn total(&self) -> usize {
        self.ok + self.rejected + self.unknown
    }

    /// Check if every device accepted the command
    pub fn all_ok(&self) -> bool {
        self.rejected == 0 && self.unknown == 0
    }
}

/// Send one single-argument opcode to every device, in order
pub fn broadcast(devices: &mut [&mut dyn Control], opcode: u32) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for device in devices.iter_mut() {
        match device.command(opcode) {
            Status::Ok => report.ok += 1,
            Status::Rejected => report.rejected += 1,
            Status::Unknown => report.unknown += 1,
        }
        if device.lifecycle() != Lifecycle::Ready {
            report.not_ready += 1;
        }
    }

    debug!(
        "broadcast {=u32:#x}: {} ok, {} rejected, {} unknown",
        opcode,
        report.ok,
        report.rejected,
        report.unknown
    );
    report
}
