//! Transfer hooks
//!
//! A [`Transport`] is the only place hardware specifics appear. The
//! device core decides *whether* a transfer may happen; the transport
//! performs it, blocking until the vendor driver returns.

use crate::address::Target;
use crate::command::Status;
use crate::diag::Fault;
use crate::state::{Degradation, Direction, Verbosity};

/// Class of transfer failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferKind {
    /// Vendor driver timed out
    Timeout,
    /// Target did not acknowledge
    Nack,
    /// Data lost on the receive side
    Overrun,
    /// Parity, noise or framing error on the line
    Corrupted,
    /// Bus fault (arbitration lost, misplaced start/stop)
    Bus,
    /// Peripheral fault the driver could not classify
    Hardware,
    /// Address is not valid for this transport; nothing was sent
    Address,
}

impl TransferKind {
    /// Lifecycle degradation this failure causes on a ready device
    pub fn degradation(self) -> Option<Degradation> {
        match self {
            TransferKind::Timeout
            | TransferKind::Nack
            | TransferKind::Overrun
            | TransferKind::Corrupted => Some(Degradation::Runtime),
            TransferKind::Bus | TransferKind::Hardware => Some(Degradation::Hardware),
            TransferKind::Address => None,
        }
    }
}

/// A failed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferError {
    pub kind: TransferKind,
    /// Vendor error code, zero if the driver has none
    pub code: u32,
}

impl TransferError {
    pub const fn new(kind: TransferKind) -> Self {
        Self { kind, code: 0 }
    }

    pub const fn with_code(kind: TransferKind, code: u32) -> Self {
        Self { kind, code }
    }
}

impl From<TransferKind> for TransferError {
    fn from(kind: TransferKind) -> Self {
        Self::new(kind)
    }
}

/// Why a read or write did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Gating refused the call; the transport was not touched
    Refused(Fault),
    /// The transport attempted the transfer and failed
    Transfer(TransferError),
}

impl From<TransferError> for IoError {
    fn from(e: TransferError) -> Self {
        IoError::Transfer(e)
    }
}

/// Details of a refused call, handed to [`Transport::refuse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Refusal {
    pub direction: Direction,
    pub target: Target,
    /// Buffer length, `None` if no buffer was supplied
    pub len: Option<usize>,
    pub fault: Fault,
    /// Device verbosity at the time of the call
    pub verbosity: Verbosity,
}

/// Per-transport transfer and lifecycle hooks
///
/// Only [`read_ex`](Transport::read_ex) and
/// [`write_ex`](Transport::write_ex) are required. A transport that does
/// not override the lifecycle hooks gets the core's state-machine-only
/// behavior.
pub trait Transport {
    /// Read into `buf`, returning the number of bytes transferred
    fn read_ex(&mut self, target: Target, buf: &mut [u8]) -> Result<usize, TransferError>;

    /// Write `buf`, returning the number of bytes transferred
    fn write_ex(&mut self, target: Target, buf: &[u8]) -> Result<usize, TransferError>;

    /// Physical bring-up, after the device entered `Ready`
    fn on_init(&mut self) -> Result<(), TransferError> {
        Ok(())
    }

    /// Physical recovery, after a reset left a fault state
    fn on_reset(&mut self) -> Result<(), TransferError> {
        Ok(())
    }

    /// Physical tear-down, after the device entered `Shutdown`
    fn on_shutdown(&mut self) {}

    /// Handle a transport-owned opcode
    ///
    /// Called for opcodes at or above
    /// [`Opcode::TRANSPORT_BASE`](crate::command::Opcode::TRANSPORT_BASE).
    /// `params` is `None` for the single-argument overload. Returning
    /// `None` leaves the opcode to the core, which reports it unknown.
    fn command(&mut self, _opcode: u32, _params: Option<(usize, usize)>) -> Option<Status> {
        None
    }

    /// Called after gating refused a call
    fn refuse(&mut self, refusal: &Refusal) {
        if refusal.verbosity >= Verbosity::HIGH {
            info!(
                "refused {} at {}: {}",
                refusal.direction,
                refusal.target.addr,
                refusal.fault
            );
        }
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read_ex(&mut self, target: Target, buf: &mut [u8]) -> Result<usize, TransferError> {
        T::read_ex(self, target, buf)
    }

    fn write_ex(&mut self, target: Target, buf: &[u8]) -> Result<usize, TransferError> {
        T::write_ex(self, target, buf)
    }

    fn on_init(&mut self) -> Result<(), TransferError> {
        T::on_init(self)
    }

    fn on_reset(&mut self) -> Result<(), TransferError> {
        T::on_reset(self)
    }

    fn on_shutdown(&mut self) {
        T::on_shutdown(self)
    }

    fn command(&mut self, opcode: u32, params: Option<(usize, usize)>) -> Option<Status> {
        T::command(self, opcode, params)
    }

    fn refuse(&mut self, refusal: &Refusal) {
        T::refuse(self, refusal)
    }
}
