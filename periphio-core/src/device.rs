//! Generic device
//!
//! One device core shared by every transport. It owns the state record,
//! the write-once base address, the transport and the diagnostics sink,
//! and enforces three protocols:
//!
//! - **Lifecycle**: `init` / `reset` / `shutdown` move the state through
//!   the machine in [`crate::state::machine`]. The core does no physical
//!   work; the transport's hooks run after the state has moved.
//! - **Gating**: `read` / `write` check capability, lock, readiness and
//!   buffer, in that order. The first failure signals the sink, calls the
//!   transport's `refuse` hook and returns without touching the bus.
//! - **Commands**: `command` / `command_ex` dispatch integer opcodes and
//!   never panic; faults come back as diagnostics plus a [`Status`].

use heapless::String;

use crate::address::{Address, BaseAddress, Target};
use crate::command::{Opcode, Status};
use crate::config::{DeviceConfig, MAX_LABEL_LEN};
use crate::diag::{Diagnostics, Fault};
use crate::state::{
    Capabilities, Degradation, DeviceState, Direction, Event, Lifecycle, Verbosity,
};
use crate::transport::{IoError, Refusal, TransferError, Transport};

/// A peripheral endpoint with gated read/write and a command channel
pub struct Device<T, D> {
    state: DeviceState,
    base: BaseAddress,
    label: String<MAX_LABEL_LEN>,
    transport: T,
    diag: D,
}

impl<T: Transport, D: Diagnostics> Device<T, D> {
    /// Create a device in `Shutdown`, with no base address
    pub fn new(transport: T, capabilities: Capabilities, diag: D) -> Self {
        Self {
            state: DeviceState::new(capabilities),
            base: BaseAddress::unset(),
            label: String::new(),
            transport,
            diag,
        }
    }

    /// Create a device from a configuration
    ///
    /// Applies the verbosity, registers the base address and runs `init`
    /// if the configuration asks for it.
    pub fn with_config(transport: T, config: &DeviceConfig, diag: D) -> Self {
        let mut device = Self::new(transport, config.capabilities, diag);
        device.label = config.label.clone();
        device.state.set_verbosity(config.verbosity);
        if let Some(base) = config.base {
            device.register(base);
        }
        if config.auto_init {
            device.init();
        }
        device
    }

    /// Snapshot of the state record
    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.state.capabilities()
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    pub fn verbosity(&self) -> Verbosity {
        self.state.verbosity()
    }

    pub fn base_address(&self) -> Option<Address> {
        self.base.get()
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Direct access to the transport
    ///
    /// Calls made through this reference bypass gating.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn diagnostics(&self) -> &D {
        &self.diag
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diag
    }

    /// Tear the device apart, releasing transport and sink
    pub fn into_parts(self) -> (T, D) {
        (self.transport, self.diag)
    }

    // --- Lifecycle ---

    /// `Shutdown` → `Ready`, then the transport's bring-up hook
    pub fn init(&mut self) {
        if self.apply(Event::Init) {
            if let Err(e) = self.transport.on_init() {
                self.hook_failed(e);
            }
        }
    }

    /// Leave a fault state, then the transport's recovery hook
    pub fn reset(&mut self) {
        if self.apply(Event::Reset) {
            if let Err(e) = self.transport.on_reset() {
                self.hook_failed(e);
            }
        }
    }

    /// Any state → `Shutdown`, then the transport's tear-down hook
    pub fn shutdown(&mut self) {
        self.apply(Event::Shutdown);
        self.transport.on_shutdown();
    }

    /// Record a transport failure detected outside a gated transfer
    ///
    /// A ready device degrades to `Error` or `RuntimeError` depending on
    /// the failure; devices in any other state are left alone.
    pub fn report_fault(&mut self, error: TransferError) {
        self.degrade(error, error.kind.degradation());
    }

    /// Bring-up or recovery hook failed
    ///
    /// The device never stays `Ready` after this, even for failures that
    /// would not degrade a transfer.
    fn hook_failed(&mut self, error: TransferError) {
        let degradation = error.kind.degradation().unwrap_or(Degradation::Hardware);
        self.degrade(error, Some(degradation));
    }

    fn degrade(&mut self, error: TransferError, degradation: Option<Degradation>) {
        if let Some(degradation) = degradation {
            self.apply(Event::TransportFault(degradation));
        }
        let lifecycle = self.state.lifecycle();
        if lifecycle.is_fault() {
            warn!("{}: transport fault {}, {}", self.label.as_str(), error, lifecycle);
        } else {
            debug!("{}: transport fault {} in {}", self.label.as_str(), error, lifecycle);
        }
    }

    /// Apply a lifecycle event; returns whether the state moved
    fn apply(&mut self, event: Event) -> bool {
        let from = self.state.lifecycle();
        let transition = from.transition(event);

        if let Some(fault) = transition.signal {
            self.diag.signal(fault);
        }

        if transition.next == from {
            return false;
        }

        debug!(
            "{}: {} -> {}",
            self.label.as_str(),
            from,
            transition.next
        );
        self.state.set_lifecycle(transition.next);
        true
    }

    // --- Gated transfers ---

    /// Read into `buf` from `addr`
    ///
    /// Returns the byte count reported by the transport.
    pub fn read<'b>(
        &mut self,
        addr: Address,
        buf: impl Into<Option<&'b mut [u8]>>,
    ) -> Result<usize, IoError> {
        let buf = buf.into();
        let target = self.target(addr);
        let len = buf.as_ref().map(|b| b.len());

        if let Err(fault) = self.admit(Direction::Read) {
            return Err(self.refuse(Direction::Read, target, len, fault));
        }
        let Some(buf) = buf else {
            return Err(self.refuse(Direction::Read, target, len, Fault::MemoryUnavailable));
        };

        let result = self.transport.read_ex(target, buf);
        self.complete(result)
    }

    /// Write `buf` to `addr`
    ///
    /// Returns the byte count reported by the transport.
    pub fn write<'b>(
        &mut self,
        addr: Address,
        buf: impl Into<Option<&'b [u8]>>,
    ) -> Result<usize, IoError> {
        let buf = buf.into();
        let target = self.target(addr);
        let len = buf.map(|b| b.len());

        if let Err(fault) = self.admit(Direction::Write) {
            return Err(self.refuse(Direction::Write, target, len, fault));
        }
        let Some(buf) = buf else {
            return Err(self.refuse(Direction::Write, target, len, Fault::MemoryUnavailable));
        };

        let result = self.transport.write_ex(target, buf);
        self.complete(result)
    }

    fn target(&self, addr: Address) -> Target {
        Target {
            base: self.base.get(),
            addr,
        }
    }

    /// Capability, lock and readiness checks, in that order
    fn admit(&self, direction: Direction) -> Result<(), Fault> {
        if !self.state.supports(direction) {
            return Err(Fault::UnsupportedDirection(direction));
        }
        if self.state.is_locked() {
            return Err(Fault::Locked);
        }
        if self.state.lifecycle() != Lifecycle::Ready {
            return Err(Fault::NotReady);
        }
        Ok(())
    }

    fn refuse(
        &mut self,
        direction: Direction,
        target: Target,
        len: Option<usize>,
        fault: Fault,
    ) -> IoError {
        self.diag.signal(fault);
        self.transport.refuse(&Refusal {
            direction,
            target,
            len,
            fault,
            verbosity: self.state.verbosity(),
        });
        IoError::Refused(fault)
    }

    fn complete(&mut self, result: Result<usize, TransferError>) -> Result<usize, IoError> {
        result.map_err(|e| {
            self.report_fault(e);
            IoError::Transfer(e)
        })
    }

    // --- Commands ---

    /// Single-argument command
    pub fn command(&mut self, opcode: u32) -> Status {
        if Opcode::is_transport(opcode) {
            if let Some(status) = self.transport.command(opcode, None) {
                return status;
            }
        }

        match Opcode::try_from(opcode) {
            Ok(Opcode::Unlock) => self.state.set_locked(false),
            Ok(Opcode::Lock) => self.state.set_locked(true),
            Ok(Opcode::Reset) => self.reset(),
            Ok(Opcode::Init) => self.init(),
            Ok(Opcode::Shutdown) => self.shutdown(),
            Ok(Opcode::PnpTest | Opcode::PnpEject) => {}
            Ok(Opcode::Null) => {
                if self.state.verbosity() >= Verbosity::HIGH {
                    info!("{}: null command", self.label.as_str());
                }
            }
            Ok(Opcode::Verbose | Opcode::Register) | Err(_) => {
                self.diag.signal(Fault::UnknownCommand);
                return Status::Unknown;
            }
        }
        Status::Ok
    }

    /// Two-argument command
    pub fn command_ex(&mut self, opcode: u32, wparam: usize, lparam: usize) -> Status {
        if Opcode::is_transport(opcode) {
            if let Some(status) = self.transport.command(opcode, Some((wparam, lparam))) {
                return status;
            }
        }

        match Opcode::try_from(opcode) {
            Ok(Opcode::Verbose) => match Verbosity::try_from(wparam) {
                Ok(verbosity) => {
                    self.state.set_verbosity(verbosity);
                    Status::Ok
                }
                Err(_) => {
                    self.diag.signal(Fault::BadCommand);
                    Status::Rejected
                }
            },
            Ok(Opcode::Register) => self.register(Address(wparam)),
            Ok(Opcode::Null) => {
                info!(
                    "{}: null command wparam={=usize:#x} lparam={=usize:#x}",
                    self.label.as_str(),
                    wparam,
                    lparam
                );
                Status::Ok
            }
            _ => {
                self.diag.signal(Fault::UnknownCommandEx);
                Status::Unknown
            }
        }
    }

    fn register(&mut self, base: Address) -> Status {
        if base.is_null() {
            self.diag.signal(Fault::BadCommand);
            return Status::Rejected;
        }
        match self.base.bind(base) {
            Ok(()) => {
                debug!("{}: registered at {}", self.label.as_str(), base);
                Status::Ok
            }
            Err(existing) => {
                warn!(
                    "{}: already registered at {}, ignoring {}",
                    self.label.as_str(),
                    existing,
                    base
                );
                self.diag.signal(Fault::AlreadyRegistered);
                Status::Rejected
            }
        }
    }
}
