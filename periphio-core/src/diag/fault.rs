//! Diagnostic taxonomy

use crate::state::Direction;

/// How serious a signalled fault is
///
/// Neither level is fatal in the core. Whether an error halts the
/// firmware is the host's call, made inside its diagnostics sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// Recoverable or advisory
    Warning,
    /// Precondition violated; the operation was refused
    Error,
}

/// Conditions the core reports through the diagnostics sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Device lacks the capability for this direction
    UnsupportedDirection(Direction),
    /// Device is locked
    Locked,
    /// Device is not in the `Ready` state
    NotReady,
    /// No buffer was supplied
    MemoryUnavailable,
    /// `init` on a device that is not shut down
    CannotInit,
    /// Unrecognized single-argument opcode
    UnknownCommand,
    /// Unrecognized two-argument opcode
    UnknownCommandEx,
    /// Recognized opcode with an invalid parameter
    BadCommand,
    /// `REGISTER` on a device that already has a base address
    AlreadyRegistered,
    /// Reset brought a device back from `RuntimeError` to `Ready`
    RecoveredFromError,
    /// Reset brought a device back from `Error` to `Shutdown`
    RecoveredFromRuntime,
}

impl Fault {
    /// Severity this fault is always raised with
    pub fn severity(self) -> Severity {
        match self {
            Fault::UnsupportedDirection(_) | Fault::Locked | Fault::MemoryUnavailable => {
                Severity::Error
            }
            Fault::NotReady
            | Fault::CannotInit
            | Fault::UnknownCommand
            | Fault::UnknownCommandEx
            | Fault::BadCommand
            | Fault::AlreadyRegistered
            | Fault::RecoveredFromError
            | Fault::RecoveredFromRuntime => Severity::Warning,
        }
    }

    /// Stable numeric code, for hosts that log or count by number
    pub fn code(self) -> u16 {
        match self {
            Fault::UnsupportedDirection(Direction::Read) => 0x01,
            Fault::UnsupportedDirection(Direction::Write) => 0x02,
            Fault::Locked => 0x03,
            Fault::NotReady => 0x04,
            Fault::MemoryUnavailable => 0x05,
            Fault::CannotInit => 0x10,
            Fault::UnknownCommand => 0x20,
            Fault::UnknownCommandEx => 0x21,
            Fault::BadCommand => 0x22,
            Fault::AlreadyRegistered => 0x23,
            Fault::RecoveredFromError => 0x30,
            Fault::RecoveredFromRuntime => 0x31,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Fault; 12] = [
        Fault::UnsupportedDirection(Direction::Read),
        Fault::UnsupportedDirection(Direction::Write),
        Fault::Locked,
        Fault::NotReady,
        Fault::MemoryUnavailable,
        Fault::CannotInit,
        Fault::UnknownCommand,
        Fault::UnknownCommandEx,
        Fault::BadCommand,
        Fault::AlreadyRegistered,
        Fault::RecoveredFromError,
        Fault::RecoveredFromRuntime,
    ];

    #[test]
    fn test_gating_severities() {
        assert_eq!(
            Fault::UnsupportedDirection(Direction::Read).severity(),
            Severity::Error
        );
        assert_eq!(Fault::Locked.severity(), Severity::Error);
        assert_eq!(Fault::NotReady.severity(), Severity::Warning);
        assert_eq!(Fault::MemoryUnavailable.severity(), Severity::Error);
    }

    #[test]
    fn test_command_faults_are_warnings() {
        for fault in [
            Fault::UnknownCommand,
            Fault::UnknownCommandEx,
            Fault::BadCommand,
            Fault::CannotInit,
        ] {
            assert_eq!(fault.severity(), Severity::Warning);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.code(), b.code(), "{:?} and {:?} share a code", a, b);
            }
        }
    }
}
