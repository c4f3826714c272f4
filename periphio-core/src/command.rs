//! Command opcode space
//!
//! A small fixed protocol of integer opcodes. Bring-up code can drive any
//! device with these numbers without knowing its transport.
//!
//! | Opcode | Value | Overload |
//! |---|---|---|
//! | `NULL` | `0x00` | both |
//! | `UNLOCK` | `0x01` | single |
//! | `LOCK` | `0x02` | single |
//! | `RESET` | `0x03` | single |
//! | `INIT` | `0x04` | single |
//! | `SHUTDOWN` | `0x05` | single |
//! | `PNP_TEST` | `0x06` | single |
//! | `PNP_EJECT` | `0x07` | single |
//! | `VERBOSE` | `0x10` | two-argument |
//! | `REGISTER` | `0x11` | two-argument |
//!
//! Values from [`Opcode::TRANSPORT_BASE`] up belong to the transports.

/// Core opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Opcode {
    /// Reaction test, no effect
    Null = 0x00,
    Unlock = 0x01,
    Lock = 0x02,
    Reset = 0x03,
    Init = 0x04,
    Shutdown = 0x05,
    /// Reserved for plug-and-play probing
    PnpTest = 0x06,
    /// Reserved for plug-and-play removal
    PnpEject = 0x07,
    /// `wparam`: verbosity level 0-3
    Verbose = 0x10,
    /// `wparam`: device base address
    Register = 0x11,
}

impl Opcode {
    /// First opcode owned by transports
    pub const TRANSPORT_BASE: u32 = 0x100;

    /// Raw opcode value
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Check if `code` falls in the transport-owned range
    pub const fn is_transport(code: u32) -> bool {
        code >= Self::TRANSPORT_BASE
    }
}

impl TryFrom<u32> for Opcode {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(Opcode::Null),
            0x01 => Ok(Opcode::Unlock),
            0x02 => Ok(Opcode::Lock),
            0x03 => Ok(Opcode::Reset),
            0x04 => Ok(Opcode::Init),
            0x05 => Ok(Opcode::Shutdown),
            0x06 => Ok(Opcode::PnpTest),
            0x07 => Ok(Opcode::PnpEject),
            0x10 => Ok(Opcode::Verbose),
            0x11 => Ok(Opcode::Register),
            other => Err(other),
        }
    }
}

impl From<Opcode> for u32 {
    fn from(op: Opcode) -> u32 {
        op.code()
    }
}

/// Result of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// Command carried out
    Ok = 0,
    /// Recognized, but a parameter or the device state ruled it out
    Rejected = 1,
    /// Opcode not recognized
    Unknown = 2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_opcodes_decode() {
        for op in [
            Opcode::Null,
            Opcode::Unlock,
            Opcode::Lock,
            Opcode::Reset,
            Opcode::Init,
            Opcode::Shutdown,
            Opcode::PnpTest,
            Opcode::PnpEject,
            Opcode::Verbose,
            Opcode::Register,
        ] {
            assert_eq!(Opcode::try_from(op.code()), Ok(op));
            assert!(!Opcode::is_transport(op.code()));
        }
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(Opcode::try_from(0x08), Err(0x08));
        assert_eq!(Opcode::try_from(0x1234), Err(0x1234));
        assert!(Opcode::is_transport(0x100));
    }
}
