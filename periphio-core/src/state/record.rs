//! Device state record
//!
//! Everything the core knows about a device fits in one 16-bit word:
//!
//! ```text
//!  15        9   8   7   6    5    4    3    2    1   0
//! ┌───────────┬───────┬────┬─────────┬────┬────┬───────┐
//! │ reserved  │ VERB  │LOCK│ RSV caps│ W  │ R  │ LIFE  │
//! └───────────┴───────┴────┴─────────┴────┴────┴───────┘
//! ```
//!
//! Readers are public. Writers are crate-private: the lifecycle is only
//! moved by the state machine, the lock and verbosity only by the
//! command dispatcher.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const LIFECYCLE_MASK: u16 = 0b11;
const CAPS_SHIFT: u16 = 2;
const CAPS_MASK: u16 = 0b1111 << CAPS_SHIFT;
const LOCK_BIT: u16 = 1 << 6;
const VERBOSITY_SHIFT: u16 = 7;
const VERBOSITY_MASK: u16 = 0b11 << VERBOSITY_SHIFT;

/// Device lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Lifecycle {
    /// Not operational; initial state
    #[default]
    Shutdown = 0,
    /// Operational, transfers allowed
    Ready = 1,
    /// Hardware fault; reset returns to `Shutdown`
    Error = 2,
    /// Transient fault; reset returns to `Ready`
    RuntimeError = 3,
}

impl Lifecycle {
    fn from_bits(bits: u16) -> Self {
        match bits & LIFECYCLE_MASK {
            0 => Lifecycle::Shutdown,
            1 => Lifecycle::Ready,
            2 => Lifecycle::Error,
            _ => Lifecycle::RuntimeError,
        }
    }

    /// Check if this is one of the fault states
    pub fn is_fault(self) -> bool {
        matches!(self, Lifecycle::Error | Lifecycle::RuntimeError)
    }
}

bitflags::bitflags! {
    /// Operation directions a device supports
    ///
    /// Fixed when the device is constructed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// `read` is permitted
        const READABLE = 1 << 0;
        /// `write` is permitted
        const WRITABLE = 1 << 1;
        /// Reserved for transport-specific use
        const RESERVED0 = 1 << 2;
        /// Reserved for transport-specific use
        const RESERVED1 = 1 << 3;

        /// Both directions
        const DUPLEX = Self::READABLE.bits() | Self::WRITABLE.bits();
    }
}

#[cfg(feature = "serde")]
impl Serialize for Capabilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Capabilities::from_bits(bits)
            .ok_or_else(|| serde::de::Error::custom("unknown capability bits"))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Capabilities {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Capabilities(r={=bool}, w={=bool})",
            self.contains(Capabilities::READABLE),
            self.contains(Capabilities::WRITABLE)
        );
    }
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    /// Capability bit required for this direction
    pub fn capability(self) -> Capabilities {
        match self {
            Direction::Read => Capabilities::READABLE,
            Direction::Write => Capabilities::WRITABLE,
        }
    }
}

/// Error for a verbosity level outside `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidVerbosity(pub usize);

impl fmt::Display for InvalidVerbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "verbosity {} out of range 0..=3", self.0)
    }
}

/// Diagnostic chattiness, `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Verbosity(u8);

impl Verbosity {
    /// No informational output
    pub const QUIET: Self = Self(0);
    pub const LOW: Self = Self(1);
    /// Refusals and NULL commands are logged from here up
    pub const HIGH: Self = Self(2);
    pub const MAX: Self = Self(3);

    /// Verbosity for `level`, if it is in range
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Numeric level
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<usize> for Verbosity {
    type Error = InvalidVerbosity;

    fn try_from(level: usize) -> Result<Self, Self::Error> {
        u8::try_from(level)
            .ok()
            .and_then(Verbosity::new)
            .ok_or(InvalidVerbosity(level))
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = InvalidVerbosity;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Verbosity::new(level).ok_or(InvalidVerbosity(level as usize))
    }
}

impl From<Verbosity> for u8 {
    fn from(v: Verbosity) -> u8 {
        v.0
    }
}

/// Packed device state word
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceState(u16);

impl DeviceState {
    /// Fresh state: `Shutdown`, unlocked, quiet
    pub fn new(capabilities: Capabilities) -> Self {
        Self(((capabilities.bits() as u16) << CAPS_SHIFT) & CAPS_MASK)
    }

    /// Raw state word
    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn lifecycle(self) -> Lifecycle {
        Lifecycle::from_bits(self.0)
    }

    pub fn capabilities(self) -> Capabilities {
        Capabilities::from_bits_truncate(((self.0 & CAPS_MASK) >> CAPS_SHIFT) as u8)
    }

    /// Check if the device supports `direction`
    pub fn supports(self, direction: Direction) -> bool {
        self.capabilities().contains(direction.capability())
    }

    pub fn is_locked(self) -> bool {
        self.0 & LOCK_BIT != 0
    }

    pub fn verbosity(self) -> Verbosity {
        Verbosity(((self.0 & VERBOSITY_MASK) >> VERBOSITY_SHIFT) as u8)
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.0 = (self.0 & !LIFECYCLE_MASK) | lifecycle as u16;
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        if locked {
            self.0 |= LOCK_BIT;
        } else {
            self.0 &= !LOCK_BIT;
        }
    }

    pub(crate) fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.0 = (self.0 & !VERBOSITY_MASK) | ((verbosity.0 as u16) << VERBOSITY_SHIFT);
    }
}

impl fmt::Debug for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceState")
            .field("lifecycle", &self.lifecycle())
            .field("capabilities", &self.capabilities())
            .field("locked", &self.is_locked())
            .field("verbosity", &self.verbosity().level())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DeviceState({}, {}, locked={=bool}, verbosity={=u8})",
            self.lifecycle(),
            self.capabilities(),
            self.is_locked(),
            self.verbosity().level()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_shutdown_unlocked_quiet() {
        let state = DeviceState::new(Capabilities::DUPLEX);
        assert_eq!(state.lifecycle(), Lifecycle::Shutdown);
        assert_eq!(state.capabilities(), Capabilities::DUPLEX);
        assert!(!state.is_locked());
        assert_eq!(state.verbosity(), Verbosity::QUIET);
    }

    #[test]
    fn test_fields_do_not_overlap() {
        let mut state = DeviceState::new(Capabilities::READABLE | Capabilities::RESERVED1);

        state.set_lifecycle(Lifecycle::RuntimeError);
        state.set_locked(true);
        state.set_verbosity(Verbosity::MAX);

        assert_eq!(state.lifecycle(), Lifecycle::RuntimeError);
        assert_eq!(
            state.capabilities(),
            Capabilities::READABLE | Capabilities::RESERVED1
        );
        assert!(state.is_locked());
        assert_eq!(state.verbosity(), Verbosity::MAX);

        state.set_lifecycle(Lifecycle::Ready);
        state.set_locked(false);
        state.set_verbosity(Verbosity::LOW);

        assert_eq!(state.lifecycle(), Lifecycle::Ready);
        assert_eq!(
            state.capabilities(),
            Capabilities::READABLE | Capabilities::RESERVED1
        );
        assert!(!state.is_locked());
        assert_eq!(state.verbosity(), Verbosity::LOW);
    }

    #[test]
    fn test_supports_direction() {
        let state = DeviceState::new(Capabilities::WRITABLE);
        assert!(state.supports(Direction::Write));
        assert!(!state.supports(Direction::Read));
    }

    #[test]
    fn test_verbosity_range() {
        assert_eq!(Verbosity::new(0), Some(Verbosity::QUIET));
        assert_eq!(Verbosity::new(3), Some(Verbosity::MAX));
        assert_eq!(Verbosity::new(4), None);
        assert_eq!(Verbosity::try_from(2usize), Ok(Verbosity::HIGH));
        assert_eq!(Verbosity::try_from(4usize), Err(InvalidVerbosity(4)));
        assert_eq!(Verbosity::try_from(usize::MAX), Err(InvalidVerbosity(usize::MAX)));
    }

    #[test]
    fn test_fault_states() {
        assert!(Lifecycle::Error.is_fault());
        assert!(Lifecycle::RuntimeError.is_fault());
        assert!(!Lifecycle::Ready.is_fault());
        assert!(!Lifecycle::Shutdown.is_fault());
    }
}
