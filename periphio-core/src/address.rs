//! Opaque addressing tokens
//!
//! The core never dereferences an address. It records the base address
//! once and hands both it and the per-call address to the transport.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pointer-sized addressing token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Address(pub usize);

impl Address {
    pub const fn get(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Where a transfer goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    /// Device base address, once registered
    pub base: Option<Address>,
    /// Per-call address (I2C slave address, register offset, ...)
    pub addr: Address,
}

/// Write-once base address cell
///
/// The first bind wins; later binds are refused and report the address
/// already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseAddress(Option<Address>);

impl BaseAddress {
    pub const fn unset() -> Self {
        Self(None)
    }

    pub const fn get(&self) -> Option<Address> {
        self.0
    }

    /// Bind `addr` if nothing is bound yet
    pub fn bind(&mut self, addr: Address) -> Result<(), Address> {
        match self.0 {
            Some(existing) => Err(existing),
            None => {
                self.0 = Some(addr);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_bind_wins() {
        let mut base = BaseAddress::unset();
        assert_eq!(base.get(), None);

        assert_eq!(base.bind(Address(0x2000_1000)), Ok(()));
        assert_eq!(base.bind(Address(0x4000_0000)), Err(Address(0x2000_1000)));
        assert_eq!(base.get(), Some(Address(0x2000_1000)));
    }

    #[test]
    fn test_null_address() {
        assert!(Address(0).is_null());
        assert!(!Address::from(0x40usize).is_null());
    }
}
