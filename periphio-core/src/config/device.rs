//! Per-device configuration
//!
//! Everything a bring-up routine needs to construct a device without
//! touching the command protocol by hand.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::state::{Capabilities, Verbosity};

/// Maximum device label length
pub const MAX_LABEL_LEN: usize = 16;

/// Device construction parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Label used in log lines (e.g., "imu", "gps")
    pub label: String<MAX_LABEL_LEN>,
    /// Supported directions
    pub capabilities: Capabilities,
    /// Initial verbosity
    pub verbosity: Verbosity,
    /// Base address to register at construction
    pub base: Option<Address>,
    /// Run `init` at construction
    pub auto_init: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            capabilities: Capabilities::DUPLEX,
            verbosity: Verbosity::QUIET,
            base: None,
            auto_init: false,
        }
    }
}

impl DeviceConfig {
    /// Read-only device
    pub fn read_only() -> Self {
        Self {
            capabilities: Capabilities::READABLE,
            ..Self::default()
        }
    }

    /// Write-only device
    pub fn write_only() -> Self {
        Self {
            capabilities: Capabilities::WRITABLE,
            ..Self::default()
        }
    }

    /// Set the label, truncated to [`MAX_LABEL_LEN`] bytes
    pub fn with_label(mut self, label: &str) -> Self {
        self.label.clear();
        for c in label.chars() {
            if self.label.push(c).is_err() {
                break;
            }
        }
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_base(mut self, base: Address) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_auto_init(mut self, auto_init: bool) -> Self {
        self.auto_init = auto_init;
        self
    }
}
