//! Binary device table images
//!
//! A board's device table can be stored in flash as postcard-serialized
//! binary data and decoded at boot, instead of being compiled in.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::DeviceConfig;

/// Current image format version
pub const IMAGE_VERSION: u8 = 1;

/// Maximum devices in one table
pub const MAX_DEVICES: usize = 8;

/// Image encode/decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Output buffer too small
    Serialize,
    /// Bytes are not a valid image
    Deserialize,
    /// Image was written by another format version
    VersionMismatch(u8),
}

/// Table of device configurations, in bring-up order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceTable {
    pub version: u8,
    pub devices: Vec<DeviceConfig, MAX_DEVICES>,
}

impl Default for DeviceTable {
    fn default() -> Self {
        Self {
            version: IMAGE_VERSION,
            devices: Vec::new(),
        }
    }
}

impl DeviceTable {
    /// Append a device; hands the config back if the table is full
    pub fn push(&mut self, config: DeviceConfig) -> Result<(), DeviceConfig> {
        self.devices.push(config)
    }

    /// Serialize into `buf`, returning the number of bytes used
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, ImageError> {
        let used = postcard::to_slice(self, buf).map_err(|_| ImageError::Serialize)?;
        Ok(used.len())
    }

    /// Deserialize and version-check an image
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let table: Self = postcard::from_bytes(bytes).map_err(|_| ImageError::Deserialize)?;
        if table.version != IMAGE_VERSION {
            warn!(
                "device table version {}, expected {}",
                table.version,
                IMAGE_VERSION
            );
            return Err(ImageError::VersionMismatch(table.version));
        }
        debug!("device table: {} devices", table.devices.len());
        Ok(table)
    }
}
