//! Configuration types
//!
//! Board-agnostic device configuration. With the `serde` feature a whole
//! device table can be stored as postcard binary data.

pub mod device;
#[cfg(feature = "serde")]
pub mod image;

pub use device::{DeviceConfig, MAX_LABEL_LEN};
#[cfg(feature = "serde")]
pub use image::{DeviceTable, ImageError, IMAGE_VERSION, MAX_DEVICES};
