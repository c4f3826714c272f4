//! Device state: the packed state record and the lifecycle machine
//!
//! The lifecycle is explicit, finite, and deterministic. No code outside
//! this module and the device's event application moves it.

pub mod events;
pub mod machine;
pub mod record;

pub use events::{Degradation, Event};
pub use machine::Transition;
pub use record::{Capabilities, DeviceState, Direction, InvalidVerbosity, Lifecycle, Verbosity};
