//! Diagnostics: fault taxonomy and the sinks that receive it

pub mod fault;
pub mod sink;

pub use fault::{Fault, Severity};
pub use sink::{CountingSink, Diagnostics, LogSink, NullSink, RecordingSink, Signal};
