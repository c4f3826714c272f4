//! Diagnostics sinks
//!
//! Each device holds its own sink; there is no process-wide hook. The
//! host picks the policy: log it, count it, record it, or halt.

use heapless::Vec;

use super::fault::{Fault, Severity};

/// Receiver for the core's `error` / `warning` signals
///
/// Signals are fire-and-forget: the core never looks at what the sink
/// did with them.
pub trait Diagnostics {
    /// A precondition was violated and the operation refused
    fn error(&mut self, fault: Fault);

    /// A recoverable or advisory condition
    fn warning(&mut self, fault: Fault);

    /// Route `fault` by its severity
    fn signal(&mut self, fault: Fault) {
        match fault.severity() {
            Severity::Error => self.error(fault),
            Severity::Warning => self.warning(fault),
        }
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn error(&mut self, fault: Fault) {
        D::error(self, fault)
    }

    fn warning(&mut self, fault: Fault) {
        D::warning(self, fault)
    }
}

/// Discards every signal
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Diagnostics for NullSink {
    fn error(&mut self, _fault: Fault) {}

    fn warning(&mut self, _fault: Fault) {}
}

/// Forwards signals to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn error(&mut self, fault: Fault) {
        error!("device error {=u16:#x}: {}", fault.code(), fault);
    }

    fn warning(&mut self, fault: Fault) {
        warn!("device warning {=u16:#x}: {}", fault.code(), fault);
    }
}

/// Counts signals per severity and keeps the most recent one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSink {
    pub errors: u32,
    pub warnings: u32,
    pub last: Option<Fault>,
}

impl CountingSink {
    pub const fn new() -> Self {
        Self {
            errors: 0,
            warnings: 0,
            last: None,
        }
    }

    /// Total signals seen
    pub fn total(&self) -> u32 {
        self.errors.saturating_add(self.warnings)
    }
}

impl Diagnostics for CountingSink {
    fn error(&mut self, fault: Fault) {
        self.errors = self.errors.saturating_add(1);
        self.last = Some(fault);
    }

    fn warning(&mut self, fault: Fault) {
        self.warnings = self.warnings.saturating_add(1);
        self.last = Some(fault);
    }
}

/// One recorded signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Signal {
    pub severity: Severity,
    pub fault: Fault,
}

/// Records up to `N` signals in order
///
/// Once full, further signals are counted in [`RecordingSink::dropped`]
/// but not stored.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink<const N: usize> {
    signals: Vec<Signal, N>,
    dropped: u32,
}

impl<const N: usize> RecordingSink<N> {
    pub const fn new() -> Self {
        Self {
            signals: Vec::new(),
            dropped: 0,
        }
    }

    /// Signals in the order they were raised
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Most recent recorded signal
    pub fn last(&self) -> Option<&Signal> {
        self.signals.last()
    }

    /// How many times `fault` was recorded
    pub fn count(&self, fault: Fault) -> usize {
        self.signals.iter().filter(|s| s.fault == fault).count()
    }

    pub fn contains(&self, fault: Fault) -> bool {
        self.count(fault) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Signals that did not fit
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.signals.clear();
        self.dropped = 0;
    }

    fn push(&mut self, severity: Severity, fault: Fault) {
        if self.signals.push(Signal { severity, fault }).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

impl<const N: usize> Diagnostics for RecordingSink<N> {
    fn error(&mut self, fault: Fault) {
        self.push(Severity::Error, fault);
    }

    fn warning(&mut self, fault: Fault) {
        self.push(Severity::Warning, fault);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;

    #[test]
    fn test_signal_routes_by_severity() {
        let mut sink = CountingSink::new();
        sink.signal(Fault::Locked);
        sink.signal(Fault::NotReady);
        sink.signal(Fault::UnsupportedDirection(Direction::Write));

        assert_eq!(sink.errors, 2);
        assert_eq!(sink.warnings, 1);
        assert_eq!(sink.total(), 3);
        assert_eq!(sink.last, Some(Fault::UnsupportedDirection(Direction::Write)));
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::<4>::new();
        sink.signal(Fault::CannotInit);
        sink.signal(Fault::Locked);

        assert_eq!(
            sink.signals(),
            &[
                Signal {
                    severity: Severity::Warning,
                    fault: Fault::CannotInit
                },
                Signal {
                    severity: Severity::Error,
                    fault: Fault::Locked
                },
            ]
        );
        assert_eq!(sink.count(Fault::Locked), 1);
        assert!(!sink.contains(Fault::NotReady));
    }

    #[test]
    fn test_recording_sink_overflow() {
        let mut sink = RecordingSink::<2>::new();
        for _ in 0..5 {
            sink.signal(Fault::BadCommand);
        }
        assert_eq!(sink.signals().len(), 2);
        assert_eq!(sink.dropped(), 3);

        sink.clear();
        assert!(sink.is_empty());
        assert_eq!(sink.dropped(), 0);
    }

    #[test]
    fn test_sink_by_reference() {
        fn raise<D: Diagnostics>(mut diag: D) {
            diag.signal(Fault::UnknownCommand);
        }

        let mut sink = CountingSink::new();
        raise(&mut sink);
        raise(&mut sink);
        assert_eq!(sink.warnings, 2);
    }
}
