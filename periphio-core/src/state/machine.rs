//! Lifecycle state machine
//!
//! The lifecycle of a device is a pure function of its current state and
//! an event. The device applies the returned [`Transition`] and forwards
//! its signal to the diagnostics sink.

use super::events::{Degradation, Event};
use super::record::Lifecycle;
use crate::diag::Fault;

/// Outcome of applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State after the event
    pub next: Lifecycle,
    /// Diagnostic raised by the transition, if any
    pub signal: Option<Fault>,
}

impl Transition {
    fn to(next: Lifecycle) -> Self {
        Self { next, signal: None }
    }

    fn signalled(next: Lifecycle, fault: Fault) -> Self {
        Self {
            next,
            signal: Some(fault),
        }
    }
}

impl Lifecycle {
    /// Process an event and return the transition
    pub fn transition(self, event: Event) -> Transition {
        use Lifecycle::*;

        match (self, event) {
            (Shutdown, Event::Init) => Transition::to(Ready),
            // Already up, or still faulted: init is not the way out
            (Ready | Error | RuntimeError, Event::Init) => {
                Transition::signalled(self, Fault::CannotInit)
            }

            (RuntimeError, Event::Reset) => Transition::signalled(Ready, Fault::RecoveredFromError),
            (Error, Event::Reset) => Transition::signalled(Shutdown, Fault::RecoveredFromRuntime),
            (Ready | Shutdown, Event::Reset) => Transition::to(self),

            (_, Event::Shutdown) => Transition::to(Shutdown),

            // Only a running device can fault
            (Ready, Event::TransportFault(Degradation::Hardware)) => Transition::to(Error),
            (Ready, Event::TransportFault(Degradation::Runtime)) => Transition::to(RuntimeError),
            (_, Event::TransportFault(_)) => Transition::to(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Lifecycle; 4] = [
        Lifecycle::Shutdown,
        Lifecycle::Ready,
        Lifecycle::Error,
        Lifecycle::RuntimeError,
    ];

    #[test]
    fn test_init_from_shutdown() {
        let t = Lifecycle::Shutdown.transition(Event::Init);
        assert_eq!(t.next, Lifecycle::Ready);
        assert_eq!(t.signal, None);
    }

    #[test]
    fn test_init_twice_warns() {
        for state in [Lifecycle::Ready, Lifecycle::Error, Lifecycle::RuntimeError] {
            let t = state.transition(Event::Init);
            assert_eq!(t.next, state);
            assert_eq!(t.signal, Some(Fault::CannotInit));
        }
    }

    #[test]
    fn test_reset_recovers() {
        let t = Lifecycle::RuntimeError.transition(Event::Reset);
        assert_eq!(t.next, Lifecycle::Ready);
        assert_eq!(t.signal, Some(Fault::RecoveredFromError));

        let t = Lifecycle::Error.transition(Event::Reset);
        assert_eq!(t.next, Lifecycle::Shutdown);
        assert_eq!(t.signal, Some(Fault::RecoveredFromRuntime));
    }

    #[test]
    fn test_reset_without_fault_is_noop() {
        for state in [Lifecycle::Ready, Lifecycle::Shutdown] {
            let t = state.transition(Event::Reset);
            assert_eq!(t.next, state);
            assert_eq!(t.signal, None);
        }
    }

    #[test]
    fn test_shutdown_from_any_state() {
        for state in ALL {
            let t = state.transition(Event::Shutdown);
            assert_eq!(t.next, Lifecycle::Shutdown);
            assert_eq!(t.signal, None);
        }
    }

    #[test]
    fn test_transport_fault_only_degrades_ready() {
        let t = Lifecycle::Ready.transition(Event::TransportFault(Degradation::Hardware));
        assert_eq!(t.next, Lifecycle::Error);
        let t = Lifecycle::Ready.transition(Event::TransportFault(Degradation::Runtime));
        assert_eq!(t.next, Lifecycle::RuntimeError);

        for state in [Lifecycle::Shutdown, Lifecycle::Error, Lifecycle::RuntimeError] {
            let t = state.transition(Event::TransportFault(Degradation::Hardware));
            assert_eq!(t.next, state);
        }
    }

    fn any_lifecycle() -> impl Strategy<Value = Lifecycle> {
        prop::sample::select(ALL.to_vec())
    }

    fn any_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            Just(Event::Init),
            Just(Event::Reset),
            Just(Event::Shutdown),
            Just(Event::TransportFault(Degradation::Hardware)),
            Just(Event::TransportFault(Degradation::Runtime)),
        ]
    }

    proptest! {
        #[test]
        fn prop_shutdown_always_reaches_shutdown(
            start in any_lifecycle(),
            events in prop::collection::vec(any_event(), 0..32),
        ) {
            let state = events.into_iter().fold(start, |s, e| s.transition(e).next);
            prop_assert_eq!(state.transition(Event::Shutdown).next, Lifecycle::Shutdown);
        }

        #[test]
        fn prop_shutdown_then_init_is_ready(
            events in prop::collection::vec(any_event(), 0..32),
        ) {
            let state = events
                .into_iter()
                .fold(Lifecycle::Shutdown, |s, e| s.transition(e).next);
            let state = state.transition(Event::Shutdown).next;
            prop_assert_eq!(state.transition(Event::Init).next, Lifecycle::Ready);
        }

        #[test]
        fn prop_init_changes_only_shutdown(start in any_lifecycle()) {
            let t = start.transition(Event::Init);
            if start == Lifecycle::Shutdown {
                prop_assert_eq!(t.next, Lifecycle::Ready);
            } else {
                prop_assert_eq!(t.next, start);
                prop_assert_eq!(t.signal, Some(Fault::CannotInit));
            }
        }
    }
}
