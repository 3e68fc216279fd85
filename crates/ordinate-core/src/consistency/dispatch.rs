//! Signal events, listener handles and the parent-side inbox.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::flags::{ConsistencyState, Signal};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies the object that dispatched a [`SignalEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    /// Allocate a fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// Handle returned by `listen_signals`, used to remove exactly that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(pub(crate) u64);

/// Payload delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEvent {
    /// Object that became inconsistent.
    pub source: SourceId,
    /// Requested signals, masked by what the source supports.
    pub signals: Signal,
    /// Consistency bits that went from clear to set.
    pub invalidated: ConsistencyState,
}

impl SignalEvent {
    /// Returns true if the event carries any of the given signals.
    #[inline]
    pub fn has_signal(&self, signal: Signal) -> bool {
        self.signals.intersects(signal)
    }
}

/// Boxed listener callback.
pub type SignalListener = Box<dyn FnMut(&SignalEvent)>;

#[derive(Debug, Default)]
struct InboxState {
    signals: Cell<Signal>,
    invalidated: Cell<ConsistencyState>,
    events: Cell<usize>,
}

/// Accumulates signals a child dispatches so the single owning parent can
/// drain them on its own schedule.
///
/// The inbox is shared between the listener closure registered on the child
/// and the parent. Both live on the same thread, so plain [`Cell`]s suffice.
#[derive(Debug, Clone, Default)]
pub struct SignalInbox {
    state: Rc<InboxState>,
}

impl SignalInbox {
    /// Create an empty inbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a listener that feeds this inbox.
    pub fn listener(&self) -> SignalListener {
        let state = Rc::clone(&self.state);
        Box::new(move |event: &SignalEvent| {
            state.signals.set(state.signals.get() | event.signals);
            state.invalidated.set(state.invalidated.get() | event.invalidated);
            state.events.set(state.events.get() + 1);
        })
    }

    /// Returns true if any signal arrived since the last [`take`](Self::take).
    pub fn is_pending(&self) -> bool {
        self.state.events.get() > 0
    }

    /// Number of events received since the last [`take`](Self::take).
    pub fn pending_events(&self) -> usize {
        self.state.events.get()
    }

    /// Consistency bits the child reported since the last drain.
    pub fn pending_invalidated(&self) -> ConsistencyState {
        self.state.invalidated.get()
    }

    /// Drain the OR of all received signals.
    pub fn take(&self) -> Signal {
        self.state.events.set(0);
        self.state.invalidated.set(ConsistencyState::empty());
        self.state.signals.replace(Signal::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(signals: Signal, invalidated: ConsistencyState) -> SignalEvent {
        SignalEvent {
            source: SourceId::from_raw(7),
            signals,
            invalidated,
        }
    }

    #[test]
    fn test_source_ids_are_unique() {
        let a = SourceId::next();
        let b = SourceId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_inbox_accumulates_and_drains() {
        let inbox = SignalInbox::new();
        let mut listener = inbox.listener();
        assert!(!inbox.is_pending());

        listener(&event(Signal::NEEDS_REDRAW, ConsistencyState::APPEARANCE));
        listener(&event(Signal::BOUNDS_CHANGED, ConsistencyState::BOUNDS));

        assert_eq!(inbox.pending_events(), 2);
        assert_eq!(
            inbox.pending_invalidated(),
            ConsistencyState::APPEARANCE | ConsistencyState::BOUNDS
        );
        assert_eq!(inbox.take(), Signal::NEEDS_REDRAW | Signal::BOUNDS_CHANGED);
        assert!(!inbox.is_pending());
        assert_eq!(inbox.take(), Signal::empty());
    }

    #[test]
    fn test_has_signal() {
        let e = event(Signal::NEEDS_REDRAW | Signal::DATA_CHANGED, ConsistencyState::DATA);
        assert!(e.has_signal(Signal::DATA_CHANGED));
        assert!(!e.has_signal(Signal::BOUNDS_CHANGED));
    }
}
