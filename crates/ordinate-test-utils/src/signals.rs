//! Signal listener that records events for verification in tests.

use std::sync::Arc;

use ordinate_core::consistency::{ConsistencyState, Signal, SignalEvent, SignalListener};
use parking_lot::Mutex;

/// Records every [`SignalEvent`] delivered to its listeners.
///
/// # Example
///
/// ```rust
/// use ordinate_core::consistency::{ConsistencyState, ConsistencyTracker, Signal};
/// use ordinate_test_utils::SignalRecorder;
///
/// let recorder = SignalRecorder::new();
/// let mut tracker = ConsistencyTracker::new();
/// tracker.listen(recorder.listener());
///
/// tracker.invalidate(ConsistencyState::APPEARANCE, Signal::NEEDS_REDRAW_APPEARANCE);
/// tracker.invalidate(ConsistencyState::APPEARANCE, Signal::NEEDS_REDRAW_APPEARANCE);
///
/// assert_eq!(recorder.count(), 1);
/// assert!(recorder.received(Signal::NEEDS_REDRAW_APPEARANCE));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignalRecorder {
    events: Arc<Mutex<Vec<SignalEvent>>>,
}

impl SignalRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener feeding this recorder. Can be called more than once.
    pub fn listener(&self) -> SignalListener {
        let events = Arc::clone(&self.events);
        Box::new(move |event: &SignalEvent| events.lock().push(*event))
    }

    pub fn events(&self) -> Vec<SignalEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if any recorded event carried one of `signal`.
    pub fn received(&self, signal: Signal) -> bool {
        self.events.lock().iter().any(|e| e.has_signal(signal))
    }

    /// Union of all recorded signals.
    pub fn signals(&self) -> Signal {
        self.events
            .lock()
            .iter()
            .fold(Signal::empty(), |acc, e| acc | e.signals)
    }

    /// Union of all consistency bits reported as newly invalidated.
    pub fn invalidated(&self) -> ConsistencyState {
        self.events
            .lock()
            .iter()
            .fold(ConsistencyState::empty(), |acc, e| acc | e.invalidated)
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
