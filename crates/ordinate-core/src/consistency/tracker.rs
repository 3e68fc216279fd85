//! Per-object consistency bookkeeping and the `Invalidatable` protocol.

use std::fmt;

use super::dispatch::{ListenerKey, SignalEvent, SignalListener, SourceId};
use super::flags::{ConsistencyState, Signal};

/// Consistency bits, listeners and suspension state of one object.
///
/// Objects embed a tracker and expose it through [`Invalidatable`], which
/// applies the per-type supported masks before delegating here.
pub struct ConsistencyTracker {
    source: SourceId,
    consistency: ConsistencyState,
    listeners: Vec<(ListenerKey, SignalListener)>,
    next_key: u64,
    suspend_level: u32,
    suspended_signals: Signal,
    suspended_invalidated: ConsistencyState,
}

impl fmt::Debug for ConsistencyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsistencyTracker")
            .field("source", &self.source)
            .field("consistency", &self.consistency)
            .field("listeners", &self.listeners.len())
            .field("suspend_level", &self.suspend_level)
            .field("suspended_signals", &self.suspended_signals)
            .finish()
    }
}

impl Default for ConsistencyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsistencyTracker {
    /// Create a clean tracker with a fresh source id.
    pub fn new() -> Self {
        Self::with_source(SourceId::next())
    }

    /// Create a clean tracker reporting the given source id.
    pub fn with_source(source: SourceId) -> Self {
        Self {
            source,
            consistency: ConsistencyState::empty(),
            listeners: Vec::new(),
            next_key: 0,
            suspend_level: 0,
            suspended_signals: Signal::empty(),
            suspended_invalidated: ConsistencyState::empty(),
        }
    }

    /// Id reported in dispatched events.
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Current consistency bits.
    pub fn consistency(&self) -> ConsistencyState {
        self.consistency
    }

    /// OR `state` into the consistency bits and dispatch `signal` if any bit
    /// went from clear to set. Returns the bits that went from clear to set.
    ///
    /// Callers are expected to have masked both arguments already.
    pub fn invalidate(&mut self, state: ConsistencyState, signal: Signal) -> ConsistencyState {
        let effective = state.difference(self.consistency);
        self.consistency |= effective;
        if !effective.is_empty() {
            self.dispatch(signal, effective);
        }
        effective
    }

    /// Clear bits without dispatching anything.
    pub fn mark_consistent(&mut self, state: ConsistencyState) {
        self.consistency.remove(state);
    }

    /// Returns true if any of the given bits is set.
    pub fn has_invalidation_state(&self, state: ConsistencyState) -> bool {
        self.consistency.intersects(state)
    }

    /// Returns true if no bit is set.
    pub fn is_consistent(&self) -> bool {
        self.consistency.is_empty()
    }

    /// Register a listener.
    pub fn listen(&mut self, listener: SignalListener) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        self.listeners.push((key, listener));
        key
    }

    /// Remove a listener. Returns false if the key was not registered.
    pub fn unlisten(&mut self, key: ListenerKey) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(k, _)| *k != key);
        before != self.listeners.len()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove every listener.
    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Returns true while dispatching is suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspend_level > 0
    }

    /// Enter a suspension level. Levels nest.
    pub fn suspend(&mut self) {
        self.suspend_level += 1;
    }

    /// Leave a suspension level. At the outermost level the accumulated
    /// signals are dispatched once as a single event when `dispatch` is true
    /// and discarded otherwise.
    pub fn resume(&mut self, dispatch: bool) {
        if self.suspend_level == 0 {
            return;
        }
        self.suspend_level -= 1;
        if self.suspend_level > 0 {
            return;
        }
        let signals = std::mem::take(&mut self.suspended_signals);
        let invalidated = std::mem::take(&mut self.suspended_invalidated);
        if dispatch && !signals.is_empty() {
            self.emit(SignalEvent {
                source: self.source,
                signals,
                invalidated,
            });
        }
    }

    /// Dispatch a signal directly, outside of an invalidation.
    pub fn dispatch(&mut self, signal: Signal, invalidated: ConsistencyState) {
        if signal.is_empty() {
            return;
        }
        if self.is_suspended() {
            self.suspended_signals |= signal;
            self.suspended_invalidated |= invalidated;
            return;
        }
        self.emit(SignalEvent {
            source: self.source,
            signals: signal,
            invalidated,
        });
    }

    fn emit(&mut self, event: SignalEvent) {
        tracing::trace!(
            source = event.source.as_raw(),
            signals = ?event.signals,
            invalidated = ?event.invalidated,
            "dispatching signal"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

/// The consistency/signal protocol every stateful visual object follows.
///
/// The supported masks are fixed per type; anything outside them is
/// silently dropped.
pub trait Invalidatable {
    /// Consistency bits this type tracks.
    const SUPPORTED_CONSISTENCY_STATES: ConsistencyState;
    /// Signals this type may dispatch.
    const SUPPORTED_SIGNALS: Signal;

    /// Shared access to the embedded tracker.
    fn tracker(&self) -> &ConsistencyTracker;

    /// Exclusive access to the embedded tracker.
    fn tracker_mut(&mut self) -> &mut ConsistencyTracker;

    /// Set `state` bits and dispatch `signal` once if anything changed.
    fn invalidate(&mut self, state: ConsistencyState, signal: Signal) -> ConsistencyState {
        self.tracker_mut().invalidate(
            state & Self::SUPPORTED_CONSISTENCY_STATES,
            signal & Self::SUPPORTED_SIGNALS,
        )
    }

    /// Clear `state` bits without dispatching.
    fn mark_consistent(&mut self, state: ConsistencyState) {
        self.tracker_mut().mark_consistent(state);
    }

    fn has_invalidation_state(&self, state: ConsistencyState) -> bool {
        self.tracker().has_invalidation_state(state)
    }

    fn is_consistent(&self) -> bool {
        self.tracker().is_consistent()
    }

    fn consistency(&self) -> ConsistencyState {
        self.tracker().consistency()
    }

    fn listen_signals(&mut self, listener: SignalListener) -> ListenerKey {
        self.tracker_mut().listen(listener)
    }

    fn unlisten_signals(&mut self, key: ListenerKey) -> bool {
        self.tracker_mut().unlisten(key)
    }

    fn suspend_signals_dispatching(&mut self) {
        self.tracker_mut().suspend();
    }

    fn resume_signals_dispatching(&mut self, dispatch: bool) {
        self.tracker_mut().resume(dispatch);
    }

    /// Dispatch a signal without touching consistency bits.
    fn dispatch_signal(&mut self, signal: Signal) {
        self.tracker_mut()
            .dispatch(signal & Self::SUPPORTED_SIGNALS, ConsistencyState::empty());
    }
}

/// Suspend dispatching on several trackers at once.
pub fn suspend_all<'a>(trackers: impl IntoIterator<Item = &'a mut ConsistencyTracker>) {
    for tracker in trackers {
        tracker.suspend();
    }
}

/// Resume dispatching on several trackers at once.
pub fn resume_all<'a>(
    trackers: impl IntoIterator<Item = &'a mut ConsistencyTracker>,
    dispatch: bool,
) {
    for tracker in trackers {
        tracker.resume(dispatch);
    }
}
