//! Consistency states and signal dispatch.
//!
//! Every stateful visual object carries a [`ConsistencyState`] bitmask of
//! aspects that are stale. Invalidating a bit that was clear dispatches a
//! [`Signal`] to the object's listeners exactly once; invalidating a bit that
//! is already set does nothing. Parents hold a [`SignalInbox`] on each child
//! and fold what it collects into their own consistency bits.
//!
//! ```
//! use ordinate_core::consistency::{ConsistencyState, ConsistencyTracker, Signal, SignalInbox};
//!
//! let inbox = SignalInbox::new();
//! let mut child = ConsistencyTracker::new();
//! child.listen(inbox.listener());
//!
//! child.invalidate(ConsistencyState::BOUNDS, Signal::BOUNDS_CHANGED);
//! child.invalidate(ConsistencyState::BOUNDS, Signal::BOUNDS_CHANGED);
//!
//! assert_eq!(inbox.pending_events(), 1);
//! assert_eq!(inbox.take(), Signal::BOUNDS_CHANGED);
//! ```

mod dispatch;
mod flags;
mod tracker;

pub use dispatch::{ListenerKey, SignalEvent, SignalInbox, SignalListener, SourceId};
pub use flags::{ConsistencyState, Signal};
pub use tracker::{ConsistencyTracker, Invalidatable, resume_all, suspend_all};
