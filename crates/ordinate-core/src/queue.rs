//! Fixed-capacity ring buffer with Python-style indexed access.

use crate::config::{DEFAULT_QUEUE_LIMIT, ValidationPolicy, natural};
use crate::error::{ConfigError, ConfigResult};

/// Normalize a requested queue limit, falling back to
/// [`DEFAULT_QUEUE_LIMIT`] for anything that is not a natural number.
pub fn normalize_limit(limit: f64) -> usize {
    natural(limit).unwrap_or_else(|| {
        tracing::warn!(limit, "invalid queue limit; using {DEFAULT_QUEUE_LIMIT}");
        DEFAULT_QUEUE_LIMIT
    })
}

/// Validate a requested queue limit under the given policy.
pub fn validate_limit(limit: f64, policy: ValidationPolicy) -> ConfigResult<usize> {
    let outcome = natural(limit).ok_or(ConfigError::InvalidQueueLimit(limit));
    policy.resolve(outcome, DEFAULT_QUEUE_LIMIT)
}

fn nonzero_limit(limit: usize) -> usize {
    if limit == 0 {
        tracing::warn!("queue limit 0 is invalid; using {DEFAULT_QUEUE_LIMIT}");
        DEFAULT_QUEUE_LIMIT
    } else {
        limit
    }
}

/// A fixed-capacity queue that overwrites its oldest entry when full.
///
/// Indices passed to [`get`](Self::get) are relative to the oldest entry;
/// negative indices count from the newest, so `get(-1)` is the entry most
/// recently enqueued.
///
/// # Example
///
/// ```
/// use ordinate_core::queue::CycledQueue;
///
/// let mut queue = CycledQueue::with_limit(3);
/// for i in 0..5 {
///     queue.enqueue(i);
/// }
/// assert_eq!(queue.len(), 3);
/// assert_eq!(queue.get(0), Some(&2));
/// assert_eq!(queue.get(-1), Some(&4));
/// ```
#[derive(Debug, Clone)]
pub struct CycledQueue<T> {
    slots: Vec<Option<T>>,
    limit: usize,
    start: usize,
    len: usize,
}

impl<T> Default for CycledQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CycledQueue<T> {
    /// Create a queue with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_QUEUE_LIMIT)
    }

    /// Create a queue holding at most `limit` entries. A limit of zero
    /// falls back to the default.
    pub fn with_limit(limit: usize) -> Self {
        let limit = nonzero_limit(limit);
        Self {
            slots: Vec::with_capacity(limit.min(DEFAULT_QUEUE_LIMIT)),
            limit,
            start: 0,
            len: 0,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of entries.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns true when the next enqueue evicts the oldest entry.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.limit
    }

    /// Append an item, returning the evicted oldest item when the queue was full.
    pub fn enqueue(&mut self, item: T) -> Option<T> {
        let slot = (self.start + self.len) % self.limit;
        let evicted = if slot == self.slots.len() {
            self.slots.push(Some(item));
            None
        } else {
            self.slots[slot].replace(item)
        };

        if self.len == self.limit {
            self.start = (self.start + 1) % self.limit;
            evicted
        } else {
            self.len += 1;
            None
        }
    }

    /// Remove and return the oldest item.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.start].take();
        self.start = (self.start + 1) % self.limit;
        self.len -= 1;
        item
    }

    /// Get an item by position. Negative indices count from the newest entry.
    ///
    /// Returns `None` when the queue is empty or `index` lies outside
    /// `[-len, len)`.
    pub fn get(&self, index: isize) -> Option<&T> {
        self.slot_of(index).and_then(|slot| self.slots[slot].as_ref())
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        self.slot_of(index).and_then(|slot| self.slots[slot].as_mut())
    }

    /// Oldest entry.
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Newest entry.
    pub fn last(&self) -> Option<&T> {
        self.get(-1)
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[(self.start + i) % self.limit].as_ref())
    }

    /// Empty the queue, optionally changing its limit.
    pub fn clear(&mut self, new_limit: Option<usize>) {
        self.slots.clear();
        self.start = 0;
        self.len = 0;
        if let Some(limit) = new_limit {
            self.limit = nonzero_limit(limit);
        }
    }

    fn slot_of(&self, index: isize) -> Option<usize> {
        let len = self.len as isize;
        if len == 0 || index >= len || index < -len {
            return None;
        }
        let offset = index.rem_euclid(len) as usize;
        Some((self.start + offset) % self.limit)
    }
}
