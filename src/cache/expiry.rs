//! Expiry Arming Module
//!
//! Every access arms a one-shot expiry carrying the stamp it wrote. Armed
//! expiries travel over a channel to the single background expiry task
//! (see `tasks::expiry`), which fires them once their deadline passes.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::trace;

use crate::cache::AccessStamp;

// == Pending Expiry ==
/// A deferred removal attempt for `key`.
///
/// Holds a copy of the key and the stamp observed when it was armed, never a
/// reference into the store. Firing removes the entry only if its live stamp
/// still equals `stamp`; otherwise the entry was touched again and the
/// expiry is stale.
#[derive(Debug, Clone)]
pub struct PendingExpiry<K> {
    pub key: K,
    pub stamp: AccessStamp,
    pub deadline: Instant,
}

impl<K> PendingExpiry<K> {
    pub fn new(key: K, stamp: AccessStamp, ttl: Duration) -> Self {
        Self {
            key,
            deadline: stamp.deadline(ttl),
            stamp,
        }
    }

    /// Returns true once the deadline has been reached.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline <= now
    }
}

// Ordered by deadline, then by access order so expiries sharing a deadline
// fire in the order they were armed.
impl<K> PartialEq for PendingExpiry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for PendingExpiry<K> {}

impl<K> PartialOrd for PendingExpiry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for PendingExpiry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.stamp.tick().cmp(&other.stamp.tick()))
    }
}

/// Receiving half of an [`ExpiryQueue`], owned by the expiry task.
pub type ExpiryReceiver<K> = mpsc::UnboundedReceiver<PendingExpiry<K>>;

// == Expiry Queue ==
/// Sending half used by the store to arm expiries.
///
/// Arming never blocks: the channel is unbounded and the send is a plain
/// enqueue, so it cannot stall behind a cache operation or the expiry task.
#[derive(Debug)]
pub struct ExpiryQueue<K> {
    tx: mpsc::UnboundedSender<PendingExpiry<K>>,
}

impl<K> ExpiryQueue<K> {
    /// Creates a queue and the receiver the expiry task drains.
    pub fn channel() -> (Self, ExpiryReceiver<K>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    // == Arm ==
    /// Schedules a removal of `key` at `stamp + ttl`, guarded by `stamp`.
    pub fn arm(&self, key: K, stamp: AccessStamp, ttl: Duration) {
        if self.tx.send(PendingExpiry::new(key, stamp, ttl)).is_err() {
            trace!(tick = stamp.tick(), "expiry task is gone, pending expiry dropped");
        }
    }
}
