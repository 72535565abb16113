//! Cache Entry Module
//!
//! Defines individual cache entries and the access stamp that orders them.

use std::time::{Duration, Instant};

use crate::config::MAX_TTL;

// == Access Stamp ==
/// Last-access timestamp of a cache entry.
///
/// `tick` is drawn from a per-store counter that advances on every insert and
/// every successful read, so stamps are strictly increasing and never collide
/// even when two accesses share the same clock reading. `at` is the monotonic
/// clock reading used to compute expiry deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessStamp {
    tick: u64,
    at: Instant,
}

impl AccessStamp {
    /// Creates a stamp for the given tick, read at the current instant.
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            at: Instant::now(),
        }
    }

    /// Position of this access in the store's access order.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Monotonic clock reading taken when the access happened.
    pub fn at(&self) -> Instant {
        self.at
    }

    /// Instant at which an entry last touched at this stamp becomes idle for `ttl`.
    ///
    /// Saturates at `at + MAX_TTL` for TTLs past the accepted range.
    pub fn deadline(&self, ttl: Duration) -> Instant {
        self.at
            .checked_add(ttl)
            .or_else(|| self.at.checked_add(MAX_TTL))
            .unwrap_or(self.at)
    }
}

// == Cache Entry ==
/// A cached value together with the stamp of its last access.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Stamp of the last insert or successful read
    pub last_access: AccessStamp,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry touched at `stamp`.
    pub fn new(value: V, stamp: AccessStamp) -> Self {
        Self {
            value,
            last_access: stamp,
        }
    }

    // == Touch ==
    /// Records a new access.
    pub fn touch(&mut self, stamp: AccessStamp) {
        debug_assert!(stamp.tick() > self.last_access.tick());
        self.last_access = stamp;
    }

    /// Time elapsed since the entry was last touched.
    pub fn idle_for(&self) -> Duration {
        self.last_access.at().elapsed()
    }
}
