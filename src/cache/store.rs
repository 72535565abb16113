//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with recency tracking and
//! per-entry TTL expiry.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{AccessStamp, CacheEntry, CacheStats, ExpiryQueue, RecencyIndex};
use crate::config::CacheConfig;
use crate::tasks::spawn_expiry_task;

// == Clock ==
/// Source of access stamps. Never reset, not even by `clear`, so an expiry
/// armed before a clear can never match an entry inserted after it.
#[derive(Debug, Default)]
struct Clock {
    tick: u64,
}

impl Clock {
    fn stamp(&mut self) -> AccessStamp {
        self.tick += 1;
        AccessStamp::new(self.tick)
    }
}

// == Guarded State ==
/// Everything behind the store's single lock.
#[derive(Debug)]
struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    recency: RecencyIndex<K>,
    stats: CacheStats,
    clock: Clock,
}

impl<K: Hash + Eq + Clone, V> Inner<K, V> {
    // Capacity is only an upper bound; the table grows as entries arrive.
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyIndex::new(),
            stats: CacheStats::new(),
            clock: Clock::default(),
        }
    }

    fn remove_entry(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.recency.remove(key);
        }
        removed
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let (key, _) = self.recency.pop_oldest()?;
        self.entries.remove(&key);
        self.stats.record_eviction();
        Some(key)
    }

    /// Refreshes the entry count and checks that the table and the index
    /// hold the same keys.
    fn settle(&mut self) {
        self.stats.set_total_entries(self.entries.len());
        debug_assert_eq!(
            self.entries.len(),
            self.recency.len(),
            "entry table and recency index diverged"
        );
        debug_assert!(
            self.entries.keys().all(|key| self.recency.contains(key)),
            "entry table and recency index diverged"
        );
    }
}

// == Cache Store ==
/// Fixed-capacity cache with LRU eviction and idle-TTL expiry.
///
/// All reads and writes of the entry table and the recency index happen under
/// one lock. Arming an expiry happens after the lock is released.
///
/// A store is built once and shared for the lifetime of the process, usually
/// as an `Arc<CacheStore<K, V>>` handed to whatever needs it.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    inner: Mutex<Inner<K, V>>,
    config: CacheConfig,
    expiry: ExpiryQueue<K>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a store that arms its expiries on `expiry`.
    ///
    /// Expiries only fire while a task drains the matching receiver; use
    /// [`CacheStore::start`] to get both at once.
    pub fn new(config: CacheConfig, expiry: ExpiryQueue<K>) -> Self {
        Self {
            inner: Mutex::new(Inner::new()),
            config,
            expiry,
        }
    }

    /// Creates a shared store and spawns its background expiry task.
    ///
    /// Must be called from within a tokio runtime. The task stops on its own
    /// once the last `Arc` to the store is dropped.
    pub fn start(config: CacheConfig) -> (Arc<Self>, JoinHandle<()>)
    where
        K: Send + 'static,
        V: Send + 'static,
    {
        let (queue, rx) = ExpiryQueue::channel();
        let store = Arc::new(Self::new(config, queue));
        let handle = spawn_expiry_task(Arc::downgrade(&store), rx);
        (store, handle)
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit refreshes the entry's recency and restarts its TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        let (value, stamp) = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;

            match inner.entries.get_mut(key) {
                Some(entry) => {
                    let stamp = inner.clock.stamp();
                    entry.touch(stamp);
                    let value = entry.value.clone();
                    inner.recency.update(key, stamp);
                    inner.stats.record_hit();
                    (value, stamp)
                }
                None => {
                    inner.stats.record_miss();
                    return None;
                }
            }
        };

        self.expiry.arm(key.clone(), stamp, self.config.default_ttl());
        Some(value)
    }

    // == Set ==
    /// Stores a value under `key`, overwriting any previous value.
    ///
    /// Inserting a new key into a full cache first evicts the least recently
    /// used entry. Overwriting counts as an access.
    pub fn set(&self, key: K, value: V) {
        let stamp = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let stamp = inner.clock.stamp();

            match inner.entries.get_mut(&key) {
                Some(entry) => {
                    entry.value = value;
                    entry.touch(stamp);
                }
                None => {
                    if inner.entries.len() >= self.config.capacity() {
                        if let Some(evicted) = inner.evict_oldest() {
                            debug!(key = ?evicted, "evicted least recently used entry");
                        }
                    }
                    inner.entries.insert(key.clone(), CacheEntry::new(value, stamp));
                }
            }

            inner.recency.update(&key, stamp);
            inner.settle();
            stamp
        };

        self.expiry.arm(key, stamp, self.config.default_ttl());
    }

    // == Remove ==
    /// Removes an entry unconditionally. Returns whether it was present.
    pub fn remove(&self, key: &K) -> bool {
        let mut inner = self.inner.lock();
        let removed = inner.remove_entry(key);
        inner.settle();
        removed
    }

    // == Remove If Stamp ==
    /// Removes an entry only if it was last touched at exactly `stamp`.
    ///
    /// This is the expiry path: an entry touched again after `stamp` was
    /// captured is left alone, and so is a key that was removed and
    /// re-inserted since.
    pub fn remove_if_stamp(&self, key: &K, stamp: AccessStamp) -> bool {
        let mut inner = self.inner.lock();

        let idle = match inner.entries.get(key) {
            Some(entry) if entry.last_access == stamp => entry.idle_for(),
            _ => return false,
        };

        inner.remove_entry(key);
        inner.stats.record_expiration();
        inner.settle();
        debug!(key = ?key, idle_ms = idle.as_millis() as u64, "expired idle entry");
        true
    }

    // == Clear ==
    /// Removes every entry, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        inner.recency.clear();
        inner.settle();
        info!(dropped, "cache cleared");
        dropped
    }

    // == Peek ==
    /// Returns the key that would be evicted next, without touching it.
    pub fn oldest_key(&self) -> Option<K> {
        self.inner
            .lock()
            .recency
            .peek_oldest()
            .map(|(key, _)| key.clone())
    }

    /// Returns the stamp of the last access to `key`, without touching it.
    pub fn last_access(&self, key: &K) -> Option<AccessStamp> {
        self.inner
            .lock()
            .entries
            .get(key)
            .map(|entry| entry.last_access)
    }

    /// Checks presence without counting a hit or refreshing the entry.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats.clone()
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.config.default_ttl()
    }
}
