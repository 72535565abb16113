//! TTL Expiry Task
//!
//! Background task that fires the expiries armed by cache accesses.
//!
//! One task serves a whole store, however many expiries are in flight. It
//! keeps armed expiries in a min-heap ordered by deadline, sleeps until the
//! earliest one is due (or a new one arrives), then tries each due expiry
//! against the store's stamp guard.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Weak;
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant as TokioInstant};
use tracing::{debug, info};

use crate::cache::{CacheStore, ExpiryReceiver, PendingExpiry};

/// Spawns the task that fires armed expiries for `cache`.
///
/// The task holds only a weak reference to the store. It exits when the store
/// is dropped (its queue closes) or when the returned handle is aborted.
///
/// # Example
/// ```ignore
/// let (queue, rx) = ExpiryQueue::channel();
/// let cache = Arc::new(CacheStore::new(CacheConfig::default(), queue));
/// let expiry_handle = spawn_expiry_task(Arc::downgrade(&cache), rx);
/// // Later, during shutdown:
/// expiry_handle.abort();
/// ```
pub fn spawn_expiry_task<K, V>(
    cache: Weak<CacheStore<K, V>>,
    mut rx: ExpiryReceiver<K>,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting TTL expiry task");

        let mut pending: BinaryHeap<Reverse<PendingExpiry<K>>> = BinaryHeap::new();

        loop {
            let next_deadline = pending.peek().map(|Reverse(expiry)| expiry.deadline);

            tokio::select! {
                armed = rx.recv() => match armed {
                    Some(expiry) => pending.push(Reverse(expiry)),
                    None => break,
                },
                _ = sleep_until(TokioInstant::from_std(next_deadline.unwrap_or_else(Instant::now))),
                    if next_deadline.is_some() =>
                {
                    let Some(cache) = cache.upgrade() else {
                        break;
                    };
                    let (fired, expired) = fire_due(&cache, &mut pending, Instant::now());
                    debug!(fired, expired, waiting = pending.len(), "TTL expiry pass");
                }
            }
        }

        info!("TTL expiry task stopped");
    })
}

/// Fires every expiry whose deadline is at or before `now`.
///
/// Returns how many expiries fired and how many of them removed an entry;
/// the rest were stale.
fn fire_due<K, V>(
    cache: &CacheStore<K, V>,
    pending: &mut BinaryHeap<Reverse<PendingExpiry<K>>>,
    now: Instant,
) -> (usize, usize)
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    let mut fired = 0;
    let mut expired = 0;

    while let Some(Reverse(expiry)) = pending.peek() {
        if !expiry.is_due(now) {
            break;
        }
        let Some(Reverse(expiry)) = pending.pop() else {
            break;
        };

        fired += 1;
        if cache.remove_if_stamp(&expiry.key, expiry.stamp) {
            expired += 1;
        }
    }

    (fired, expired)
}
