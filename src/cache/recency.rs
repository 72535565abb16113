//! Recency Index Module
//!
//! Tracks last-access order for LRU eviction.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::AccessStamp;

/// Null link in the arena.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    key: K,
    stamp: AccessStamp,
    prev: usize,
    next: usize,
}

// == Recency Index ==
/// Doubly-linked list of keys ordered by last access, with a key→node table.
///
/// Nodes live in a `Vec` arena and link to each other by index; freed slots
/// are recycled through a free list. The list runs from the oldest entry
/// (head) to the newest (tail):
/// - `update` unlinks a node and relinks it at the tail
/// - `peek_oldest` reads the head
///
/// All operations are O(1). Stamps handed to `update` come from a monotonic
/// counter, so relinking at the tail keeps the list sorted by stamp and ties
/// never occur.
#[derive(Debug)]
pub struct RecencyIndex<K> {
    lookup: HashMap<K, usize>,
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K> Default for RecencyIndex<K> {
    fn default() -> Self {
        Self {
            lookup: HashMap::new(),
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }
}

impl<K: Hash + Eq + Clone> RecencyIndex<K> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Update ==
    /// Records that `key` was accessed at `stamp`, moving it to the newest end.
    pub fn update(&mut self, key: &K, stamp: AccessStamp) {
        debug_assert!(
            self.tail == NIL || self.nodes[self.tail].stamp.tick() < stamp.tick(),
            "recency stamps must be strictly increasing"
        );

        if let Some(&idx) = self.lookup.get(key) {
            self.unlink(idx);
            self.nodes[idx].stamp = stamp;
            self.link_back(idx);
            return;
        }

        let node = Node {
            key: key.clone(),
            stamp,
            prev: NIL,
            next: NIL,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.lookup.insert(key.clone(), idx);
        self.link_back(idx);
    }

    // == Remove ==
    /// Drops `key` from the index, returning its stamp. No-op if absent.
    pub fn remove(&mut self, key: &K) -> Option<AccessStamp> {
        let idx = self.lookup.remove(key)?;
        self.unlink(idx);
        self.free.push(idx);
        Some(self.nodes[idx].stamp)
    }

    // == Peek Oldest ==
    /// Returns the least recently accessed key and its stamp without removing it.
    pub fn peek_oldest(&self) -> Option<(&K, AccessStamp)> {
        if self.head == NIL {
            return None;
        }
        let node = &self.nodes[self.head];
        Some((&node.key, node.stamp))
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently accessed key.
    pub fn pop_oldest(&mut self) -> Option<(K, AccessStamp)> {
        let key = self.peek_oldest()?.0.clone();
        let stamp = self.remove(&key)?;
        Some((key, stamp))
    }

    // == Stamp ==
    /// Returns the stamp recorded for `key`.
    pub fn stamp(&self, key: &K) -> Option<AccessStamp> {
        self.lookup.get(key).map(|&idx| self.nodes[idx].stamp)
    }

    // == Clear ==
    /// Removes every key.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    /// Iterates keys from the oldest access to the newest.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            index: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        let node = &mut self.nodes[idx];
        node.prev = NIL;
        node.next = NIL;
    }

    fn link_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = NIL;

        if self.tail == NIL {
            self.head = idx;
        } else {
            self.nodes[self.tail].next = idx;
        }
        self.tail = idx;
    }
}

// == Iterator ==
/// Oldest-to-newest iterator over a [`RecencyIndex`].
pub struct Iter<'a, K> {
    index: &'a RecencyIndex<K>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (&'a K, AccessStamp);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL || self.remaining == 0 {
            return None;
        }
        let index = self.index;
        let node = &index.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, node.stamp))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
