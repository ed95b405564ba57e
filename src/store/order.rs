//! Recency Order Module
//!
//! Keeps entries in least-recently-used to most-recently-used order with
//! O(1) lookup, append, unlink and reorder.

use std::collections::HashMap;

// == Node ==
/// A slot in the doubly linked list. Links are indices into the slab.
#[derive(Debug, Clone)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Ordered key/value sequence backed by a slab of linked nodes.
///
/// - Front (head) = least recently used
/// - Back (tail) = most recently used
///
/// Freed slots are recycled, so a long-lived list does not grow past its
/// peak population.
#[derive(Debug, Clone)]
pub struct RecencyList<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Get ==
    /// Returns the value for `key` without changing its position.
    pub fn get(&self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    // == Is Back ==
    /// True when `key` is the most recently used entry.
    pub fn is_back(&self, key: &str) -> bool {
        match (self.index.get(key), self.tail) {
            (Some(&idx), Some(tail)) => idx == tail,
            _ => false,
        }
    }

    // == Push Back ==
    /// Appends `key` at the most recently used end.
    ///
    /// An existing entry under the same key is unlinked first and its value
    /// returned.
    pub fn push_back(&mut self, key: String, value: V) -> Option<V> {
        let previous = self.remove(&key);

        let node = Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.index.insert(key, idx);
        self.link_back(idx);
        previous
    }

    // == Remove ==
    /// Unlinks `key` and returns its value, or None if absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        Some(node.value)
    }

    // == Pop Front ==
    /// Removes and returns the least recently used entry.
    pub fn pop_front(&mut self) -> Option<(String, V)> {
        let head = self.head?;
        let key = self.slots[head].as_ref()?.key.clone();
        let value = self.remove(&key)?;
        Some((key, value))
    }

    // == Move To Back ==
    /// Marks `key` as most recently used. Returns false if absent.
    pub fn move_to_back(&mut self, key: &str) -> bool {
        let Some(&idx) = self.index.get(key) else {
            return false;
        };
        if self.tail != Some(idx) {
            self.unlink(idx);
            self.link_back(idx);
        }
        true
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    // == Iter ==
    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    // == Linking ==
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(t) => {
                if let Some(node) = self.slots[t].as_mut() {
                    node.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}

impl<V: Clone> RecencyList<V> {
    /// Clones the sequence out as `(key, value)` pairs, oldest first.
    pub fn to_pairs(&self) -> Vec<(String, V)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.slots[self.cursor?].as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
