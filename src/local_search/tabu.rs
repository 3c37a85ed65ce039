//! Bounded tabu list.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A fixed-capacity FIFO of recently touched keys with O(1) membership.
///
/// Pushing past capacity evicts the oldest key. Pushing a key that is
/// already tabu is a no-op (it keeps its original position).
///
/// # Examples
///
/// ```
/// use u_cvrp::local_search::TabuList;
///
/// let mut tabu = TabuList::new(2);
/// tabu.push(1);
/// tabu.push(2);
/// tabu.push(3); // evicts 1
/// assert!(!tabu.contains(&1));
/// assert!(tabu.contains(&2) && tabu.contains(&3));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList<K> {
    capacity: usize,
    order: VecDeque<K>,
    members: HashSet<K>,
}

impl<K: Copy + Eq + Hash> TabuList<K> {
    /// Creates an empty list holding at most `capacity` keys (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity + 1),
            members: HashSet::with_capacity(capacity + 1),
        }
    }

    /// Returns `true` if `key` is currently tabu.
    pub fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    /// Marks `key` tabu, evicting the oldest entry when full.
    pub fn push(&mut self, key: K) {
        if !self.members.insert(key) {
            return;
        }
        self.order.push_back(key);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
    }

    /// Number of tabu keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is tabu.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of tabu keys.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
