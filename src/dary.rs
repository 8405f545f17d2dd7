//! Indexed minimum D-ary heap
//!
//! An array-backed min-heap with `D` children per node whose elements are
//! addressed by a caller-assigned key index in `0..capacity` rather than by
//! opaque handles. Two mutually-inverse maps are kept in sync across every
//! structural change:
//!
//! - the *position map* (`pm`): key index -> heap slot, `None` when absent
//! - the *inverse map* (`im`): heap slot -> key index, meaningful for `slot < len()`
//!
//! Values live in a third array indexed by key, so moving an element only
//! touches the two small index arrays.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity          |
//! |------------------|---------------------|
//! | `insert`         | O(log_D n)          |
//! | `peek_min_*`     | O(1)                |
//! | `poll_min_*`     | O(D log_D n)        |
//! | `delete`         | O(D log_D n)        |
//! | `update`         | O(D log_D n)        |
//! | `decrease_key`   | O(log_D n)          |
//! | `increase_key`   | O(D log_D n)        |
//! | `contains`       | O(1)                |
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::IndexedMinDHeap;
//!
//! let mut heap = IndexedMinDHeap::new(3, 10).unwrap();
//! heap.insert(0, 5).unwrap();
//! heap.insert(1, 3).unwrap();
//! heap.insert(2, 8).unwrap();
//! heap.insert(3, 1).unwrap();
//! heap.insert(4, 7).unwrap();
//!
//! assert_eq!(heap.peek_min_key_index(), Ok(3));
//! assert_eq!(heap.peek_min_value(), Ok(&1));
//!
//! heap.delete(3).unwrap();
//! assert_eq!(heap.peek_min_key_index(), Ok(1));
//! assert_eq!(heap.peek_min_value(), Ok(&3));
//!
//! // Speculative relaxation: only an improvement is applied.
//! assert_eq!(heap.decrease_key(2, 9), Ok(false));
//! assert_eq!(heap.decrease_key(2, 2), Ok(true));
//! assert_eq!(heap.poll_min(), Ok((2, 2)));
//! ```

use crate::traits::{HeapError, IndexedHeap};
use std::fmt;

/// An indexed min-heap with a configurable branching factor
///
/// The heap is sized once, at construction, for a fixed universe of key
/// indices `0..capacity`. Parent and first-child slots are precomputed for
/// every slot so the rebalancing walks never divide or multiply.
///
/// Ties between equal values are not stable. When several children of a
/// node share the minimum value, [`sink`](Self::sink) always picks the
/// lowest-numbered slot, so identical operation sequences produce identical
/// heap shapes.
#[derive(Debug, Clone)]
pub struct IndexedMinDHeap<P: Ord> {
    /// Branching factor, at least 2
    degree: usize,
    /// Number of keys currently present
    size: usize,
    /// `parent[i]` is the parent slot of slot `i` (unused for the root)
    parent: Vec<usize>,
    /// `child[i]` is the first child slot of slot `i`
    child: Vec<usize>,
    /// Position map: key index -> heap slot
    pm: Vec<Option<usize>>,
    /// Inverse map: heap slot -> key index
    im: Vec<usize>,
    /// Current value per key index
    values: Vec<Option<P>>,
}

impl<P: Ord> IndexedMinDHeap<P> {
    /// Creates an empty heap with the given branching factor over key indices `0..capacity`
    ///
    /// A `degree` below 2 is raised to 2.
    ///
    /// # Errors
    /// [`HeapError::Config`] if `capacity` is zero.
    pub fn new(degree: usize, capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::Config {
                reason: "capacity must be positive",
            });
        }

        let degree = if degree < 2 {
            log::debug!("clamping heap degree {} to 2", degree);
            2
        } else {
            degree
        };

        let parent = (0..capacity).map(|i| i.saturating_sub(1) / degree).collect();
        let child = (0..capacity)
            .map(|i| i.saturating_mul(degree).saturating_add(1))
            .collect();

        log::debug!(
            "created indexed {}-ary heap with capacity {}",
            degree,
            capacity
        );

        Ok(Self {
            degree,
            size: 0,
            parent,
            child,
            pm: vec![None; capacity],
            im: vec![0; capacity],
            values: std::iter::repeat_with(|| None).take(capacity).collect(),
        })
    }

    /// Branching factor of the heap
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Size of the key universe
    pub fn capacity(&self) -> usize {
        self.pm.len()
    }

    /// Returns the number of keys currently present
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if no key is present
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns true if `ki` is present
    ///
    /// # Errors
    /// [`HeapError::KeyOutOfBounds`] if `ki >= capacity()`.
    pub fn contains(&self, ki: usize) -> Result<bool, HeapError> {
        self.check_bounds(ki)?;
        Ok(self.pm[ki].is_some())
    }

    /// Heap slot currently occupied by `ki`, or `None` if it is absent
    pub fn position_of(&self, ki: usize) -> Result<Option<usize>, HeapError> {
        self.check_bounds(ki)?;
        Ok(self.pm[ki])
    }

    /// Key index stored at heap slot `slot`, if that slot is occupied
    pub fn key_at(&self, slot: usize) -> Option<usize> {
        (slot < self.size).then(|| self.im[slot])
    }

    /// Returns the current value of `ki`
    pub fn value_of(&self, ki: usize) -> Result<&P, HeapError> {
        self.slot_of(ki)?;
        self.values[ki].as_ref().ok_or(HeapError::KeyNotFound(ki))
    }

    /// Inserts `ki` with the given value
    ///
    /// # Errors
    /// - [`HeapError::KeyOutOfBounds`] if `ki >= capacity()`
    /// - [`HeapError::DuplicateKey`] if `ki` is already present
    pub fn insert(&mut self, ki: usize, value: P) -> Result<(), HeapError> {
        if self.contains(ki)? {
            return Err(HeapError::DuplicateKey(ki));
        }

        let slot = self.size;
        self.pm[ki] = Some(slot);
        self.im[slot] = ki;
        self.values[ki] = Some(value);
        self.size += 1;
        self.swim(slot);
        Ok(())
    }

    /// Returns the key index holding the minimum value
    ///
    /// # Errors
    /// [`HeapError::Underflow`] if the heap is empty.
    pub fn peek_min_key_index(&self) -> Result<usize, HeapError> {
        if self.size == 0 {
            return Err(HeapError::Underflow);
        }
        Ok(self.im[0])
    }

    /// Returns the minimum value
    pub fn peek_min_value(&self) -> Result<&P, HeapError> {
        let ki = self.peek_min_key_index()?;
        self.values[ki].as_ref().ok_or(HeapError::KeyNotFound(ki))
    }

    /// Removes the minimum, returning its key index and value
    pub fn poll_min(&mut self) -> Result<(usize, P), HeapError> {
        let ki = self.peek_min_key_index()?;
        let value = self.delete(ki)?;
        Ok((ki, value))
    }

    /// Removes the minimum, returning its key index
    pub fn poll_min_key_index(&mut self) -> Result<usize, HeapError> {
        self.poll_min().map(|(ki, _)| ki)
    }

    /// Removes the minimum, returning its value
    pub fn poll_min_value(&mut self) -> Result<P, HeapError> {
        self.poll_min().map(|(_, value)| value)
    }

    /// Removes `ki` from the heap and returns its value
    ///
    /// The last occupied slot is moved into the hole, then rebalanced in
    /// both directions since it may belong above or below its new position.
    ///
    /// # Errors
    /// - [`HeapError::KeyOutOfBounds`] if `ki >= capacity()`
    /// - [`HeapError::KeyNotFound`] if `ki` is absent
    pub fn delete(&mut self, ki: usize) -> Result<P, HeapError> {
        let slot = self.slot_of(ki)?;
        let last = self.size - 1;

        self.swap(slot, last);
        self.size = last;
        if slot < self.size {
            self.sink(slot);
            self.swim(slot);
        }

        self.pm[ki] = None;
        log::trace!("deleted key {} from slot {}", ki, slot);
        self.values[ki].take().ok_or(HeapError::KeyNotFound(ki))
    }

    /// Replaces the value of `ki` and returns the previous one
    ///
    /// Unlike [`decrease_key`](Self::decrease_key) and
    /// [`increase_key`](Self::increase_key) the new value is always stored.
    pub fn update(&mut self, ki: usize, value: P) -> Result<P, HeapError> {
        let slot = self.slot_of(ki)?;
        let old = self.values[ki].replace(value);
        self.sink(slot);
        self.swim(slot);
        old.ok_or(HeapError::KeyNotFound(ki))
    }

    /// Lowers the value of `ki` to `value` if it is strictly smaller
    ///
    /// Returns `Ok(true)` if the value changed and `Ok(false)` if it was a
    /// no-op, which makes it safe to call on every edge relaxation.
    ///
    /// # Errors
    /// [`HeapError::KeyNotFound`] if `ki` is absent.
    pub fn decrease_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        let slot = self.slot_of(ki)?;
        if !matches!(&self.values[ki], Some(current) if value < *current) {
            return Ok(false);
        }
        self.values[ki] = Some(value);
        self.swim(slot);
        Ok(true)
    }

    /// Raises the value of `ki` to `value` if it is strictly greater
    ///
    /// Returns `Ok(false)` without touching the heap otherwise.
    pub fn increase_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        let slot = self.slot_of(ki)?;
        if !matches!(&self.values[ki], Some(current) if value > *current) {
            return Ok(false);
        }
        self.values[ki] = Some(value);
        self.sink(slot);
        Ok(true)
    }

    /// Removes every key, keeping the capacity and lookup tables
    pub fn clear(&mut self) {
        for slot in 0..self.size {
            let ki = self.im[slot];
            self.pm[ki] = None;
            self.values[ki] = None;
        }
        self.size = 0;
    }

    /// Iterates over `(key index, value)` pairs in heap-slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &P)> + '_ {
        self.im[..self.size]
            .iter()
            .filter_map(move |&ki| self.values[ki].as_ref().map(|value| (ki, value)))
    }

    /// Checks the min-heap property over every occupied slot
    pub fn is_min_heap(&self) -> bool {
        (1..self.size).all(|slot| !self.less(slot, self.parent[slot]))
    }

    /// Checks that both index maps agree with each other and with the
    /// stored values, and that the min-heap property holds
    pub fn verify_invariants(&self) -> bool {
        if self.size > self.capacity() {
            return false;
        }

        let slots_consistent =
            (0..self.size).all(|slot| self.pm[self.im[slot]] == Some(slot));

        let keys_consistent = self.pm.iter().enumerate().all(|(ki, pos)| match *pos {
            Some(slot) => slot < self.size && self.im[slot] == ki && self.values[ki].is_some(),
            None => self.values[ki].is_none(),
        });

        let present = self.pm.iter().filter(|pos| pos.is_some()).count();

        slots_consistent && keys_consistent && present == self.size && self.is_min_heap()
    }

    fn check_bounds(&self, ki: usize) -> Result<(), HeapError> {
        if ki >= self.capacity() {
            return Err(HeapError::KeyOutOfBounds {
                index: ki,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Slot of a present key, or the appropriate error
    fn slot_of(&self, ki: usize) -> Result<usize, HeapError> {
        self.check_bounds(ki)?;
        self.pm[ki].ok_or(HeapError::KeyNotFound(ki))
    }

    /// Move the element at `slot` up while it is smaller than its parent
    fn swim(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = self.parent[slot];
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    /// Move the element at `slot` down while some child is smaller
    fn sink(&mut self, mut slot: usize) {
        while let Some(child) = self.min_child(slot) {
            if !self.less(child, slot) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    /// First occupied child slot holding the minimum value among the children of `slot`
    fn min_child(&self, slot: usize) -> Option<usize> {
        let from = self.child[slot];
        if from >= self.size {
            return None;
        }
        let to = self.size.min(from.saturating_add(self.degree));

        let mut min = from;
        for candidate in from + 1..to {
            if self.less(candidate, min) {
                min = candidate;
            }
        }
        Some(min)
    }

    /// Exchange two slots, keeping the position map in step
    fn swap(&mut self, i: usize, j: usize) {
        self.im.swap(i, j);
        self.pm[self.im[i]] = Some(i);
        self.pm[self.im[j]] = Some(j);
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.values[self.im[i]] < self.values[self.im[j]]
    }
}

impl<P: Ord> IndexedHeap<P> for IndexedMinDHeap<P> {
    fn capacity(&self) -> usize {
        IndexedMinDHeap::capacity(self)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn contains(&self, ki: usize) -> Result<bool, HeapError> {
        IndexedMinDHeap::contains(self, ki)
    }

    fn insert(&mut self, ki: usize, value: P) -> Result<(), HeapError> {
        IndexedMinDHeap::insert(self, ki, value)
    }

    fn delete(&mut self, ki: usize) -> Result<P, HeapError> {
        IndexedMinDHeap::delete(self, ki)
    }

    fn update(&mut self, ki: usize, value: P) -> Result<P, HeapError> {
        IndexedMinDHeap::update(self, ki, value)
    }

    fn value_of(&self, ki: usize) -> Result<&P, HeapError> {
        IndexedMinDHeap::value_of(self, ki)
    }

    fn peek(&self) -> Result<(usize, &P), HeapError> {
        let ki = self.peek_min_key_index()?;
        Ok((ki, self.peek_min_value()?))
    }

    fn pop(&mut self) -> Result<(usize, P), HeapError> {
        self.poll_min()
    }

    fn decrease_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        IndexedMinDHeap::decrease_key(self, ki, value)
    }

    fn increase_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        IndexedMinDHeap::increase_key(self, ki, value)
    }
}

impl<P: Ord> fmt::Display for IndexedMinDHeap<P> {
    /// Renders the occupied prefix of the inverse map, root first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.im[..self.size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ternary_sample() -> IndexedMinDHeap<i32> {
        let mut heap = IndexedMinDHeap::new(3, 10).unwrap();
        for (ki, value) in [(0, 5), (1, 3), (2, 8), (3, 1), (4, 7)] {
            heap.insert(ki, value).unwrap();
        }
        heap
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = IndexedMinDHeap::new(2, 8).unwrap();

        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(4, 30).unwrap();
        heap.insert(1, 10).unwrap();
        heap.insert(6, 20).unwrap();

        assert!(!heap.is_empty());
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_min_key_index(), Ok(1));
        assert_eq!(heap.peek_min_value(), Ok(&10));

        assert_eq!(heap.poll_min(), Ok((1, 10)));
        assert_eq!(heap.poll_min(), Ok((6, 20)));
        assert_eq!(heap.poll_min(), Ok((4, 30)));
        assert_eq!(heap.poll_min(), Err(HeapError::Underflow));
    }

    #[test]
    fn test_ternary_layout() {
        let mut heap = ternary_sample();
        assert_eq!(heap.to_string(), "[3, 0, 2, 1, 4]");
        assert_eq!(heap.peek_min_key_index(), Ok(3));

        assert_eq!(heap.delete(3), Ok(1));
        assert_eq!(heap.to_string(), "[1, 0, 2, 4]");
        assert_eq!(heap.peek_min_key_index(), Ok(1));
        assert_eq!(heap.peek_min_value(), Ok(&3));
        assert!(heap.verify_invariants());
    }

    #[test]
    fn test_precomputed_tables() {
        let heap: IndexedMinDHeap<i32> = IndexedMinDHeap::new(3, 8).unwrap();
        assert_eq!(heap.parent, vec![0, 0, 0, 0, 1, 1, 1, 2]);
        assert_eq!(heap.child, vec![1, 4, 7, 10, 13, 16, 19, 22]);
    }

    #[test]
    fn test_degree_clamped() {
        let heap: IndexedMinDHeap<i32> = IndexedMinDHeap::new(0, 4).unwrap();
        assert_eq!(heap.degree(), 2);
        let heap: IndexedMinDHeap<i32> = IndexedMinDHeap::new(1, 4).unwrap();
        assert_eq!(heap.degree(), 2);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            IndexedMinDHeap::<i32>::new(2, 0),
            Err(HeapError::Config { .. })
        ));
    }

    #[test]
    fn test_sink_prefers_first_minimal_child() {
        let mut heap = IndexedMinDHeap::new(3, 4).unwrap();
        heap.insert(0, 1).unwrap();
        heap.insert(1, 4).unwrap();
        heap.insert(2, 4).unwrap();
        heap.insert(3, 4).unwrap();

        assert_eq!(heap.update(0, 9), Ok(1));
        assert_eq!(heap.to_string(), "[1, 0, 2, 3]");
        assert_eq!(heap.position_of(0), Ok(Some(1)));
    }

    #[test]
    fn test_decrease_key_is_conditional() {
        let mut heap = IndexedMinDHeap::new(2, 4).unwrap();
        heap.insert(0, 10).unwrap();
        heap.insert(1, 5).unwrap();

        assert_eq!(heap.decrease_key(0, 15), Ok(false));
        assert_eq!(heap.decrease_key(0, 10), Ok(false));
        assert_eq!(heap.value_of(0), Ok(&10));

        assert_eq!(heap.decrease_key(0, 2), Ok(true));
        assert_eq!(heap.peek_min_key_index(), Ok(0));
    }

    #[test]
    fn test_increase_key_is_conditional() {
        let mut heap = IndexedMinDHeap::new(2, 4).unwrap();
        heap.insert(0, 1).unwrap();
        heap.insert(1, 5).unwrap();

        assert_eq!(heap.increase_key(0, 0), Ok(false));
        assert_eq!(heap.value_of(0), Ok(&1));

        assert_eq!(heap.increase_key(0, 7), Ok(true));
        assert_eq!(heap.peek_min_key_index(), Ok(1));
        assert!(heap.verify_invariants());
    }

    #[test]
    fn test_delete_last_slot() {
        let mut heap = IndexedMinDHeap::new(2, 4).unwrap();
        heap.insert(0, 1).unwrap();
        heap.insert(1, 2).unwrap();

        assert_eq!(heap.delete(1), Ok(2));
        assert_eq!(heap.contains(1), Ok(false));
        assert_eq!(heap.len(), 1);
        assert!(heap.verify_invariants());
    }

    #[test]
    fn test_key_reuse_after_delete() {
        let mut heap = IndexedMinDHeap::new(4, 3).unwrap();
        heap.insert(2, 8).unwrap();
        heap.delete(2).unwrap();
        heap.insert(2, 3).unwrap();
        assert_eq!(heap.value_of(2), Ok(&3));
    }

    #[test]
    fn test_clear() {
        let mut heap = ternary_sample();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.contains(3), Ok(false));
        assert!(heap.verify_invariants());
        heap.insert(3, 4).unwrap();
        assert_eq!(heap.peek_min_key_index(), Ok(3));
    }

    #[test]
    fn test_iter_follows_slots() {
        let heap = ternary_sample();
        let pairs: Vec<(usize, i32)> = heap.iter().map(|(ki, v)| (ki, *v)).collect();
        assert_eq!(pairs, vec![(3, 1), (0, 5), (2, 8), (1, 3), (4, 7)]);
    }

    #[test]
    fn test_descending_insertion() {
        let mut heap = IndexedMinDHeap::new(4, 100).unwrap();

        for ki in (0..100).rev() {
            heap.insert(ki, ki as i64).unwrap();
        }

        for expected in 0..100 {
            assert_eq!(heap.poll_min_key_index(), Ok(expected));
        }
    }
}
