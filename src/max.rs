//! Indexed maximum D-ary heap
//!
//! A thin wrapper over [`IndexedMinDHeap`] that stores each value as
//! [`Reverse`], so the minimum of the inner heap is the maximum of this one.
//! Key indices, capacity and error behavior are identical to the min heap.
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::max::IndexedMaxDHeap;
//!
//! let mut heap = IndexedMaxDHeap::new(3, 6).unwrap();
//! heap.insert(1, 10).unwrap();
//! heap.insert(2, 20).unwrap();
//! heap.insert(3, 30).unwrap();
//!
//! assert_eq!(heap.peek_max_value(), Ok(&30));
//! assert_eq!(heap.increase_key(1, 40), Ok(true));
//! assert_eq!(heap.poll_max(), Ok((1, 40)));
//! ```

use crate::dary::IndexedMinDHeap;
use crate::traits::{HeapError, IndexedHeap};
use std::cmp::Reverse;
use std::fmt;

/// An indexed max-heap with a configurable branching factor
#[derive(Debug, Clone)]
pub struct IndexedMaxDHeap<P: Ord> {
    inner: IndexedMinDHeap<Reverse<P>>,
}

impl<P: Ord> IndexedMaxDHeap<P> {
    /// Creates an empty heap over key indices `0..capacity`
    ///
    /// # Errors
    /// [`HeapError::Config`] if `capacity` is zero.
    pub fn new(degree: usize, capacity: usize) -> Result<Self, HeapError> {
        Ok(Self {
            inner: IndexedMinDHeap::new(degree, capacity)?,
        })
    }

    pub fn degree(&self) -> usize {
        self.inner.degree()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, ki: usize) -> Result<bool, HeapError> {
        self.inner.contains(ki)
    }

    pub fn insert(&mut self, ki: usize, value: P) -> Result<(), HeapError> {
        self.inner.insert(ki, Reverse(value))
    }

    pub fn value_of(&self, ki: usize) -> Result<&P, HeapError> {
        self.inner.value_of(ki).map(|Reverse(value)| value)
    }

    /// Returns the key index holding the maximum value
    pub fn peek_max_key_index(&self) -> Result<usize, HeapError> {
        self.inner.peek_min_key_index()
    }

    /// Returns the maximum value
    pub fn peek_max_value(&self) -> Result<&P, HeapError> {
        self.inner.peek_min_value().map(|Reverse(value)| value)
    }

    /// Removes the maximum, returning its key index and value
    pub fn poll_max(&mut self) -> Result<(usize, P), HeapError> {
        self.inner
            .poll_min()
            .map(|(ki, Reverse(value))| (ki, value))
    }

    pub fn poll_max_key_index(&mut self) -> Result<usize, HeapError> {
        self.inner.poll_min_key_index()
    }

    pub fn poll_max_value(&mut self) -> Result<P, HeapError> {
        self.inner.poll_min_value().map(|Reverse(value)| value)
    }

    pub fn delete(&mut self, ki: usize) -> Result<P, HeapError> {
        self.inner.delete(ki).map(|Reverse(value)| value)
    }

    pub fn update(&mut self, ki: usize, value: P) -> Result<P, HeapError> {
        self.inner
            .update(ki, Reverse(value))
            .map(|Reverse(old)| old)
    }

    /// Lowers the value of `ki` if `value` is strictly smaller, sinking it
    ///
    /// Returns `Ok(false)` as a no-op otherwise.
    pub fn decrease_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        // Smaller in P is larger under Reverse
        self.inner.increase_key(ki, Reverse(value))
    }

    /// Raises the value of `ki` if `value` is strictly greater, swimming it
    ///
    /// Returns `Ok(false)` as a no-op otherwise.
    pub fn increase_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        self.inner.decrease_key(ki, Reverse(value))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Checks the max-heap property and the consistency of both index maps
    pub fn verify_invariants(&self) -> bool {
        self.inner.verify_invariants()
    }
}

impl<P: Ord> IndexedHeap<P> for IndexedMaxDHeap<P> {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, ki: usize) -> Result<bool, HeapError> {
        self.inner.contains(ki)
    }

    fn insert(&mut self, ki: usize, value: P) -> Result<(), HeapError> {
        IndexedMaxDHeap::insert(self, ki, value)
    }

    fn delete(&mut self, ki: usize) -> Result<P, HeapError> {
        IndexedMaxDHeap::delete(self, ki)
    }

    fn update(&mut self, ki: usize, value: P) -> Result<P, HeapError> {
        IndexedMaxDHeap::update(self, ki, value)
    }

    fn value_of(&self, ki: usize) -> Result<&P, HeapError> {
        IndexedMaxDHeap::value_of(self, ki)
    }

    fn peek(&self) -> Result<(usize, &P), HeapError> {
        let ki = self.peek_max_key_index()?;
        Ok((ki, self.peek_max_value()?))
    }

    fn pop(&mut self) -> Result<(usize, P), HeapError> {
        self.poll_max()
    }

    fn decrease_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        IndexedMaxDHeap::decrease_key(self, ki, value)
    }

    fn increase_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError> {
        IndexedMaxDHeap::increase_key(self, ki, value)
    }
}

impl<P: Ord> fmt::Display for IndexedMaxDHeap<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
