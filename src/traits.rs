//! Common traits for indexed heap data structures
//!
//! This module provides the error type shared by every heap in this crate and the
//! [`IndexedHeap`] trait implemented by both [`IndexedMinDHeap`](crate::dary::IndexedMinDHeap)
//! and [`IndexedMaxDHeap`](crate::max::IndexedMaxDHeap).
//!
//! Unlike handle-based heaps, an indexed heap is addressed by a caller-assigned
//! *key index* in `0..capacity`. The caller owns that universe (for example the
//! vertex ids of a graph) and the heap only tracks which keys are currently present.

use thiserror::Error;

/// Error type for indexed heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The heap could not be built from the given constructor arguments
    #[error("invalid heap configuration: {reason}")]
    Config {
        /// What was wrong with the arguments
        reason: &'static str,
    },
    /// The key index is outside `0..capacity`
    #[error("key index {index} out of bounds for capacity {capacity}")]
    KeyOutOfBounds {
        /// The offending key index
        index: usize,
        /// The fixed capacity of the heap
        capacity: usize,
    },
    /// The key index is already present in the heap
    #[error("key index {0} already exists")]
    DuplicateKey(usize),
    /// The key index is not present in the heap
    #[error("key index {0} does not exist")]
    KeyNotFound(usize),
    /// Peek or poll on an empty heap
    #[error("priority queue underflow")]
    Underflow,
}

/// Shared surface of the indexed heaps in this crate
///
/// "Top" means the minimum for a min heap and the maximum for a max heap.
/// Every method that takes a key index reports [`HeapError::KeyOutOfBounds`]
/// before anything else, and no method mutates the heap when it returns an error.
///
/// # Example
///
/// ```rust
/// use indexed_dary_heap::{IndexedHeap, IndexedMinDHeap};
///
/// fn drain<H: IndexedHeap<u32>>(heap: &mut H) -> Vec<usize> {
///     let mut keys = Vec::new();
///     while let Ok((ki, _)) = heap.pop() {
///         keys.push(ki);
///     }
///     keys
/// }
///
/// let mut heap = IndexedMinDHeap::new(4, 8).unwrap();
/// heap.insert(2, 30).unwrap();
/// heap.insert(5, 10).unwrap();
/// heap.insert(7, 20).unwrap();
/// assert_eq!(drain(&mut heap), vec![5, 7, 2]);
/// ```
pub trait IndexedHeap<P: Ord> {
    /// Size of the key universe: valid key indices are `0..capacity()`
    fn capacity(&self) -> usize;

    /// Returns the number of keys currently present
    fn len(&self) -> usize;

    /// Returns true if no key is present
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `ki` is present
    fn contains(&self, ki: usize) -> Result<bool, HeapError>;

    /// Inserts `ki` with the given value
    ///
    /// # Errors
    /// [`HeapError::DuplicateKey`] if `ki` is already present.
    fn insert(&mut self, ki: usize, value: P) -> Result<(), HeapError>;

    /// Removes `ki`, returning its value
    ///
    /// # Errors
    /// [`HeapError::KeyNotFound`] if `ki` is absent.
    fn delete(&mut self, ki: usize) -> Result<P, HeapError>;

    /// Unconditionally replaces the value of `ki`, returning the old value
    fn update(&mut self, ki: usize, value: P) -> Result<P, HeapError>;

    /// Returns the current value of `ki`
    fn value_of(&self, ki: usize) -> Result<&P, HeapError>;

    /// Returns the top key index and its value without removing it
    ///
    /// # Errors
    /// [`HeapError::Underflow`] on an empty heap.
    fn peek(&self) -> Result<(usize, &P), HeapError>;

    /// Returns the top key index without removing it
    fn peek_key_index(&self) -> Result<usize, HeapError> {
        self.peek().map(|(ki, _)| ki)
    }

    /// Removes and returns the top key index and its value
    fn pop(&mut self) -> Result<(usize, P), HeapError>;

    /// Lowers the value of `ki` if `value` is strictly smaller than the current one
    ///
    /// Returns `Ok(false)` and leaves the heap untouched otherwise.
    fn decrease_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError>;

    /// Raises the value of `ki` if `value` is strictly greater than the current one
    ///
    /// Returns `Ok(false)` and leaves the heap untouched otherwise.
    fn increase_key(&mut self, ki: usize, value: P) -> Result<bool, HeapError>;
}
