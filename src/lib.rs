//! Indexed D-ary Heaps for Rust
//!
//! This crate provides an indexed priority queue whose elements are referenced by a
//! caller-assigned *key index* in a fixed universe `0..capacity`, rather than by
//! opaque handles. It supports insert, arbitrary deletion, and decrease/increase-key,
//! the operations that algorithms like Dijkstra's shortest path and event-driven
//! schedulers need.
//!
//! # Features
//!
//! - **Indexed Min D-ary Heap**: O(log_D n) insert and decrease_key; O(D log_D n) delete,
//!   poll and increase_key; O(1) peek and membership
//! - **Indexed Max D-ary Heap**: the same structure ordered by maximum
//! - **Pathfinding**: decrease-key Dijkstra over dense or labeled graphs
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::IndexedMinDHeap;
//!
//! let mut heap = IndexedMinDHeap::new(4, 16).unwrap();
//! heap.insert(7, 50).unwrap();
//! heap.insert(2, 20).unwrap();
//! heap.decrease_key(7, 10).unwrap();
//! assert_eq!(heap.peek_min_key_index(), Ok(7));
//! assert_eq!(heap.poll_min_value(), Ok(10));
//! ```

pub mod dary;
pub mod max;
pub mod pathfinding;
pub mod traits;

// Re-export the main types for convenience
pub use dary::IndexedMinDHeap;
pub use max::IndexedMaxDHeap;
pub use traits::{HeapError, IndexedHeap};
