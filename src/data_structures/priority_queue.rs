use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use num_traits::Float;
use ordered_float::OrderedFloat;

/// Min-priority frontier of `(distance, vertex)` pairs for shortest path search
///
/// Duplicate vertices are allowed; callers discard stale entries when they
/// pop them. Equal distances pop the smaller vertex first.
#[derive(Debug, Clone)]
pub struct PriorityFrontier<W>
where
    W: Float + Debug,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(OrderedFloat<W>, usize)>>,
}

impl<W> Default for PriorityFrontier<W>
where
    W: Float + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> PriorityFrontier<W>
where
    W: Float + Debug,
{
    /// Creates a new empty frontier
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityFrontier {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Returns true if the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of entries, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Inserts a vertex at the given tentative distance
    pub fn push(&mut self, distance: W, vertex: usize) {
        self.heap.push(Reverse((OrderedFloat(distance), vertex)));
    }

    /// Removes and returns the entry with the smallest distance
    pub fn pop(&mut self) -> Option<(W, usize)> {
        self.heap
            .pop()
            .map(|Reverse((distance, vertex))| (distance.into_inner(), vertex))
    }

    /// Returns the entry with the smallest distance without removing it
    pub fn peek(&self) -> Option<(W, usize)> {
        self.heap
            .peek()
            .map(|Reverse((distance, vertex))| (distance.into_inner(), *vertex))
    }

    /// Clears the frontier
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
