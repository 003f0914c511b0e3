use std::{cmp::Reverse, collections::BinaryHeap};

use radix_heap::RadixHeapMap;

use crate::graphs::{Distance, Vertex};

/// A priority queue over vertices keyed by distance, as Dijkstra-style
/// searches need it. Implementations may or may not support decrease key;
/// stale entries are filtered by the expanded set instead.
pub trait VertexDistanceQueue {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    fn insert(&mut self, vertex: Vertex, distance: Distance);

    /// Removes and returns the vertex with the smallest distance, or `None`
    /// if the queue is empty.
    fn pop(&mut self) -> Option<Vertex>;

    fn is_empty(&self) -> bool;
}

pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<Reverse<(Distance, Vertex)>>,
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }
}

impl Default for VertexDistanceQueueBinaryHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, distance: Distance) {
        self.heap.push(Reverse((distance, vertex)));
    }

    fn pop(&mut self) -> Option<Vertex> {
        let Reverse((_distance, vertex)) = self.heap.pop()?;

        Some(vertex)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Monotone queue for plain Dijkstra, where popped keys never decrease. Not
/// usable for A* style searches whose keys are not monotone.
pub struct VertexDistanceQueueRadixHeap {
    heap: RadixHeapMap<Reverse<Distance>, Vertex>,
}

impl VertexDistanceQueueRadixHeap {
    pub fn new() -> Self {
        VertexDistanceQueueRadixHeap {
            heap: RadixHeapMap::new(),
        }
    }
}

impl Default for VertexDistanceQueueRadixHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueue for VertexDistanceQueueRadixHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, distance: Distance) {
        self.heap.push(Reverse(distance), vertex);
    }

    fn pop(&mut self) -> Option<Vertex> {
        let (Reverse(_distance), vertex) = self.heap.pop()?;

        Some(vertex)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
