//! Frontier disciplines for the state-space searches.
//!
//! The breadth-first, depth-first and A* searches run the same expansion loop;
//! the only thing that differs between them is the order in which the frontier
//! hands states back, which is what this trait abstracts.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// The set of generated but not yet expanded states.
pub trait Frontier<T> {
    /// Add a state. `priority` is only meaningful to ordered frontiers.
    fn push(&mut self, item: T, priority: f64);
    /// Remove the next state to expand.
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out: breadth-first order.
#[derive(Debug)]
pub struct FifoFrontier<T> {
    queue: VecDeque<T>,
}

impl<T> FifoFrontier<T> {
    pub fn new() -> Self {
        FifoFrontier { queue: VecDeque::new() }
    }
}

impl<T> Default for FifoFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for FifoFrontier<T> {
    fn push(&mut self, item: T, _priority: f64) {
        self.queue.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out: depth-first order.
#[derive(Debug)]
pub struct LifoFrontier<T> {
    stack: Vec<T>,
}

impl<T> LifoFrontier<T> {
    pub fn new() -> Self {
        LifoFrontier { stack: Vec::new() }
    }
}

impl<T> Default for LifoFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for LifoFrontier<T> {
    fn push(&mut self, item: T, _priority: f64) {
        self.stack.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

struct Prioritized<T> {
    priority: OrderedFloat<f64>,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Prioritized<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Prioritized<T> {}

impl<T> PartialOrd for Prioritized<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Prioritized<T> {
    // Reversed so that `BinaryHeap` (a max-heap) pops the lowest priority,
    // and the earliest insertion among equal priorities.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Lowest priority first, ties in insertion order: A* order.
pub struct PriorityFrontier<T> {
    heap: BinaryHeap<Prioritized<T>>,
    next_seq: u64,
}

impl<T> PriorityFrontier<T> {
    pub fn new() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Priority of the state `pop` would return next.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|p| p.priority.into_inner())
    }
}

impl<T> Default for PriorityFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for PriorityFrontier<T> {
    fn push(&mut self, item: T, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Prioritized {
            priority: OrderedFloat(priority),
            seq,
            item,
        });
    }

    fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|p| p.item)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
