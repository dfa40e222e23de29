use crate::core::event::Event;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry: an event plus its insertion sequence number for deterministic ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Queued {
    event: Event,
    seq: u64,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .time
            .cmp(&other.event.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of events by time; equal times pop in insertion order.
///
/// Stale entries are never removed eagerly. They stay in the heap until popped.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Queued>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Queued { event, seq }));
    }

    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek().map(|Reverse(q)| &q.event)
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(q)| q.event)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of events ever pushed, stale ones included.
    pub fn total_pushed(&self) -> u64 {
        self.next_seq
    }
}
