//! Timeline of delayed work, driven by a virtual millisecond clock.
//!
//! Items fire in `(due_ms, insertion order)` order, so two items scheduled for
//! the same instant fire in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::Action;

/// Work that becomes due at a later instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Periodic fall timer; fires `Down` and reschedules itself
    FallTick,
    /// Append an action to the queue
    Emit(Action),
    /// Read the current field for full rows
    ClearCheck,
}

#[derive(Debug)]
struct Entry {
    due_ms: u64,
    seq: u64,
    item: Deferred,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed: BinaryHeap is a max-heap and the earliest entry must pop first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

#[derive(Debug, Default)]
pub struct Timeline {
    now_ms: u64,
    next_seq: u64,
    heap: BinaryHeap<Entry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `item` to fire `delay_ms` after the current instant
    pub fn schedule(&mut self, delay_ms: u64, item: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            item,
        });
    }

    /// Pop the earliest item due at or before `until_ms`, moving the clock to its
    /// due instant.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Deferred> {
        if self.heap.peek()?.due_ms > until_ms {
            return None;
        }
        let entry = self.heap.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.item)
    }

    /// Move the clock forward (never backwards)
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Due instant of the earliest pending item
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending items matching `pred`
    pub fn count(&self, pred: impl Fn(&Deferred) -> bool) -> usize {
        self.heap.iter().filter(|e| pred(&e.item)).count()
    }
}
