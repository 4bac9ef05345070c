//! Bucket queue for small integer costs.

use std::collections::VecDeque;

use crate::error::SolveError;

/// Priority queue over costs `0..=bound`, one FIFO bucket per cost.
///
/// Items come out in non-decreasing cost order, and in insertion order
/// within one cost. Costs below the bucket currently being drained are
/// not allowed.
#[derive(Debug, Clone)]
pub struct BucketQueue<T> {
    buckets: Vec<VecDeque<T>>,
    cursor: usize,
    len: usize,
}

impl<T> BucketQueue<T> {
    /// A queue accepting costs up to and including `bound`.
    pub fn new(bound: u32) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(bound as usize + 1, VecDeque::new);
        Self {
            buckets,
            cursor: 0,
            len: 0,
        }
    }

    /// Largest accepted cost.
    #[inline]
    pub fn bound(&self) -> u32 {
        (self.buckets.len() - 1) as u32
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cost of the bucket being drained.
    #[inline]
    pub fn current_cost(&self) -> u32 {
        self.cursor as u32
    }

    /// Queue `item` at `cost`.
    pub fn push(&mut self, cost: u32, item: T) -> Result<(), SolveError> {
        let i = cost as usize;
        if i < self.cursor || i >= self.buckets.len() {
            return Err(SolveError::CostOutOfRange {
                cost,
                bound: self.bound(),
            });
        }
        self.buckets[i].push_back(item);
        self.len += 1;
        Ok(())
    }

    /// Take the oldest item of the cheapest non-empty bucket.
    pub fn pop(&mut self) -> Option<(u32, T)> {
        if self.len == 0 {
            return None;
        }
        while self.cursor < self.buckets.len() {
            if let Some(item) = self.buckets[self.cursor].pop_front() {
                self.len -= 1;
                return Some((self.cursor as u32, item));
            }
            self.cursor += 1;
        }
        None
    }

    /// Empty the queue and resize it for a new `bound`, keeping the bucket
    /// allocations that still fit.
    pub fn reset(&mut self, bound: u32) {
        for b in self.buckets.iter_mut() {
            b.clear();
        }
        self.buckets.resize_with(bound as usize + 1, VecDeque::new);
        self.cursor = 0;
        self.len = 0;
    }
}
