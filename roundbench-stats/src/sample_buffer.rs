//! Bounded Sample Retention
//!
//! Keeps at most `capacity` raw samples so that a median can be computed
//! without storing the full history of a long run:
//! - **Head**: the first `capacity / 2` samples, frozen once full
//! - **Tail**: a ring of the most recent `capacity / 2` samples
//!
//! While no more than `capacity` samples were added, head ++ tail is the
//! complete history and the median is exact. Past that point the samples in
//! the middle of the run are dropped and the median becomes an approximation
//! over the earliest and the most recent window.

use crate::percentiles::{median_of_sorted, percentile_of_sorted};
use std::collections::VecDeque;

/// Fixed-capacity append-only list that rejects inserts once full.
#[derive(Debug, Clone)]
pub struct HeadBuffer {
    samples: Vec<f64>,
    capacity: usize,
}

impl HeadBuffer {
    /// Create an empty head accepting up to `capacity` samples.
    ///
    /// Storage grows with the samples actually added.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Vec::new(),
            capacity,
        }
    }

    /// Append `sample` if there is room. Returns `false` when full.
    #[inline]
    pub fn try_push(&mut self, sample: f64) -> bool {
        if self.samples.len() >= self.capacity {
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Retained samples in insertion order
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample was accepted yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether further inserts will be rejected
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }
}

/// Fixed-capacity ring that evicts its oldest sample when full.
#[derive(Debug, Clone)]
pub struct TailRing {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl TailRing {
    /// Create an empty ring holding up to `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
        }
    }

    /// Append `sample`, evicting the oldest one first if the ring is full.
    #[inline]
    pub fn push(&mut self, sample: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the ring is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Head + tail sample retention with a hard memory bound.
#[derive(Debug, Clone)]
pub struct BoundedSampleBuffer {
    head: HeadBuffer,
    tail: TailRing,
    total_added: u64,
}

impl BoundedSampleBuffer {
    /// Create a buffer retaining at most `max_samples` samples.
    ///
    /// Each half gets `max_samples / 2` slots, and never fewer than one, so
    /// a non-empty stream always has a median.
    pub fn new(max_samples: usize) -> Self {
        let half = (max_samples / 2).max(1);
        Self {
            head: HeadBuffer::new(half),
            tail: TailRing::new(half),
            total_added: 0,
        }
    }

    /// Offer `sample` to the head. Returns `false` once the head is frozen.
    pub fn try_add_to_head(&mut self, sample: f64) -> bool {
        self.head.try_push(sample)
    }

    /// Push `sample` into the tail ring (always succeeds).
    pub fn add_to_tail(&mut self, sample: f64) {
        self.tail.push(sample);
    }

    /// Record one sample: head first, tail once the head is full.
    #[inline]
    pub fn insert(&mut self, sample: f64) {
        self.total_added += 1;
        if !self.try_add_to_head(sample) {
            self.add_to_tail(sample);
        }
    }

    /// The earliest samples, in insertion order
    pub fn head(&self) -> &[f64] {
        self.head.as_slice()
    }

    /// The most recent samples past the head, oldest first
    pub fn tail(&self) -> impl Iterator<Item = f64> + '_ {
        self.tail.iter()
    }

    /// Number of samples currently retained
    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    /// Whether nothing is retained
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail.is_empty()
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.head.capacity + self.tail.capacity
    }

    /// Number of samples ever inserted
    pub fn total_added(&self) -> u64 {
        self.total_added
    }

    /// Whether the retained set is the full history
    pub fn is_complete(&self) -> bool {
        self.total_added as usize == self.len()
    }

    /// Head ++ tail, sorted ascending
    pub fn sorted_retained(&self) -> Vec<f64> {
        let mut sorted: Vec<f64> = self.head().iter().copied().chain(self.tail()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    /// Median of the retained samples, `None` when nothing is retained.
    ///
    /// Odd counts return the middle element, even counts the mean of the two
    /// middle elements.
    pub fn median_of_retained(&self) -> Option<f64> {
        median_of_sorted(&self.sorted_retained())
    }

    /// Percentile (0-100) of the retained samples with linear interpolation
    pub fn percentile_of_retained(&self, percentile: f64) -> Option<f64> {
        percentile_of_sorted(&self.sorted_retained(), percentile)
    }
}
