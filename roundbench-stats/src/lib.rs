#![warn(missing_docs)]
//! RoundBench Statistical Engine
//!
//! Bounded-memory statistics for benchmark timings:
//! - One-pass (Welford) mean and variance with min/max tracking
//! - Head + tail sample retention for the median without unbounded history
//! - Percentiles over the retained samples

mod percentiles;
mod running;
mod sample_buffer;
mod summary;

pub use percentiles::{median_of_sorted, percentile_of_sorted};
pub use running::RunningStatistics;
pub use sample_buffer::{BoundedSampleBuffer, HeadBuffer, TailRing};
pub use summary::SummaryStatistics;

/// Default upper bound on raw samples retained per statistics stream
pub const DEFAULT_MAX_SAMPLES_IN_MEMORY: usize = 10_000;
