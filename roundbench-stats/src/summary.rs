//! Summary Statistics
//!
//! Point-in-time snapshot of a [`RunningStatistics`](crate::RunningStatistics).
//! Central tendency and spread come from the one-pass accumulator; median and
//! tail percentiles come from the retained samples.

/// Snapshot of derived statistics for one stream of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Exact running mean
    pub mean: f64,
    /// Median of retained samples
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest sample ever added
    pub min: f64,
    /// Largest sample ever added
    pub max: f64,
    /// 90th percentile of retained samples
    pub p90: f64,
    /// 99th percentile of retained samples
    pub p99: f64,
    /// Number of samples ever added
    pub sample_count: u64,
    /// Number of samples retained for the median
    pub retained: usize,
    /// Whether the median covers every sample
    pub median_exact: bool,
}

impl SummaryStatistics {
    /// Divide every time-valued field by `divisor`.
    ///
    /// Used to turn per-measurement values into per-iteration values when one
    /// measurement covers several iterations. Counts are left untouched.
    pub fn scaled(&self, divisor: f64) -> Self {
        Self {
            mean: self.mean / divisor,
            median: self.median / divisor,
            std_dev: self.std_dev / divisor,
            min: self.min / divisor,
            max: self.max / divisor,
            p90: self.p90 / divisor,
            p99: self.p99 / divisor,
            ..*self
        }
    }
}
