//! One-Pass Statistics
//!
//! Welford's online algorithm for mean and variance, plus min/max tracking
//! and bounded raw-sample retention for the median. Each `add` is O(1).

use crate::DEFAULT_MAX_SAMPLES_IN_MEMORY;
use crate::percentiles::{median_of_sorted, percentile_of_sorted};
use crate::sample_buffer::BoundedSampleBuffer;
use crate::summary::SummaryStatistics;

/// Streaming accumulator for timing samples.
///
/// Owned by exactly one timed block and fed from one thread.
#[derive(Debug, Clone)]
pub struct RunningStatistics {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
    samples: BoundedSampleBuffer,
}

impl Default for RunningStatistics {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES_IN_MEMORY)
    }
}

impl RunningStatistics {
    /// Create an empty accumulator retaining at most `max_samples_in_memory`
    /// raw samples for the median.
    pub fn new(max_samples_in_memory: usize) -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            samples: BoundedSampleBuffer::new(max_samples_in_memory),
        }
    }

    /// Record one sample, in arrival order.
    #[inline]
    pub fn add(&mut self, sample: f64) {
        self.count += 1;
        let delta = sample - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = sample - self.mean;
        self.m2 += delta * delta2;

        if sample < self.min {
            self.min = sample;
        }
        if sample > self.max {
            self.max = sample;
        }

        self.samples.insert(sample);
    }

    /// Number of samples added
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether no sample was added yet
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Running mean (0.0 before the first sample)
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance `M2 / n`. NaN when empty.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.m2 / self.count as f64
    }

    /// Population standard deviation. NaN when empty.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest sample (+inf when empty)
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample (-inf when empty)
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Median of the retained samples.
    ///
    /// Exact while [`median_is_exact`](Self::median_is_exact) holds.
    pub fn median(&self) -> Option<f64> {
        self.samples.median_of_retained()
    }

    /// Percentile (0-100) of the retained samples
    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        self.samples.percentile_of_retained(percentile)
    }

    /// Whether every sample ever added is still retained
    pub fn median_is_exact(&self) -> bool {
        self.samples.is_complete()
    }

    /// Number of raw samples currently retained
    pub fn retained(&self) -> usize {
        self.samples.len()
    }

    /// Retained raw samples
    pub fn samples(&self) -> &BoundedSampleBuffer {
        &self.samples
    }

    /// Snapshot of every derived statistic, `None` when empty.
    pub fn summary(&self) -> Option<SummaryStatistics> {
        if self.count == 0 {
            return None;
        }

        let sorted = self.samples.sorted_retained();

        Some(SummaryStatistics {
            mean: self.mean,
            median: median_of_sorted(&sorted)?,
            std_dev: self.std_dev(),
            min: self.min,
            max: self.max,
            p90: percentile_of_sorted(&sorted, 90.0)?,
            p99: percentile_of_sorted(&sorted, 99.0)?,
            sample_count: self.count,
            retained: sorted.len(),
            median_exact: self.median_is_exact(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pass(samples: &[f64]) -> (f64, f64) {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        (mean, variance)
    }

    fn assert_matches_two_pass(samples: &[f64]) {
        let mut stats = RunningStatistics::default();
        for &s in samples {
            stats.add(s);
        }
        let (mean, variance) = two_pass(samples);
        let tol = 1e-9 * mean.abs().max(1.0);
        assert!(
            (stats.mean() - mean).abs() <= tol,
            "mean {} vs {}",
            stats.mean(),
            mean
        );
        let var_tol = 1e-9 * variance.abs().max(1.0);
        assert!(
            (stats.variance() - variance).abs() <= var_tol,
            "variance {} vs {}",
            stats.variance(),
            variance
        );
        assert_eq!(stats.count(), samples.len() as u64);
    }

    #[test]
    fn test_single_sample() {
        let mut stats = RunningStatistics::default();
        stats.add(42.0);
        assert_eq!(stats.mean(), 42.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.std_dev(), 0.0);
        assert_eq!(stats.min(), 42.0);
        assert_eq!(stats.max(), 42.0);
        assert_eq!(stats.median(), Some(42.0));
    }

    #[test]
    fn test_empty_is_nan() {
        let stats = RunningStatistics::default();
        assert!(stats.variance().is_nan());
        assert!(stats.std_dev().is_nan());
        assert!(stats.median().is_none());
        assert!(stats.summary().is_none());
    }

    #[test]
    fn test_welford_prefixes_up_to_ten_thousand() {
        let samples: Vec<f64> = (0..10_000)
            .map(|i| 1_000.0 + ((i * 7_919) % 1_013) as f64 * 0.37)
            .collect();
        for n in [1, 2, 3, 10, 99, 1_000, 9_999, 10_000] {
            assert_matches_two_pass(&samples[..n]);
        }
    }

    #[test]
    fn test_welford_constant_sequence() {
        let samples = vec![123_456.789; 10_000];
        let mut stats = RunningStatistics::default();
        for &s in &samples {
            stats.add(s);
        }
        assert!((stats.mean() - 123_456.789).abs() < 1e-6);
        assert!(stats.variance().abs() < 1e-9);
    }

    #[test]
    fn test_welford_increasing_and_decreasing() {
        let increasing: Vec<f64> = (1..=10_000).map(|x| x as f64).collect();
        let decreasing: Vec<f64> = increasing.iter().rev().copied().collect();
        assert_matches_two_pass(&increasing);
        assert_matches_two_pass(&decreasing);
    }

    #[test]
    fn test_large_offset_is_stable() {
        // Naive sum-of-squares loses all precision here
        let samples: Vec<f64> = (0..1_000).map(|i| 1e9 + (i % 4) as f64).collect();
        let mut stats = RunningStatistics::default();
        for &s in &samples {
            stats.add(s);
        }
        let (_, variance) = two_pass(&samples);
        assert!((stats.variance() - variance).abs() < 1e-3);
        assert!((stats.variance() - 1.25).abs() < 1e-3);
    }

    #[test]
    fn test_min_max_tracking() {
        let mut stats = RunningStatistics::default();
        for s in [5.0, 1.0, 9.0, 3.0] {
            stats.add(s);
        }
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 9.0);
    }

    #[test]
    fn test_median_exact_until_capacity() {
        let mut stats = RunningStatistics::new(4);
        for s in [5.0, 1.0, 3.0, 7.0] {
            stats.add(s);
        }
        assert!(stats.median_is_exact());
        assert_eq!(stats.median(), Some(4.0));

        stats.add(100.0);
        assert!(!stats.median_is_exact());
        assert_eq!(stats.retained(), 4);
        assert_eq!(stats.count(), 5);
    }

    #[test]
    fn test_summary_with_minimal_buffer() {
        for max_samples in [0, 1] {
            let mut stats = RunningStatistics::new(max_samples);
            stats.add(5.0);
            let summary = stats.summary().unwrap();
            assert_eq!(summary.median, 5.0);
            assert_eq!(summary.p99, 5.0);
            assert_eq!(summary.retained, 1);

            stats.add(9.0);
            stats.add(1.0);
            let summary = stats.summary().unwrap();
            // Head keeps 5, tail keeps the latest sample
            assert_eq!(summary.median, 3.0);
            assert_eq!(summary.sample_count, 3);
            assert!(!summary.median_exact);
        }
    }

    #[test]
    fn test_summary_snapshot() {
        let mut stats = RunningStatistics::default();
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.add(s);
        }
        let summary = stats.summary().unwrap();
        assert!((summary.mean - 3.0).abs() < f64::EPSILON);
        assert!((summary.median - 3.0).abs() < f64::EPSILON);
        assert!((summary.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
        assert_eq!(summary.retained, 5);
        assert!(summary.median_exact);
    }
}
