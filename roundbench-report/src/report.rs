//! Report Data Structures

use chrono::{DateTime, Utc};
use roundbench_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Complete benchmark session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    /// One entry per registered block, in registration order
    pub blocks: Vec<BlockReport>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Session configuration captured in report metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub trials: u64,
    pub warmup: u64,
    pub repeat: u64,
    pub max_samples_in_memory: usize,
    pub seed: Option<u64>,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// Result for a single timed block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockReport {
    pub label: String,
    /// Per-iteration timing metrics
    pub metrics: BlockMetrics,
    /// Number of timed measurements
    pub measured_calls: u64,
    /// Underlying task invocations during measurement (`measured_calls * repeat`)
    pub measured_iterations: u64,
    /// Number of timed warm-up calls
    pub warmup_calls: u64,
    /// Underlying task invocations during warm-up (`warmup_calls * repeat`)
    pub warmup_iterations: u64,
    /// Task invocations per timed measurement
    pub repeat: u64,
    /// Debug rendering of the first value the task returned
    pub first_result: Option<String>,
    /// Sampled warm-up timings, for display only
    pub warmup_log: Vec<WarmupEntry>,
}

/// Per-iteration timing metrics, in nanoseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMetrics {
    pub mean_ns: f64,
    pub median_ns: f64,
    pub std_dev_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
    pub p90_ns: f64,
    pub p99_ns: f64,
    /// Total measured time across all measurements (not divided by repeat)
    pub total_ns: u64,
    /// Samples fed to the statistics accumulator
    pub samples: u64,
    /// Samples retained for the median
    pub retained: usize,
    /// Whether the median was computed over every sample
    pub median_exact: bool,
}

impl From<&SummaryStatistics> for BlockMetrics {
    fn from(stats: &SummaryStatistics) -> Self {
        Self {
            mean_ns: stats.mean,
            median_ns: stats.median,
            std_dev_ns: stats.std_dev,
            min_ns: stats.min,
            max_ns: stats.max,
            p90_ns: stats.p90,
            p99_ns: stats.p99,
            total_ns: 0, // Filled from the block's accumulated time
            samples: stats.sample_count,
            retained: stats.retained,
            median_exact: stats.median_exact,
        }
    }
}

/// One sampled warm-up call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmupEntry {
    /// Warm-up call index (0-based)
    pub index: u64,
    /// Elapsed time of the whole timed call
    pub elapsed_ns: u64,
    /// Task invocations inside the timed call
    pub repeat: u64,
    /// Debug rendering of the returned value
    pub result: Option<String>,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_blocks: usize,
    /// Label of the block with the lowest mean
    pub fastest: Option<String>,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Summarize `blocks`, picking the fastest by mean time
    pub fn from_blocks(blocks: &[BlockReport], total_duration_ms: f64) -> Self {
        let fastest = blocks
            .iter()
            .filter(|b| !b.metrics.mean_ns.is_nan())
            .min_by(|a, b| {
                a.metrics
                    .mean_ns
                    .partial_cmp(&b.metrics.mean_ns)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|b| b.label.clone());

        Self {
            total_blocks: blocks.len(),
            fastest,
            total_duration_ms,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::meta::build_report_meta;

    pub fn block(label: &str, mean_ns: f64) -> BlockReport {
        BlockReport {
            label: label.to_string(),
            metrics: BlockMetrics {
                mean_ns,
                median_ns: mean_ns,
                std_dev_ns: mean_ns / 10.0,
                min_ns: mean_ns / 2.0,
                max_ns: mean_ns * 2.0,
                p90_ns: mean_ns * 1.5,
                p99_ns: mean_ns * 1.9,
                total_ns: (mean_ns * 10.0) as u64,
                samples: 10,
                retained: 10,
                median_exact: true,
            },
            measured_calls: 10,
            measured_iterations: 10,
            warmup_calls: 5,
            warmup_iterations: 5,
            repeat: 1,
            first_result: Some("42".to_string()),
            warmup_log: vec![WarmupEntry {
                index: 0,
                elapsed_ns: (mean_ns * 3.0) as u64,
                repeat: 1,
                result: Some("42".to_string()),
            }],
        }
    }

    pub fn report(blocks: Vec<BlockReport>) -> Report {
        let summary = ReportSummary::from_blocks(&blocks, 12.5);
        Report {
            meta: build_report_meta(ReportConfig {
                trials: 10,
                warmup: 5,
                repeat: 1,
                max_samples_in_memory: 10_000,
                seed: Some(7),
            }),
            blocks,
            summary,
        }
    }
}
