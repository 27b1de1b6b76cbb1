#![warn(missing_docs)]
//! # RoundBench
//!
//! Micro-benchmark harness that compares small tasks against each other under
//! identical conditions.
//!
//! RoundBench runs sessions in rounds:
//! - **Shuffled Rounds**: every round calls each block once, in a fresh random
//!   order, so drift is shared evenly between blocks
//! - **Warm-Up**: configurable rounds whose timings are discarded, with a
//!   log-scale sample kept for display
//! - **Streaming Statistics**: Welford mean and variance over every call, and
//!   a median over a bounded head/tail sample window
//! - **Repeat Multiplier**: one timed call can cover several task invocations
//!   for tasks too short to time individually
//! - **Pluggable Output**: human or JSON reports written to any sink
//!
//! ## Quick Start
//!
//! ```
//! use roundbench::prelude::*;
//!
//! let config = RunnerConfig {
//!     trials: 20,
//!     warmup: 5,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let words = ["alpha", "beta", "gamma"];
//! let mut runner = BenchmarkRunner::new(config);
//! runner.add_block("join", |_| words.join(","));
//! runner.add_block("concat", |_| words.concat());
//!
//! let report = runner.execute().unwrap();
//! assert_eq!(report.blocks.len(), 2);
//! ```
//!
//! ## Benchmark Binaries
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     roundbench::run(|runner| {
//!         runner.add_block("sum", |n| (0..n).sum::<u64>());
//!     })
//! }
//! ```

// Re-export core types
pub use roundbench_core::{
    BenchmarkRunner, BlockPhase, MAX_WARMUP_LOG_ENTRIES, Phase, RunError, RunnerConfig,
    TaskError, TimedBlock, Timer, WarmupLog,
};

// Re-export report types
pub use roundbench_report::{
    BlockMetrics, BlockReport, FileSink, MemorySink, OutputFormat, OutputSink, Report,
    ReportSummary, StdoutSink, WarmupEntry, format_duration, format_human_output,
    generate_json_report,
};

// Re-export stats
pub use roundbench_stats::{
    BoundedSampleBuffer, DEFAULT_MAX_SAMPLES_IN_MEMORY, RunningStatistics, SummaryStatistics,
    median_of_sorted, percentile_of_sorted,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkRunner, OutputFormat, OutputSink, Report, RunError, RunnerConfig, StdoutSink,
    };
}

/// Run the RoundBench CLI harness.
///
/// Call this from your benchmark binary's `main()` with a closure that
/// registers blocks.
pub use roundbench_cli::{Cli, run, run_with_cli};
