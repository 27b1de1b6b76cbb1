#![warn(missing_docs)]
//! RoundBench Core - Session Runtime
//!
//! This crate runs benchmark sessions in-process:
//! - [`BenchmarkRunner`] for registering tasks and running shuffled rounds
//! - [`TimedBlock`] for per-task timing, repeat scaling, and warm-up logging
//! - Monotonic wall-clock timing via [`Timer`]
//!
//! ```
//! use roundbench_core::{BenchmarkRunner, RunnerConfig};
//!
//! let config = RunnerConfig {
//!     trials: 5,
//!     warmup: 2,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//! let mut runner = BenchmarkRunner::new(config);
//! runner.add_block("sum", |n| (0..=n).sum::<u64>());
//! runner.add_block("product", |n| (1..=n.max(1)).product::<u64>());
//!
//! let report = runner.execute().unwrap();
//! assert_eq!(report.blocks.len(), 2);
//! assert_eq!(report.blocks[0].measured_calls, 5);
//! ```

mod block;
mod config;
mod error;
mod measure;
mod runner;
mod warmup;

pub use block::{BlockPhase, TimedBlock};
pub use config::{DEFAULT_TRIALS, DEFAULT_WARMUP, RunnerConfig};
pub use error::{Phase, RunError, TaskError};
pub use measure::Timer;
pub use runner::BenchmarkRunner;
pub use warmup::{MAX_WARMUP_LOG_ENTRIES, WarmupLog, should_log_warmup};
