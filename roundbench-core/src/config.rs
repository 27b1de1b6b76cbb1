//! Session Configuration

use crate::error::RunError;
use roundbench_report::{OutputFormat, ReportConfig};
use roundbench_stats::DEFAULT_MAX_SAMPLES_IN_MEMORY;

/// Default number of measured rounds
pub const DEFAULT_TRIALS: u64 = 100;

/// Default number of warm-up rounds
pub const DEFAULT_WARMUP: u64 = 100;

/// Configuration for a benchmark session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Measured rounds; every block runs once per round
    pub trials: u64,
    /// Warm-up rounds run before measurement, timings discarded
    pub warmup: u64,
    /// Task invocations per timed call (1 = no internal repetition)
    pub repeat: u64,
    /// Raw samples retained per block for the median
    pub max_samples_in_memory: usize,
    /// Seed for the round-order shuffle (`None` = from OS entropy)
    pub seed: Option<u64>,
    /// Draw a progress bar on stderr
    pub progress: bool,
    /// Format handed to the output sink by `run`
    pub format: OutputFormat,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            warmup: DEFAULT_WARMUP,
            repeat: 1,
            max_samples_in_memory: DEFAULT_MAX_SAMPLES_IN_MEMORY,
            seed: None,
            progress: false,
            format: OutputFormat::Human,
        }
    }
}

impl RunnerConfig {
    /// Reject configurations that cannot produce statistics.
    ///
    /// A zero warm-up count is allowed.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.trials == 0 {
            return Err(RunError::InvalidConfig(
                "trials must be at least 1".to_string(),
            ));
        }
        if self.repeat == 0 {
            return Err(RunError::InvalidConfig(
                "repeat must be at least 1".to_string(),
            ));
        }
        if self.max_samples_in_memory < 2 {
            return Err(RunError::InvalidConfig(format!(
                "max_samples_in_memory must be at least 2, got {}",
                self.max_samples_in_memory
            )));
        }
        Ok(())
    }

    /// Configuration as recorded in report metadata
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            trials: self.trials,
            warmup: self.warmup,
            repeat: self.repeat,
            max_samples_in_memory: self.max_samples_in_memory,
            seed: self.seed,
        }
    }
}
