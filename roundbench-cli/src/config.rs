//! Configuration loading from roundbench.toml
//!
//! Session settings can live in a `roundbench.toml` file in the project root.
//! The file is discovered by walking up from the current directory; command
//! line flags override anything it sets.

use anyhow::Context;
use roundbench_core::{DEFAULT_TRIALS, DEFAULT_WARMUP, RunnerConfig};
use roundbench_report::OutputFormat;
use roundbench_stats::DEFAULT_MAX_SAMPLES_IN_MEMORY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "roundbench.toml";

/// RoundBench configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RoundConfig {
    /// Session settings
    #[serde(default)]
    pub runner: RunnerSection,
    /// Report settings
    #[serde(default)]
    pub output: OutputSection,
}

/// `[runner]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunnerSection {
    /// Measured rounds
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Warm-up rounds
    #[serde(default = "default_warmup")]
    pub warmup: u64,
    /// Task invocations per timed call
    #[serde(default = "default_repeat")]
    pub repeat: u64,
    /// Raw samples kept per block for the median
    #[serde(default = "default_max_samples")]
    pub max_samples_in_memory: usize,
    /// Fixed shuffle seed
    #[serde(default)]
    pub seed: Option<u64>,
    /// Show a progress bar
    #[serde(default)]
    pub progress: bool,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            warmup: default_warmup(),
            repeat: default_repeat(),
            max_samples_in_memory: default_max_samples(),
            seed: None,
            progress: false,
        }
    }
}

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}
fn default_warmup() -> u64 {
    DEFAULT_WARMUP
}
fn default_repeat() -> u64 {
    1
}
fn default_max_samples() -> usize {
    DEFAULT_MAX_SAMPLES_IN_MEMORY
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputSection {
    /// Report format: "human" or "json"
    #[serde(default)]
    pub format: OutputFormat,
    /// Report file (stdout when absent)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl RoundConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("invalid {}", path.display()))?;
        Ok(config)
    }

    /// Find the nearest `roundbench.toml` walking up from `start`
    pub fn find_from(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut dir = start.into();
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Discover and load configuration from the current directory upwards.
    ///
    /// Returns `Ok(None)` when no file exists; a file that fails to parse is
    /// an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        match Self::find_from(cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::load(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Session configuration before command line overrides
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            trials: self.runner.trials,
            warmup: self.runner.warmup,
            repeat: self.runner.repeat,
            max_samples_in_memory: self.runner.max_samples_in_memory,
            seed: self.runner.seed,
            progress: self.runner.progress,
            format: self.output.format,
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# RoundBench Configuration

[runner]
# Measured rounds; every block runs once per round
trials = 100
# Warm-up rounds before measurement (timings discarded)
warmup = 100
# Task invocations per timed call; statistics are divided back per call
repeat = 1
# Raw samples kept per block for the median (half oldest, half newest)
max_samples_in_memory = 10000
# Fixed seed for the round order (uncomment for reproducible ordering)
# seed = 42
# Show a progress bar on stderr
progress = false

[output]
# Report format: human or json
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "target/roundbench/report.txt"
"#
        .to_string()
    }
}
