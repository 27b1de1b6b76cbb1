//! Session Errors

use std::fmt;
use thiserror::Error;

/// Error produced by a benchmarked task
pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which kind of round a call belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Timing discarded
    WarmUp,
    /// Timing fed to statistics
    Measurement,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::WarmUp => f.write_str("warm-up"),
            Phase::Measurement => f.write_str("measurement"),
        }
    }
}

/// Errors that abort a benchmark session
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// A registered task returned an error. The session stops at the first one.
    #[error("block '{label}' failed during {phase} call {call_index}: {source}")]
    Task {
        /// Label of the failing block
        label: String,
        /// Round kind the call belonged to
        phase: Phase,
        /// Call index within that phase (0-based)
        call_index: u64,
        /// Error returned by the task
        #[source]
        source: TaskError,
    },

    /// Configuration rejected before any call ran
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `execute` or `run` was called with no registered block
    #[error("no blocks registered")]
    NoBlocks,

    /// A block finished the session without a single measured call
    #[error("block '{0}' has no measured calls")]
    NoMeasurements(String),

    /// The report could not be serialized
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    /// The output sink rejected the report
    #[error("failed to write report: {0}")]
    Sink(#[from] std::io::Error),
}
