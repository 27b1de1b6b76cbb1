//! Timed Block
//!
//! Wraps one user task and owns everything measured about it:
//! - Warm-up calls: timed for the diagnostic log only
//! - Measured calls: timed, summed into total time and fed to
//!   [`RunningStatistics`]
//! - Repeat multiplier: one timed call may run the task several times, and
//!   every derived statistic is divided back to a per-iteration value
//!
//! ```text
//! Created ──warm-up call──▶ WarmingUp ──measured call──▶ Measuring ──finish──▶ Finalized
//!    └────────────────────measured call─────────────────────▲
//! ```
//!
//! The runner drives every transition; a block never loops on its own.

use crate::error::{Phase, RunError, TaskError};
use crate::measure::Timer;
use crate::warmup::WarmupLog;
use roundbench_report::{BlockMetrics, BlockReport, WarmupEntry};
use roundbench_stats::RunningStatistics;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

/// Lifecycle of a block within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPhase {
    /// Registered, nothing run yet
    Created,
    /// At least one warm-up call ran
    WarmingUp,
    /// At least one measured call ran
    Measuring,
    /// Session over; read-only
    Finalized,
}

/// Outcome of one timed call
pub(crate) struct Invocation {
    pub elapsed_ns: u64,
    pub result: Option<String>,
}

/// Type-erased task with the timing loop monomorphized inside
pub(crate) trait Workload {
    /// Run one timed call covering `repeat` task invocations.
    ///
    /// The returned value is rendered with `Debug` only when `render` is set,
    /// after the clock stopped.
    fn invoke(&mut self, index: u64, repeat: u64, render: bool) -> Result<Invocation, TaskError>;
}

struct FnWorkload<F, T, E> {
    task: F,
    _marker: PhantomData<fn() -> Result<T, E>>,
}

impl<F, T, E> FnWorkload<F, T, E>
where
    F: FnMut(u64) -> Result<T, E>,
{
    /// Invocations `index*(repeat-1)+1 ..= index*(repeat-1)+repeat`; returns
    /// the last value or the first error.
    #[inline]
    fn run_repeated(&mut self, index: u64, repeat: u64) -> Result<T, E> {
        let base = index * (repeat - 1);
        for i in 1..repeat {
            std::hint::black_box((self.task)(base + i)?);
        }
        (self.task)(base + repeat)
    }
}

impl<F, T, E> Workload for FnWorkload<F, T, E>
where
    F: FnMut(u64) -> Result<T, E>,
    T: Debug,
    E: Into<TaskError>,
{
    fn invoke(&mut self, index: u64, repeat: u64, render: bool) -> Result<Invocation, TaskError> {
        let timer = Timer::start();
        let outcome = if repeat > 1 {
            self.run_repeated(index, repeat)
        } else {
            (self.task)(index)
        };
        let elapsed_ns = timer.stop();

        let value = match outcome {
            Ok(value) => std::hint::black_box(value),
            Err(err) => return Err(err.into()),
        };
        let result = render.then(|| format!("{:?}", value));

        Ok(Invocation { elapsed_ns, result })
    }
}

/// One registered task and its measurements
pub struct TimedBlock<'a> {
    label: String,
    workload: Box<dyn Workload + 'a>,
    stats: RunningStatistics,
    total_time_ns: u64,
    warmup_calls: u64,
    measured_calls: u64,
    repeat: u64,
    warmup_log: WarmupLog,
    first_result: Option<String>,
    phase: BlockPhase,
}

impl<'a> TimedBlock<'a> {
    /// Wrap a fallible task.
    ///
    /// `repeat` is the number of task invocations per timed call; values
    /// below 1 are treated as 1.
    pub fn new<F, T, E>(
        label: impl Into<String>,
        task: F,
        repeat: u64,
        max_samples_in_memory: usize,
    ) -> Self
    where
        F: FnMut(u64) -> Result<T, E> + 'a,
        T: Debug + 'a,
        E: Into<TaskError> + 'a,
    {
        Self {
            label: label.into(),
            workload: Box::new(FnWorkload {
                task,
                _marker: PhantomData,
            }),
            stats: RunningStatistics::new(max_samples_in_memory),
            total_time_ns: 0,
            warmup_calls: 0,
            measured_calls: 0,
            repeat: repeat.max(1),
            warmup_log: WarmupLog::new(),
            first_result: None,
            phase: BlockPhase::Created,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> BlockPhase {
        self.phase
    }

    /// Task invocations per timed call
    pub fn repeat(&self) -> u64 {
        self.repeat
    }

    /// Run one warm-up call. Its timing goes to the diagnostic log only.
    pub fn run_warmup_call(&mut self) -> Result<u64, RunError> {
        debug_assert!(self.phase != BlockPhase::Finalized);
        if self.phase == BlockPhase::Created {
            self.phase = BlockPhase::WarmingUp;
        }

        let index = self.warmup_calls;
        let repeat = self.repeat;
        let logged = self.warmup_log.wants(index);
        let render = logged || self.first_result.is_none();

        let invocation = self
            .workload
            .invoke(index, repeat, render)
            .map_err(|source| self.task_error(Phase::WarmUp, index, source))?;
        self.warmup_calls += 1;

        tracing::trace!(
            block = %self.label,
            index,
            elapsed_ns = invocation.elapsed_ns,
            "warm-up call"
        );

        if self.first_result.is_none() {
            self.first_result = invocation.result.clone();
        }
        if logged {
            self.warmup_log.record(WarmupEntry {
                index,
                elapsed_ns: invocation.elapsed_ns,
                repeat,
                result: invocation.result,
            });
        }

        Ok(invocation.elapsed_ns)
    }

    /// Run one measured call and feed its timing to the statistics.
    pub fn run_measured_call(&mut self) -> Result<u64, RunError> {
        debug_assert!(self.phase != BlockPhase::Finalized);
        self.phase = BlockPhase::Measuring;

        let index = self.measured_calls;
        let repeat = self.repeat;
        let render = self.first_result.is_none();

        let invocation = self
            .workload
            .invoke(index, repeat, render)
            .map_err(|source| self.task_error(Phase::Measurement, index, source))?;
        self.measured_calls += 1;

        tracing::trace!(
            block = %self.label,
            index,
            elapsed_ns = invocation.elapsed_ns,
            "measured call"
        );

        self.total_time_ns += invocation.elapsed_ns;
        self.stats.add(invocation.elapsed_ns as f64);
        if self.first_result.is_none() {
            self.first_result = invocation.result;
        }

        Ok(invocation.elapsed_ns)
    }

    /// Mark the block read-only
    pub fn finish(&mut self) {
        self.phase = BlockPhase::Finalized;
    }

    fn task_error(&self, phase: Phase, call_index: u64, source: TaskError) -> RunError {
        RunError::Task {
            label: self.label.clone(),
            phase,
            call_index,
            source,
        }
    }

    /// Timed warm-up calls so far
    pub fn warmup_calls(&self) -> u64 {
        self.warmup_calls
    }

    /// Timed measured calls so far (samples fed to statistics)
    pub fn measured_calls(&self) -> u64 {
        self.measured_calls
    }

    /// Task invocations during measurement
    pub fn measured_iterations(&self) -> u64 {
        self.measured_calls * self.repeat
    }

    /// Task invocations during warm-up
    pub fn warmup_iterations(&self) -> u64 {
        self.warmup_calls * self.repeat
    }

    /// Sum of all measured call durations
    pub fn total_time(&self) -> Duration {
        Duration::from_nanos(self.total_time_ns)
    }

    /// Underlying statistics (per timed call, not divided by repeat)
    pub fn statistics(&self) -> &RunningStatistics {
        &self.stats
    }

    /// Sampled warm-up calls
    pub fn warmup_log(&self) -> &WarmupLog {
        &self.warmup_log
    }

    /// Debug rendering of the first value the task returned
    pub fn first_result(&self) -> Option<&str> {
        self.first_result.as_deref()
    }

    fn per_iteration(&self, nanos: f64) -> f64 {
        nanos / self.repeat as f64
    }

    /// Mean nanoseconds per iteration: total / measured calls / repeat.
    /// `None` before the first measured call.
    pub fn average_ns(&self) -> Option<f64> {
        if self.measured_calls == 0 {
            return None;
        }
        Some(self.per_iteration(
            self.total_time_ns as f64 / self.measured_calls as f64,
        ))
    }

    /// Median nanoseconds per iteration
    pub fn median_ns(&self) -> Option<f64> {
        self.stats.median().map(|m| self.per_iteration(m))
    }

    /// Population standard deviation per iteration, in nanoseconds
    pub fn std_dev_ns(&self) -> Option<f64> {
        if self.stats.is_empty() {
            return None;
        }
        Some(self.per_iteration(self.stats.std_dev()))
    }

    /// Fastest timed call, per iteration
    pub fn min_ns(&self) -> Option<f64> {
        if self.stats.is_empty() {
            return None;
        }
        Some(self.per_iteration(self.stats.min()))
    }

    /// Slowest timed call, per iteration
    pub fn max_ns(&self) -> Option<f64> {
        if self.stats.is_empty() {
            return None;
        }
        Some(self.per_iteration(self.stats.max()))
    }

    /// Mean time per iteration
    pub fn average_time(&self) -> Option<Duration> {
        self.average_ns().map(nanos_to_duration)
    }

    /// Median time per iteration
    pub fn median_time(&self) -> Option<Duration> {
        self.median_ns().map(nanos_to_duration)
    }

    /// Standard deviation per iteration
    pub fn std_dev_time(&self) -> Option<Duration> {
        self.std_dev_ns().map(nanos_to_duration)
    }

    /// Fastest iteration estimate
    pub fn min_time(&self) -> Option<Duration> {
        self.min_ns().map(nanos_to_duration)
    }

    /// Slowest iteration estimate
    pub fn max_time(&self) -> Option<Duration> {
        self.max_ns().map(nanos_to_duration)
    }

    /// Snapshot for the session report. `None` before the first measured call.
    pub fn report(&self) -> Option<BlockReport> {
        let summary = self.stats.summary()?.scaled(self.repeat as f64);

        let mut metrics = BlockMetrics::from(&summary);
        // Exact integer total, not the float running mean
        metrics.mean_ns = self.average_ns().unwrap_or(summary.mean);
        metrics.total_ns = self.total_time_ns;

        Some(BlockReport {
            label: self.label.clone(),
            metrics,
            measured_calls: self.measured_calls,
            measured_iterations: self.measured_iterations(),
            warmup_calls: self.warmup_calls,
            warmup_iterations: self.warmup_iterations(),
            repeat: self.repeat,
            first_result: self.first_result.clone(),
            warmup_log: self.warmup_log.entries().to_vec(),
        })
    }
}

impl Debug for TimedBlock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedBlock")
            .field("label", &self.label)
            .field("phase", &self.phase)
            .field("repeat", &self.repeat)
            .field("warmup_calls", &self.warmup_calls)
            .field("measured_calls", &self.measured_calls)
            .field("total_time_ns", &self.total_time_ns)
            .finish_non_exhaustive()
    }
}

fn nanos_to_duration(nanos: f64) -> Duration {
    Duration::from_secs_f64(nanos.max(0.0) / 1_000_000_000.0)
}
