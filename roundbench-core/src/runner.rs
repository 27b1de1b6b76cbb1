//! Benchmark Runner
//!
//! Drives a session over every registered block:
//!
//! 1. `warmup` rounds, each calling every block once in a freshly shuffled
//!    order, timings kept only in the warm-up log
//! 2. `trials` rounds, same shuffle rule, timings fed to statistics
//! 3. One report covering every block, in registration order
//!
//! Shuffling every round spreads drift (thermal throttling, frequency
//! scaling, cache state left behind by a neighbour) evenly across blocks.

use crate::block::TimedBlock;
use crate::config::RunnerConfig;
use crate::error::{Phase, RunError, TaskError};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use roundbench_report::{OutputSink, Report, ReportSummary, StdoutSink, build_report_meta};
use std::convert::Infallible;
use std::fmt::Debug;
use std::time::Instant;

/// Runs registered blocks in shuffled rounds and reports on them
pub struct BenchmarkRunner<'a, R = StdRng> {
    config: RunnerConfig,
    blocks: Vec<TimedBlock<'a>>,
    rng: R,
    sink: Box<dyn OutputSink + 'a>,
}

impl<'a> BenchmarkRunner<'a, StdRng> {
    /// Runner shuffling with a generator seeded from `config.seed`, or from
    /// OS entropy when no seed is set
    pub fn new(config: RunnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<'a, R: RngCore> BenchmarkRunner<'a, R> {
    /// Runner shuffling with a caller-supplied generator.
    ///
    /// `config.seed` is then only recorded in the report.
    pub fn with_rng(config: RunnerConfig, rng: R) -> Self {
        Self {
            config,
            blocks: Vec::new(),
            rng,
            sink: Box::new(StdoutSink),
        }
    }

    /// Send the rendered report to `sink` instead of stdout
    pub fn with_sink(mut self, sink: impl OutputSink + 'a) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Session configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Register an infallible task.
    ///
    /// The task receives the call index and its return value is kept for
    /// display via `Debug`.
    pub fn add_block<F, T>(&mut self, label: impl Into<String>, mut task: F) -> &mut Self
    where
        F: FnMut(u64) -> T + 'a,
        T: Debug + 'a,
    {
        self.add_fallible_block(label, move |index| Ok::<T, Infallible>(task(index)))
    }

    /// Register a task that may fail. The first error aborts the session.
    pub fn add_fallible_block<F, T, E>(&mut self, label: impl Into<String>, task: F) -> &mut Self
    where
        F: FnMut(u64) -> Result<T, E> + 'a,
        T: Debug + 'a,
        E: Into<TaskError> + 'a,
    {
        self.blocks.push(TimedBlock::new(
            label,
            task,
            self.config.repeat,
            self.config.max_samples_in_memory,
        ));
        self
    }

    /// Keep only blocks whose label satisfies `keep`
    pub fn retain_blocks(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.blocks.retain(|block| keep(block.label()));
    }

    /// Labels in registration order
    pub fn labels(&self) -> Vec<&str> {
        self.blocks.iter().map(TimedBlock::label).collect()
    }

    /// Registered blocks
    pub fn blocks(&self) -> &[TimedBlock<'a>] {
        &self.blocks
    }

    /// Number of registered blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block is registered
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Run the session and return the report without writing it anywhere.
    pub fn execute(mut self) -> Result<Report, RunError> {
        self.measure()
    }

    /// Run the session, write the rendered report to the sink and close it.
    ///
    /// If any task fails, the sink is left untouched.
    pub fn run(mut self) -> Result<Report, RunError> {
        let report = self.measure()?;
        let rendered = self.config.format.render(&report)?;

        self.sink.println(rendered.trim_end_matches('\n'))?;
        self.sink.close()?;

        Ok(report)
    }

    fn measure(&mut self) -> Result<Report, RunError> {
        self.config.validate()?;
        if self.blocks.is_empty() {
            return Err(RunError::NoBlocks);
        }

        let start = Instant::now();
        let rounds = self.config.warmup + self.config.trials;
        let pb = self.progress_bar(rounds * self.blocks.len() as u64);

        tracing::info!(
            blocks = self.blocks.len(),
            warmup = self.config.warmup,
            trials = self.config.trials,
            repeat = self.config.repeat,
            "Starting benchmark session"
        );

        let mut order: Vec<usize> = (0..self.blocks.len()).collect();

        for round in 0..self.config.warmup {
            order.shuffle(&mut self.rng);
            tracing::debug!(round, ?order, "warm-up round");
            pb.set_message(format!("warm-up {}/{}", round + 1, self.config.warmup));
            self.run_round(&order, Phase::WarmUp, &pb)?;
        }

        for round in 0..self.config.trials {
            order.shuffle(&mut self.rng);
            tracing::debug!(round, ?order, "measured round");
            pb.set_message(format!("trial {}/{}", round + 1, self.config.trials));
            self.run_round(&order, Phase::Measurement, &pb)?;
        }

        pb.finish_with_message("Complete");

        let mut blocks = Vec::with_capacity(self.blocks.len());
        for block in &mut self.blocks {
            block.finish();
            let report = block
                .report()
                .ok_or_else(|| RunError::NoMeasurements(block.label().to_string()))?;
            blocks.push(report);
        }

        let total_duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        let summary = ReportSummary::from_blocks(&blocks, total_duration_ms);

        tracing::info!(
            duration_ms = total_duration_ms,
            fastest = summary.fastest.as_deref().unwrap_or("-"),
            "Benchmark session complete"
        );

        Ok(Report {
            meta: build_report_meta(self.config.report_config()),
            blocks,
            summary,
        })
    }

    fn run_round(
        &mut self,
        order: &[usize],
        phase: Phase,
        pb: &ProgressBar,
    ) -> Result<(), RunError> {
        for &index in order {
            let block = &mut self.blocks[index];
            let outcome = match phase {
                Phase::WarmUp => block.run_warmup_call(),
                Phase::Measurement => block.run_measured_call(),
            };
            if let Err(err) = outcome {
                pb.abandon_with_message("Failed");
                tracing::error!(block = block.label(), %phase, "{}", err);
                return Err(err);
            }
            pb.inc(1);
        }
        Ok(())
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

impl<R> Debug for BenchmarkRunner<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkRunner")
            .field("config", &self.config)
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}
