#![warn(missing_docs)]
//! RoundBench CLI Library
//!
//! Command line front end for benchmark binaries. Register blocks inside the
//! closure passed to [`run`]; the CLI layers `roundbench.toml` and flags onto
//! the session configuration, applies the label filter, and writes the report.
//!
//! # Example
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     let input: Vec<u64> = (0..1_000).collect();
//!
//!     roundbench_cli::run(|runner| {
//!         runner.add_block("sum", |_| input.iter().sum::<u64>());
//!         runner.add_block("max", |_| input.iter().max().copied());
//!     })
//! }
//! ```

mod config;

pub use config::*;

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use roundbench_core::{BenchmarkRunner, RunnerConfig};
use roundbench_report::{FileSink, OutputFormat, Report};
use std::io::Write;
use std::path::PathBuf;

/// RoundBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "roundbench")]
#[command(author, version, about = "RoundBench - round-robin micro-benchmark harness")]
pub struct Cli {
    /// Optional subcommand; defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter blocks by regex pattern on their label
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Measured rounds
    #[arg(short, long)]
    pub trials: Option<u64>,

    /// Warm-up rounds
    #[arg(short, long)]
    pub warmup: Option<u64>,

    /// Task invocations per timed call
    #[arg(short, long)]
    pub repeat: Option<u64>,

    /// Seed for the round order shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Raw samples kept per block for the median
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List registered blocks that match the filter
    List,
    /// Run the session (default)
    Run,
    /// Write a default roundbench.toml in the current directory
    Init,
}

/// Run the RoundBench CLI with process arguments.
///
/// `setup` registers blocks on the runner. This is the main entry point for
/// benchmark binaries.
pub fn run<'a>(setup: impl FnOnce(&mut BenchmarkRunner<'a>)) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, setup)
}

/// Run the RoundBench CLI with pre-parsed arguments.
pub fn run_with_cli<'a>(
    cli: Cli,
    setup: impl FnOnce(&mut BenchmarkRunner<'a>),
) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if cli.command == Some(Commands::Init) {
        return write_default_config();
    }

    // Discover roundbench.toml (CLI flags override)
    let file = RoundConfig::discover()?.unwrap_or_default();

    match cli.command {
        Some(Commands::List) => {
            let runner = prepare_runner(&cli, &file, setup)?;
            let stdout = std::io::stdout();
            write_plan(&mut stdout.lock(), &runner.labels())?;
        }
        _ => {
            let report = run_session(&cli, &file, setup)?;
            if let Some(fastest) = &report.summary.fastest {
                tracing::info!(fastest = %fastest, blocks = report.blocks.len(), "Done");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "roundbench=debug"
    } else {
        "roundbench=info"
    };
    // A subscriber may already be installed by the host binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn write_default_config() -> anyhow::Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(&path, RoundConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Build the session configuration by layering: defaults → roundbench.toml → CLI flags.
pub fn resolve_config(cli: &Cli, file: &RoundConfig) -> RunnerConfig {
    let mut config = file.runner_config();

    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(warmup) = cli.warmup {
        config.warmup = warmup;
    }
    if let Some(repeat) = cli.repeat {
        config.repeat = repeat;
    }
    if let Some(max_samples) = cli.max_samples {
        config.max_samples_in_memory = max_samples;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.progress |= cli.progress;

    config
}

/// Report destination: `--output` wins over `[output] path`
pub fn resolve_output(cli: &Cli, file: &RoundConfig) -> Option<PathBuf> {
    cli.output.clone().or_else(|| file.output.path.clone())
}

/// Compile the positional label filter
pub fn build_filter(pattern: &str) -> anyhow::Result<Regex> {
    Regex::new(pattern).with_context(|| format!("invalid filter pattern '{}'", pattern))
}

/// Create the runner, register blocks through `setup`, and drop blocks the
/// filter rejects.
pub fn prepare_runner<'a>(
    cli: &Cli,
    file: &RoundConfig,
    setup: impl FnOnce(&mut BenchmarkRunner<'a>),
) -> anyhow::Result<BenchmarkRunner<'a>> {
    let filter = build_filter(&cli.filter)?;
    let mut runner = BenchmarkRunner::new(resolve_config(cli, file));
    setup(&mut runner);

    let registered = runner.len();
    runner.retain_blocks(|label| filter.is_match(label));
    tracing::debug!(
        registered,
        selected = runner.len(),
        filter = %cli.filter,
        "Applied label filter"
    );

    Ok(runner)
}

/// Run a filtered session and write its report to the configured destination.
pub fn run_session<'a>(
    cli: &Cli,
    file: &RoundConfig,
    setup: impl FnOnce(&mut BenchmarkRunner<'a>),
) -> anyhow::Result<Report> {
    let runner = prepare_runner(cli, file, setup)?;
    if runner.is_empty() {
        anyhow::bail!("no blocks match filter '{}'", cli.filter);
    }

    let runner = match resolve_output(cli, file) {
        Some(path) => {
            let sink = FileSink::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            tracing::info!(path = %path.display(), "Writing report");
            runner.with_sink(sink)
        }
        None => runner,
    };

    let report = runner.run()?;
    Ok(report)
}

/// Print the block plan
pub fn write_plan(out: &mut impl Write, labels: &[&str]) -> std::io::Result<()> {
    writeln!(out, "RoundBench Plan:")?;
    for label in labels {
        writeln!(out, "├── {}", label)?;
    }
    writeln!(out, "{} blocks found.", labels.len())
}
