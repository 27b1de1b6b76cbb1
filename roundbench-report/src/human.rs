//! Human-Readable Output
//!
//! Terminal-friendly rendering of a session report:
//! - A column-aligned table of every block in registration order, with speed
//!   relative to the fastest
//! - Per-block detail (spread, tail percentiles, call counts)
//! - Sampled warm-up timings and the first observed result
//! - Session summary

use crate::report::{BlockReport, Report};

const RULE_WIDTH: usize = 72;

/// Format a duration given in nanoseconds with an appropriate unit.
///
/// # Examples
///
/// ```
/// # use roundbench_report::format_duration;
/// assert_eq!(format_duration(950.0), "950.00 ns");
/// assert_eq!(format_duration(1_500.0), "1.50 µs");
/// assert_eq!(format_duration(2_000_000.0), "2.00 ms");
/// assert_eq!(format_duration(f64::NAN), "-");
/// ```
pub fn format_duration(nanos: f64) -> String {
    if !nanos.is_finite() {
        return "-".to_string();
    }
    let abs = nanos.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.2} s", nanos / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2} ms", nanos / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2} µs", nanos / 1_000.0)
    } else {
        format!("{:.2} ns", nanos)
    }
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();
    let config = &report.meta.config;

    output.push('\n');
    output.push_str("RoundBench Results\n");
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "trials: {}  warm-up: {}  repeat: {}",
        config.trials, config.warmup, config.repeat
    ));
    if let Some(seed) = config.seed {
        output.push_str(&format!("  seed: {}", seed));
    }
    output.push_str("\n\n");

    push_table(&mut output, &report.blocks);

    for block in &report.blocks {
        push_block_detail(&mut output, block);
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!("  Blocks: {}", report.summary.total_blocks));
    if let Some(fastest) = &report.summary.fastest {
        output.push_str(&format!("  Fastest: {}", fastest));
    }
    output.push('\n');
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

fn push_table(output: &mut String, blocks: &[BlockReport]) {
    let label_width = blocks
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    output.push_str(&format!(
        "  {:<width$}  {:>12}  {:>12}  {:>12}  {:>9}\n",
        "Block",
        "mean",
        "median",
        "stddev",
        "relative",
        width = label_width
    ));
    output.push_str(&format!("  {}\n", "-".repeat(label_width + 55)));

    let fastest_mean = blocks
        .iter()
        .map(|b| b.metrics.mean_ns)
        .filter(|mean| mean.is_finite())
        .fold(f64::INFINITY, f64::min);

    for block in blocks {
        let relative = if fastest_mean.is_finite() && fastest_mean > 0.0 {
            format!("{:.2}x", block.metrics.mean_ns / fastest_mean)
        } else {
            "-".to_string()
        };
        output.push_str(&format!(
            "  {:<width$}  {:>12}  {:>12}  {:>12}  {:>9}\n",
            block.label,
            format_duration(block.metrics.mean_ns),
            format_duration(block.metrics.median_ns),
            format_duration(block.metrics.std_dev_ns),
            relative,
            width = label_width
        ));
    }
    output.push('\n');
}

fn push_block_detail(output: &mut String, block: &BlockReport) {
    let m = &block.metrics;

    output.push_str(&format!("{}\n", block.label));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "      mean: {}  median: {}{}  stddev: {}\n",
        format_duration(m.mean_ns),
        format_duration(m.median_ns),
        if m.median_exact { "" } else { " (approx.)" },
        format_duration(m.std_dev_ns)
    ));
    output.push_str(&format!(
        "      min: {}  max: {}  p90: {}  p99: {}\n",
        format_duration(m.min_ns),
        format_duration(m.max_ns),
        format_duration(m.p90_ns),
        format_duration(m.p99_ns)
    ));
    output.push_str(&format!(
        "      total: {}  calls: {}  warm-up calls: {}",
        format_duration(m.total_ns as f64),
        block.measured_iterations,
        block.warmup_iterations
    ));
    if block.repeat > 1 {
        output.push_str(&format!(
            "  ({} timed x{})",
            block.measured_calls, block.repeat
        ));
    }
    output.push('\n');

    if let Some(result) = &block.first_result {
        output.push_str(&format!("      result: {}\n", result));
    }

    if !block.warmup_log.is_empty() {
        output.push_str("      warm-up:");
        for entry in &block.warmup_log {
            let per_iter = entry.elapsed_ns as f64 / entry.repeat.max(1) as f64;
            output.push_str(&format!(" #{} {}", entry.index, format_duration(per_iter)));
        }
        output.push('\n');
    }

    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{block, report};

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(0.0), "0.00 ns");
        assert_eq!(format_duration(12.345), "12.35 ns");
        assert_eq!(format_duration(1_234.0), "1.23 µs");
        assert_eq!(format_duration(1_234_567.0), "1.23 ms");
        assert_eq!(format_duration(2_500_000_000.0), "2.50 s");
        assert_eq!(format_duration(f64::INFINITY), "-");
    }

    #[test]
    fn test_human_output_keeps_registration_order() {
        let report = report(vec![block("slow", 2_000_000.0), block("fast", 1_000_000.0)]);
        let output = format_human_output(&report);

        let fast_row = output.find("  fast ").unwrap();
        let slow_row = output.find("  slow ").unwrap();
        assert!(slow_row < fast_row);
        assert!(output.contains("2.00x"));
        assert!(output.contains("1.00x"));
        assert!(output.contains("Fastest: fast"));
        assert!(output.contains("seed: 7"));
    }

    #[test]
    fn test_human_output_block_detail() {
        let mut b = block("looped", 500.0);
        b.repeat = 4;
        b.measured_calls = 10;
        b.measured_iterations = 40;
        b.metrics.median_exact = false;
        let output = format_human_output(&report(vec![b]));

        assert!(output.contains("calls: 40"));
        assert!(output.contains("(10 timed x4)"));
        assert!(output.contains("(approx.)"));
        assert!(output.contains("result: 42"));
        assert!(output.contains("warm-up: #0"));
    }

    #[test]
    fn test_columns_align() {
        let report = report(vec![block("a", 10.0), block("much_longer_label", 20.0)]);
        let output = format_human_output(&report);
        let rows: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with("  a ") || l.starts_with("  much_longer_label"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), rows[1].len());
    }
}
