#![warn(missing_docs)]
//! RoundBench Report - Reporting and Output
//!
//! Turns session results into text and delivers it:
//! - Report data model (serializable)
//! - Human-readable terminal rendering
//! - JSON (machine-readable)
//! - Output sinks (stdout, file, in-memory)

mod human;
mod json;
mod meta;
mod report;
mod sink;

pub use human::{format_duration, format_human_output};
pub use json::generate_json_report;
pub use meta::build_report_meta;
pub use report::{
    BlockMetrics, BlockReport, Report, ReportConfig, ReportMeta, ReportSummary, SystemInfo,
    WarmupEntry,
};
pub use sink::{FileSink, MemorySink, OutputSink, StdoutSink};

/// Version of the serialized report layout
pub const SCHEMA_VERSION: u32 = 1;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Render `report` in this format
    pub fn render(self, report: &Report) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Human => Ok(format_human_output(report)),
            OutputFormat::Json => generate_json_report(report),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_format_is_human() {
        assert_eq!(OutputFormat::default(), OutputFormat::Human);
    }
}
