//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes the session report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{block, report};

    #[test]
    fn test_json_contains_blocks_and_meta() {
        let report = report(vec![block("alpha", 1_500.0)]);
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["blocks"][0]["label"], "alpha");
        assert_eq!(value["blocks"][0]["metrics"]["mean_ns"], 1_500.0);
        assert_eq!(value["meta"]["config"]["trials"], 10);
        assert_eq!(value["summary"]["fastest"], "alpha");
    }

    #[test]
    fn test_json_parses_back() {
        let original = report(vec![block("alpha", 1.0), block("beta", 2.0)]);
        let json = generate_json_report(&original).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.blocks.len(), 2);
        assert_eq!(parsed.blocks[1].warmup_log, original.blocks[1].warmup_log);
    }
}
