//! System Metadata Collection
//!
//! Collects the host details recorded next to every report. Linux-specific
//! data (CPU model) degrades to "Unknown" on other platforms.

use crate::report::{ReportConfig, ReportMeta, SystemInfo};
use crate::SCHEMA_VERSION;
use chrono::Utc;

/// Build report metadata for a session run with `config`
pub fn build_report_meta(config: ReportConfig) -> ReportMeta {
    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system: host_info(),
        config,
    }
}

fn host_info() -> SystemInfo {
    SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: read_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: std::thread::available_parallelism().map_or(1, |n| n.get() as u32),
    }
}

#[cfg(target_os = "linux")]
fn read_cpu_model() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    cpu_model_from_cpuinfo(&cpuinfo)
}

#[cfg(not(target_os = "linux"))]
fn read_cpu_model() -> Option<String> {
    None
}

/// First non-empty `model name` value in `/proc/cpuinfo` text
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn cpu_model_from_cpuinfo(cpuinfo: &str) -> Option<String> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let value = value.trim();
        (key.trim() == "model name" && !value.is_empty()).then(|| value.to_string())
    })
}
