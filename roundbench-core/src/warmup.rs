//! Warm-Up Diagnostics
//!
//! Keeps a small, logarithmically thinned record of warm-up calls for human
//! display. Calls 0, 1 and 2 are always recorded; after that every 10th call
//! below 100, every 100th below 1,000, and so on up to every 10^8th call.
//! The record never feeds statistics.

use roundbench_report::WarmupEntry;

/// Most entries kept in a warm-up log
pub const MAX_WARMUP_LOG_ENTRIES: usize = 100;

/// Calls below this index are always recorded
const ALWAYS_LOGGED: u64 = 3;

/// Coarsest recording step
const MAX_LOG_STEP: u64 = 100_000_000;

/// Whether warm-up call `index` is selected for the log
pub fn should_log_warmup(index: u64) -> bool {
    if index < ALWAYS_LOGGED {
        return true;
    }

    let mut step = 10;
    while step < MAX_LOG_STEP && index >= step * 10 {
        step *= 10;
    }
    index % step == 0
}

/// Capped list of sampled warm-up calls
#[derive(Debug, Clone, Default)]
pub struct WarmupLog {
    entries: Vec<WarmupEntry>,
}

impl WarmupLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether call `index` would be recorded
    pub fn wants(&self, index: u64) -> bool {
        self.entries.len() < MAX_WARMUP_LOG_ENTRIES && should_log_warmup(index)
    }

    /// Record a call if the sampling policy selects it
    pub fn record(&mut self, entry: WarmupEntry) {
        if self.wants(entry.index) {
            self.entries.push(entry);
        }
    }

    /// Recorded entries, in call order
    pub fn entries(&self) -> &[WarmupEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_below(limit: u64) -> Vec<u64> {
        (0..limit).filter(|&i| should_log_warmup(i)).collect()
    }

    #[test]
    fn test_first_three_always_logged() {
        assert_eq!(logged_below(10), vec![0, 1, 2]);
    }

    #[test]
    fn test_decades() {
        assert_eq!(
            logged_below(100),
            vec![0, 1, 2, 10, 20, 30, 40, 50, 60, 70, 80, 90]
        );
        assert!(should_log_warmup(300));
        assert!(!should_log_warmup(310));
        assert!(should_log_warmup(7_000));
        assert!(!should_log_warmup(7_100));
    }

    #[test]
    fn test_step_caps_at_1e8() {
        assert!(should_log_warmup(3_000_000_000));
        assert!(should_log_warmup(1_200_000_000));
        assert!(!should_log_warmup(1_250_000_000));
    }

    #[test]
    fn test_log_is_capped() {
        let mut log = WarmupLog::new();
        // Multiples of 10^8 are always selected
        for i in 0..200u64 {
            log.record(WarmupEntry {
                index: i * MAX_LOG_STEP,
                elapsed_ns: 1,
                repeat: 1,
                result: None,
            });
        }
        assert_eq!(log.len(), MAX_WARMUP_LOG_ENTRIES);
        assert!(!log.wants(0));
    }

    #[test]
    fn test_record_skips_unselected() {
        let mut log = WarmupLog::new();
        log.record(WarmupEntry {
            index: 11,
            elapsed_ns: 5,
            repeat: 1,
            result: None,
        });
        assert!(log.is_empty());
    }
}
