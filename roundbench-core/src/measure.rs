//! High-Precision Timing
//!
//! Wall-clock timing on the monotonic clock (`std::time::Instant`), which is
//! unaffected by system time adjustments and never yields negative deltas.

use std::time::Instant;

/// Timer for measuring a single timed call
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed nanoseconds since [`start`](Self::start)
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}
