//! Redraw cadence gate
//!
//! Views redraw at most once per interval. The dispatcher calls each view
//! as often as it likes; calls that arrive before the interval has passed
//! are skipped.

/// Default redraw interval (ms)
pub const REDRAW_INTERVAL_MS: u64 = 1000;

/// Coarse per-view redraw timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(REDRAW_INTERVAL_MS)
    }
}

impl Cadence {
    /// Create a cadence that is due immediately
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// True when more than the interval has elapsed since the last mark
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    /// Record a tick at `now_ms`
    pub fn mark(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }

    /// Timestamp of the last marked tick
    pub fn last_ms(&self) -> Option<u64> {
        self.last_ms
    }
}
