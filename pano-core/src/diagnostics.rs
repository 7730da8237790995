//! Periodic status line

use crate::render::{truncated, Text};
use crate::time::{Cadence, Millis};

/// Default interval between status lines
pub const DEFAULT_STATUS_INTERVAL_MS: u32 = 5000;

/// What the panel is showing right now
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Short label of the active mode
    pub mode: &'static str,
    /// Text currently in view (empty when blank)
    pub text: Text,
}

impl StatusReport {
    pub fn new(mode: &'static str, text: &str) -> Self {
        Self {
            mode,
            text: truncated(text),
        }
    }
}

/// Emits a status report once per interval
#[derive(Debug, Clone, Copy)]
pub struct StatusReporter {
    cadence: Cadence,
}

impl StatusReporter {
    pub const fn new(interval_ms: u32, start: Millis) -> Self {
        Self {
            cadence: Cadence::new(interval_ms, start),
        }
    }

    /// Build a report if the interval has elapsed
    pub fn poll(&mut self, now: Millis, report: impl FnOnce() -> StatusReport) -> Option<StatusReport> {
        if self.cadence.poll(now) {
            Some(report())
        } else {
            None
        }
    }
}
