//! Wrapping millisecond timestamps
//!
//! The firmware clock is a `u32` millisecond counter since boot that wraps
//! after roughly 49.7 days. Every comparison goes through a wrapping
//! subtraction so throttles keep working across the wrap.

/// Milliseconds since boot, modulo 2^32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(u32);

impl Millis {
    /// Boot instant
    pub const ZERO: Millis = Millis(0);

    pub const fn new(ms: u32) -> Self {
        Self(ms)
    }

    /// Milliseconds from `earlier` to `self`, correct across one wrap
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// True once at least `interval_ms` has passed since `since`
    pub const fn has_elapsed(self, since: Millis, interval_ms: u32) -> bool {
        self.elapsed_since(since) >= interval_ms
    }

    /// Timestamp `ms` later, wrapping
    pub const fn add_ms(self, ms: u32) -> Millis {
        Millis(self.0.wrapping_add(ms))
    }

    /// Whole seconds since boot
    pub const fn as_secs(self) -> u32 {
        self.0 / 1000
    }
}

/// Fixed-period throttle
///
/// Fires when `interval_ms` has elapsed since the last time it fired. The
/// next period is measured from the instant it actually fired, so a late
/// poll delays every following period by the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence {
    interval_ms: u32,
    last: Millis,
}

impl Cadence {
    /// Create a cadence whose first period starts at `start`
    pub const fn new(interval_ms: u32, start: Millis) -> Self {
        Self {
            interval_ms,
            last: start,
        }
    }

    /// Check whether the period has elapsed; if so, restart it at `now`
    pub fn poll(&mut self, now: Millis) -> bool {
        if now.has_elapsed(self.last, self.interval_ms) {
            self.last = now;
            true
        } else {
            false
        }
    }

    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}
