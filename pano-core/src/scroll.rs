//! Horizontal marquee scrolling
//!
//! Text enters at the right edge of the panel and moves left by `step`
//! pixels per advance. Once the text has fully left the panel (position
//! below `-text_width`) it restarts at the right edge.

use crate::render::{truncated, PanelGeometry, RenderList, Text, TextMetrics};
use crate::time::Millis;

/// Default pixels moved per advance
pub const DEFAULT_STEP: i16 = 1;

/// Default milliseconds between advances
pub const DEFAULT_INTERVAL_MS: u32 = 100;

/// Default top row of scrolling text
pub const DEFAULT_ROW: i16 = 4;

/// Scrolling text state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    text: Text,
    /// Rendered width of `text` in pixels
    text_width: i16,
    /// Current x of the text's left edge
    position: i16,
    /// Restart position (right edge of the panel)
    origin: i16,
    /// Top row the text is drawn at
    row: i16,
    step: i16,
    interval_ms: u32,
    /// `None` until the first advance after a reset
    last_advance: Option<Millis>,
}

impl ScrollState {
    /// Create a scroller for `text` starting at the right edge of `panel`
    pub fn new(text: &str, metrics: &TextMetrics, panel: &PanelGeometry) -> Self {
        let text: Text = truncated(text);
        Self {
            text_width: metrics.width(&text),
            text,
            position: panel.width,
            origin: panel.width,
            row: DEFAULT_ROW,
            step: DEFAULT_STEP,
            interval_ms: DEFAULT_INTERVAL_MS,
            last_advance: None,
        }
    }

    /// Pixels moved per advance (at least 1)
    pub fn with_step(mut self, step: i16) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn with_interval(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_row(mut self, row: i16) -> Self {
        self.row = row;
        self
    }

    /// Return to the right edge; the next tick renders immediately
    pub fn reset(&mut self) {
        self.position = self.origin;
        self.last_advance = None;
    }

    /// Change the advance interval, keeping the current position
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// True if an advance is due at `now`
    pub fn is_due(&self, now: Millis) -> bool {
        match self.last_advance {
            None => true,
            Some(last) => now.has_elapsed(last, self.interval_ms),
        }
    }

    /// Render and advance if the interval has elapsed
    ///
    /// Draws the text at the current position, then moves it. Returns
    /// true if anything was rendered.
    pub fn tick(&mut self, now: Millis, out: &mut RenderList) -> bool {
        if !self.is_due(now) {
            return false;
        }

        out.clear().text(self.position, self.row, &self.text);
        self.step_left();
        self.last_advance = Some(now);
        true
    }

    /// Move one step left, wrapping once the text is fully off-screen
    pub fn step_left(&mut self) {
        self.position = self.position.saturating_sub(self.step);
        if self.position < -self.text_width {
            self.position = self.origin;
        }
    }

    pub fn position(&self) -> i16 {
        self.position
    }

    pub fn row(&self) -> i16 {
        self.row
    }

    pub fn step(&self) -> i16 {
        self.step
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_width(&self) -> i16 {
        self.text_width
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;

    fn welcome() -> ScrollState {
        ScrollState::new(
            "Welcome",
            &TextMetrics::SYSTEM_5X7,
            &PanelGeometry::from_modules(1, 1),
        )
    }

    #[test]
    fn test_starts_at_right_edge() {
        let scroll = welcome();
        assert_eq!(scroll.position(), 32);
        assert_eq!(scroll.text_width(), 42);
    }

    #[test]
    fn test_first_tick_renders_then_moves() {
        let mut scroll = welcome();
        let mut out = RenderList::new();

        assert!(scroll.tick(Millis::new(5), &mut out));
        assert!(out.starts_with_clear());
        assert_eq!(out.last_text(), Some((32, 4, "Welcome")));
        assert_eq!(scroll.position(), 31);
    }

    #[test]
    fn test_throttled_between_intervals() {
        let mut scroll = welcome().with_interval(100);
        let mut out = RenderList::new();

        assert!(scroll.tick(Millis::new(0), &mut out));
        let mut out = RenderList::new();
        assert!(!scroll.tick(Millis::new(99), &mut out));
        assert!(out.is_empty());
        assert!(scroll.tick(Millis::new(100), &mut out));
    }

    #[test]
    fn test_wraps_after_leaving_panel() {
        let mut scroll = welcome();
        // 32 -> -42 takes 74 steps; one more wraps
        for _ in 0..74 {
            scroll.step_left();
        }
        assert_eq!(scroll.position(), -42);
        scroll.step_left();
        assert_eq!(scroll.position(), 32);
    }

    #[test]
    fn test_larger_step_never_overshoots_by_more_than_one_step() {
        let mut scroll = welcome().with_step(4);
        let mut lowest = i16::MAX;
        for _ in 0..200 {
            scroll.step_left();
            lowest = lowest.min(scroll.position());
        }
        assert!(lowest >= -42);
        assert!(lowest < -42 + 4);
    }

    #[test]
    fn test_reset_returns_to_origin_and_renders_immediately() {
        let mut scroll = welcome().with_interval(500);
        let mut out = RenderList::new();
        scroll.tick(Millis::new(0), &mut out);
        scroll.step_left();
        assert_eq!(scroll.position(), 30);

        scroll.reset();
        let mut out = RenderList::new();
        assert!(scroll.tick(Millis::new(10), &mut out));
        assert_eq!(
            out.as_slice()[1],
            RenderCommand::Text {
                x: 32,
                y: 4,
                text: truncated("Welcome"),
            }
        );
    }
}
