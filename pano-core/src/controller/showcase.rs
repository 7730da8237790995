//! Timer-driven controller (showcase variant)
//!
//! Every dwell boundary runs the current outer mode's action and counts
//! one cycle. After the configured number of cycles the outer mode moves
//! on and the animation of the mode being left stops:
//!
//! - static rotation draws the next canned string, centered
//! - scroll starts the marquee at the right edge if it is not running
//! - clock draws the run time on the scroll row, centered even when wider
//!   than the panel, then keeps redrawing once per second

use heapless::String;

use crate::clock::ClockTime;
use crate::config::{PanelConfig, ShowcaseConfig, MAX_LABEL_LEN};
use crate::diagnostics::StatusReport;
use crate::mode::ShowcaseMode;
use crate::render::{PanelGeometry, RenderList, TextMetrics};
use crate::rotation::RotationState;
use crate::scroll::ScrollState;
use crate::time::Millis;

/// Controller state for the showcase variant
#[derive(Debug, Clone)]
pub struct ShowcaseController {
    mode: ShowcaseMode,
    rotation: RotationState,
    scroll: ScrollState,
    scrolling: bool,
    /// Run-time second last drawn by the clock, while the clock is running
    clock_second: Option<u32>,
    geometry: PanelGeometry,
    metrics: TextMetrics,
    splash_text: String<MAX_LABEL_LEN>,
    brightness: u8,
}

impl ShowcaseController {
    /// Create the controller; the first dwell interval starts at `start`
    pub fn new(panel: &PanelConfig, showcase: &ShowcaseConfig, start: Millis) -> Self {
        let geometry = panel.geometry();
        let metrics = panel.metrics();
        let scroll = ScrollState::new(&showcase.scroll_text, &metrics, &geometry)
            .with_step(i16::from(showcase.scroll_step))
            .with_interval(showcase.scroll_interval_ms);

        Self {
            mode: ShowcaseMode::default(),
            rotation: RotationState::new(
                showcase.playlist.clone(),
                showcase.dwell_ms,
                showcase.cycles_per_mode,
                start,
            ),
            scroll,
            scrolling: false,
            clock_second: None,
            geometry,
            metrics,
            splash_text: showcase.splash_text.clone(),
            brightness: panel.brightness,
        }
    }

    /// Boot frame: brightness, then the splash text in the top-left corner
    pub fn splash(&self) -> RenderList {
        let mut out = RenderList::new();
        out.brightness(self.brightness)
            .clear()
            .text(0, 0, &self.splash_text);
        out
    }

    /// Advance one scheduler tick
    pub fn tick(&mut self, now: Millis) -> RenderList {
        let mut out = RenderList::new();

        if self.rotation.dwell_elapsed(now) {
            self.on_dwell(now, &mut out);
            if self.rotation.complete_cycle() {
                self.advance_mode();
            }
        }

        if self.scrolling {
            if out.is_empty() {
                self.scroll.tick(now, &mut out);
            }
        } else if let Some(last) = self.clock_second {
            if now.as_secs() != last {
                self.draw_clock(now, &mut out);
            }
        }

        out
    }

    fn on_dwell(&mut self, now: Millis, out: &mut RenderList) {
        match self.mode {
            ShowcaseMode::StaticRotation => {
                if let Some(entry) = self.rotation.next_entry() {
                    let (x, y) = self.geometry.centered(&self.metrics, entry);
                    out.clear().text(x, y, entry);
                }
            }
            ShowcaseMode::Scroll => {
                if !self.scrolling {
                    self.scrolling = true;
                    self.scroll.reset();
                    out.clear();
                }
            }
            ShowcaseMode::ClockSimulation => self.draw_clock(now, out),
        }
    }

    fn draw_clock(&mut self, now: Millis, out: &mut RenderList) {
        let text = ClockTime::from_uptime(now).to_text();
        let x = self.geometry.centered_x(&self.metrics, &text);
        out.clear().text(x, self.scroll.row(), &text);
        self.clock_second = Some(now.as_secs());
    }

    fn advance_mode(&mut self) {
        self.mode = self.mode.next();
        self.scrolling = false;
        self.clock_second = None;
        self.scroll.reset();
    }

    pub fn mode(&self) -> ShowcaseMode {
        self.mode
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Status line for the content in view
    pub fn status(&self, now: Millis) -> StatusReport {
        match self.mode {
            ShowcaseMode::StaticRotation => {
                StatusReport::new(self.mode.label(), self.rotation.last_shown().unwrap_or(""))
            }
            ShowcaseMode::Scroll => StatusReport::new(self.mode.label(), self.scroll.text()),
            ShowcaseMode::ClockSimulation => StatusReport {
                mode: self.mode.label(),
                text: ClockTime::from_uptime(now).to_text(),
            },
        }
    }
}
