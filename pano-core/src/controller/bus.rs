//! Register-driven controller (bus variant)
//!
//! Re-reads the register snapshot every tick. A change of the raw mode
//! register is a mode entry: entering welcome mode restarts the scroll at
//! the right edge before anything is drawn. Unrecognized mode values show
//! the fallback frame, which then stays on the panel for the whole hold
//! period whatever the registers say. Nothing reaches the welcome scroll
//! while the mode is unrecognized, not even the interval register.

use heapless::String;

use crate::clock::{format_time, with_unit, TimeStyle};
use crate::config::{BusConfig, PanelConfig, MAX_LABEL_LEN, MAX_UNIT_LEN};
use crate::diagnostics::StatusReport;
use crate::mode::BusMode;
use crate::registers::{RegisterSnapshot, REG_SCROLL_INTERVAL};
use crate::render::{truncated, RenderList, Text};
use crate::scroll::{ScrollState, DEFAULT_INTERVAL_MS};
use crate::time::Millis;

/// Shortest accepted scroll interval
pub const SCROLL_INTERVAL_MIN_MS: u16 = 50;
/// Longest accepted scroll interval
pub const SCROLL_INTERVAL_MAX_MS: u16 = 500;

/// Status label for unrecognized mode values
const FALLBACK_LABEL: &str = "unknown";

/// Controller state for the bus variant
#[derive(Debug, Clone)]
pub struct BusController {
    welcome: ScrollState,
    anchor: (i16, i16),
    price_unit: String<MAX_UNIT_LEN>,
    time_unit: String<MAX_UNIT_LEN>,
    time_style: TimeStyle,
    fallback_text: String<MAX_LABEL_LEN>,
    fallback_hold_ms: u32,
    /// Raw mode register seen on the previous tick
    last_mode: Option<u16>,
    /// When the fallback frame was last drawn
    fallback_drawn: Option<Millis>,
    /// Label and text of the content in view
    label: &'static str,
    shown: Text,
}

impl BusController {
    pub fn new(panel: &PanelConfig, bus: &BusConfig) -> Self {
        let interval = bus.initial_registers[usize::from(REG_SCROLL_INTERVAL)];
        let welcome = ScrollState::new(&bus.welcome_text, &panel.metrics(), &panel.geometry())
            .with_step(i16::from(bus.scroll_step))
            .with_row(bus.scroll_row)
            .with_interval(accepted_interval(interval).unwrap_or(DEFAULT_INTERVAL_MS));

        Self {
            welcome,
            anchor: (bus.anchor_x, bus.anchor_y),
            price_unit: bus.price_unit.clone(),
            time_unit: bus.time_unit.clone(),
            time_style: bus.time_style,
            fallback_text: bus.fallback_text.clone(),
            fallback_hold_ms: bus.fallback_hold_ms,
            last_mode: None,
            fallback_drawn: None,
            label: BusMode::Off.label(),
            shown: Text::new(),
        }
    }

    /// Advance one scheduler tick
    pub fn tick(&mut self, now: Millis, registers: &RegisterSnapshot) -> RenderList {
        let mut out = RenderList::new();

        // Mode changes during the hold are picked up once it expires
        if self.holding_fallback(now) {
            return out;
        }

        let mode = BusMode::from_register(registers.mode);
        if mode.is_some() {
            self.apply_interval(registers.scroll_interval);
        }

        if self.last_mode != Some(registers.mode) {
            self.last_mode = Some(registers.mode);
            self.fallback_drawn = None;
            if mode == Some(BusMode::WelcomeScroll) {
                self.welcome.reset();
            }
        }

        match mode {
            Some(BusMode::Off) => {
                out.clear();
                self.show(BusMode::Off.label(), "");
            }
            Some(BusMode::WelcomeScroll) => {
                self.welcome.tick(now, &mut out);
                self.label = BusMode::WelcomeScroll.label();
                self.shown = truncated(self.welcome.text());
            }
            Some(BusMode::PriceDisplay) => {
                let text = with_unit(registers.price, &self.price_unit);
                self.draw_at_anchor(&mut out, BusMode::PriceDisplay.label(), &text);
            }
            Some(BusMode::TimeDisplay) => {
                let text = format_time(registers.time, &self.time_unit, self.time_style);
                self.draw_at_anchor(&mut out, BusMode::TimeDisplay.label(), &text);
            }
            None => self.fallback(now, &mut out),
        }

        out
    }

    /// Adopt the interval register if it is within range
    fn apply_interval(&mut self, raw: u16) {
        if let Some(interval) = accepted_interval(raw) {
            self.welcome.set_interval(interval);
        }
    }

    /// True while the last fallback frame must stay in view
    fn holding_fallback(&self, now: Millis) -> bool {
        self.fallback_drawn
            .is_some_and(|drawn| !now.has_elapsed(drawn, self.fallback_hold_ms))
    }

    fn draw_at_anchor(&mut self, out: &mut RenderList, label: &'static str, text: &str) {
        out.clear().text(self.anchor.0, self.anchor.1, text);
        self.show(label, text);
    }

    fn fallback(&mut self, now: Millis, out: &mut RenderList) {
        out.clear().text(self.anchor.0, self.anchor.1, &self.fallback_text);
        self.fallback_drawn = Some(now);
        self.label = FALLBACK_LABEL;
        self.shown = truncated(&self.fallback_text);
    }

    fn show(&mut self, label: &'static str, text: &str) {
        self.label = label;
        self.shown = truncated(text);
    }

    /// Scroll interval currently in effect
    pub fn scroll_interval_ms(&self) -> u32 {
        self.welcome.interval_ms()
    }

    pub fn welcome(&self) -> &ScrollState {
        &self.welcome
    }

    pub fn status(&self) -> StatusReport {
        StatusReport::new(self.label, &self.shown)
    }
}

/// `raw` as a scroll interval, if it is within the accepted range
fn accepted_interval(raw: u16) -> Option<u32> {
    (SCROLL_INTERVAL_MIN_MS..=SCROLL_INTERVAL_MAX_MS)
        .contains(&raw)
        .then_some(u32::from(raw))
}
