//! Configuration type definitions
//!
//! The board configuration is written as TOML, checked at build time and
//! embedded in the firmware as postcard-serialized binary data. Every
//! section has defaults equal to the documented power-on behavior, so a
//! partial TOML file only needs the values it changes.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::TimeStyle;
use crate::registers::REGISTER_COUNT;
use crate::render::{truncated, PanelGeometry, TextMetrics, MAX_TEXT_LEN};
use crate::rotation::{playlist, Playlist, DEFAULT_CYCLES_PER_MODE, DEFAULT_DWELL_MS};

/// Maximum label length (splash, fallback, welcome texts)
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum unit suffix length
pub const MAX_UNIT_LEN: usize = 8;

/// Panel hardware and loop timing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Modules chained horizontally
    pub panels_wide: u8,
    /// Modules stacked vertically
    pub panels_high: u8,
    /// Horizontal advance per character in pixels
    pub glyph_advance: u8,
    /// Glyph height in pixels
    pub glyph_height: u8,
    /// Output brightness applied at boot (0-255)
    pub brightness: u8,
    /// Delay between scheduler ticks
    pub tick_ms: u32,
    /// Address of the panel module on the panel link
    pub link_address: u8,
    /// Panel link baud rate
    pub link_baud_rate: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            panels_wide: 1,
            panels_high: 1,
            glyph_advance: 6,
            glyph_height: 7,
            brightness: 50,
            tick_ms: 10,
            link_address: 1,
            link_baud_rate: 115_200,
        }
    }
}

impl PanelConfig {
    pub fn geometry(&self) -> PanelGeometry {
        PanelGeometry::from_modules(self.panels_wide, self.panels_high)
    }

    pub fn metrics(&self) -> TextMetrics {
        TextMetrics {
            advance: i16::from(self.glyph_advance),
            glyph_height: i16::from(self.glyph_height),
        }
    }
}

/// Bus variant content and register link
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusConfig {
    /// Unit address on the register link (1-247)
    pub unit_address: u8,
    /// Register link baud rate (8N1)
    pub baud_rate: u32,
    /// Text scrolled in welcome mode
    pub welcome_text: String<MAX_LABEL_LEN>,
    /// Pixels moved per scroll advance
    pub scroll_step: u8,
    /// Top row of the welcome text
    pub scroll_row: i16,
    /// Anchor of price and time text
    pub anchor_x: i16,
    pub anchor_y: i16,
    /// Suffix after the price value
    pub price_unit: String<MAX_UNIT_LEN>,
    /// Suffix after the time value (suffix style only)
    pub time_unit: String<MAX_UNIT_LEN>,
    pub time_style: TimeStyle,
    /// Text shown for an unrecognized mode
    pub fallback_text: String<MAX_LABEL_LEN>,
    /// How long the fallback frame is held before it may redraw
    pub fallback_hold_ms: u32,
    /// Power-on register values: mode, scroll interval, price, time
    pub initial_registers: [u16; REGISTER_COUNT],
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            unit_address: 1,
            baud_rate: 9600,
            welcome_text: truncated("Welcome"),
            scroll_step: 1,
            scroll_row: 4,
            anchor_x: 2,
            anchor_y: 4,
            price_unit: truncated(" TL"),
            time_unit: truncated(" sn"),
            time_style: TimeStyle::Suffix,
            fallback_text: truncated("MODE ERROR"),
            fallback_hold_ms: 1000,
            initial_registers: [1, 100, 1500, 60],
        }
    }
}

/// Showcase variant content and timing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShowcaseConfig {
    /// Canned strings for static rotation
    pub playlist: Playlist,
    /// Text scrolled in scroll mode
    pub scroll_text: String<MAX_TEXT_LEN>,
    pub dwell_ms: u32,
    /// Dwell intervals spent in each outer mode
    pub cycles_per_mode: u8,
    pub scroll_interval_ms: u32,
    pub scroll_step: u8,
    /// Shown once at boot
    pub splash_text: String<MAX_LABEL_LEN>,
    pub splash_ms: u32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            playlist: playlist(&["HELLO", "WORLD!", "RP2040", "P10 LED", "PANEL", "PANO"]),
            scroll_text: truncated("*** P10 LED PANEL *** "),
            dwell_ms: DEFAULT_DWELL_MS,
            cycles_per_mode: DEFAULT_CYCLES_PER_MODE,
            scroll_interval_ms: 100,
            scroll_step: 2,
            splash_text: truncated("STARTING..."),
            splash_ms: 2000,
        }
    }
}

/// Periodic status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusConfig {
    pub interval_ms: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanoConfig {
    pub panel: PanelConfig,
    pub bus: BusConfig,
    pub showcase: ShowcaseConfig,
    pub status: StatusConfig,
}
