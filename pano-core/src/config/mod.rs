//! Configuration types
//!
//! Board-agnostic configuration structures stored as postcard binary data.

pub mod types;

pub use types::*;

use crate::controller::bus::{SCROLL_INTERVAL_MAX_MS, SCROLL_INTERVAL_MIN_MS};
use crate::registers::REG_SCROLL_INTERVAL;

/// Most modules chained in either direction
pub const MAX_PANELS_WIDE: u8 = 8;
pub const MAX_PANELS_HIGH: u8 = 4;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Panel count is zero or beyond the supported chain length
    InvalidPanelCount,
    /// Glyph advance or height is zero
    InvalidGlyph,
    /// Tick interval is zero
    InvalidTick,
    /// Baud rate is zero
    InvalidBaudRate,
    /// Unit address is broadcast (0) or reserved (above 247)
    InvalidUnitAddress,
    /// Power-on scroll interval outside 50..=500 ms
    ScrollIntervalOutOfRange,
    /// Scroll step is zero
    InvalidScrollStep,
    /// Showcase playlist has no entries
    EmptyPlaylist,
    /// Dwell, cycle count or scroll interval is zero
    InvalidTiming,
    /// Status line interval is zero
    InvalidStatusInterval,
}

/// Highest usable unit address
pub const MAX_UNIT_ADDRESS: u8 = 247;

impl PanoConfig {
    /// Check every section, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.panel.validate()?;
        self.bus.validate()?;
        self.showcase.validate()?;
        self.status.validate()
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PANELS_WIDE).contains(&self.panels_wide)
            || !(1..=MAX_PANELS_HIGH).contains(&self.panels_high)
        {
            return Err(ConfigError::InvalidPanelCount);
        }
        if self.glyph_advance == 0 || self.glyph_height == 0 {
            return Err(ConfigError::InvalidGlyph);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidTick);
        }
        if self.link_baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }
        Ok(())
    }
}

impl BusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_address == 0 || self.unit_address > MAX_UNIT_ADDRESS {
            return Err(ConfigError::InvalidUnitAddress);
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }
        let interval = self.initial_registers[usize::from(REG_SCROLL_INTERVAL)];
        if !(SCROLL_INTERVAL_MIN_MS..=SCROLL_INTERVAL_MAX_MS).contains(&interval) {
            return Err(ConfigError::ScrollIntervalOutOfRange);
        }
        if self.scroll_step == 0 {
            return Err(ConfigError::InvalidScrollStep);
        }
        Ok(())
    }
}

impl ShowcaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playlist.is_empty() {
            return Err(ConfigError::EmptyPlaylist);
        }
        if self.dwell_ms == 0 || self.cycles_per_mode == 0 || self.scroll_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        if self.scroll_step == 0 {
            return Err(ConfigError::InvalidScrollStep);
        }
        Ok(())
    }
}

impl StatusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::InvalidStatusInterval);
        }
        Ok(())
    }
}
