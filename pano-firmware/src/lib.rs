//! Pano - P10 LED sign firmware
//!
//! Shared pieces of the two firmware binaries for RP2040-based sign
//! controllers:
//!
//! - `pano-bus`: display mode and values set through holding registers
//!   over RS-485
//! - `pano-showcase`: standalone rotation of canned content on a timer
//!
//! Both run a single cooperative loop that ticks a `pano-core` controller
//! and forwards the resulting render commands to the panel module over
//! the panel link.

#![no_std]

pub mod channels;
pub mod config;
pub mod panel_link;
pub mod rs485;
pub mod tasks;

use embassy_time::Instant;
use pano_core::Millis;

/// Milliseconds since boot, wrapping
pub fn now() -> Millis {
    Millis::new(Instant::now().as_millis() as u32)
}
