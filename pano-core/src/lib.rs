//! Board-agnostic display-mode scheduler for the P10 LED sign firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware:
//!
//! - Mode controllers for the bus and showcase variants
//! - Scroll, rotation and clock state
//! - The holding register bank behind the bus variant's control surface
//! - Render command lists handed to the panel backend
//! - Wrapping millisecond time and fixed-period cadences
//! - Configuration type definitions
//!
//! Controllers are driven with an explicit timestamp and return the
//! commands for that tick, so every behavior can be tested on the host
//! with synthetic time.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod mode;
pub mod registers;
pub mod render;
pub mod rotation;
pub mod scroll;
pub mod time;

pub use controller::{BusController, ShowcaseController};
pub use render::{RenderCommand, RenderList};
pub use time::Millis;
