//! Render adapter for the Pano LED sign
//!
//! This crate provides:
//! - `PanelBackend` trait for anything that can show text on a P10 chain
//! - `present()` to apply one tick's render list to a backend
//! - `TextCanvas`, an in-memory backend for hosts and tests
//!
//! # Architecture
//!
//! Mode controllers in `pano-core` produce a `RenderList` each tick and
//! never touch the panel. The firmware hands that list to `present()`
//! together with its backend:
//!
//! - **Linked panels**: the sign sends clear/text/brightness commands over
//!   UART using `pano-protocol`; a panel module performs scan-out.
//! - **Direct panels**: a board drives the modules itself through its own
//!   `PanelBackend` implementation.

#![no_std]

pub mod backend;
pub mod canvas;

pub use backend::{PanelBackend, PanelError};
pub use canvas::{TextCanvas, TextItem};

use pano_core::render::{RenderCommand, RenderList};

/// Apply a render list to a backend, in order
///
/// Stops at the first backend error; an empty list leaves the panel as is.
pub fn present<B: PanelBackend + ?Sized>(
    backend: &mut B,
    list: &RenderList,
) -> Result<(), PanelError> {
    for command in list {
        match command {
            RenderCommand::Clear => backend.clear()?,
            RenderCommand::Text { x, y, text } => backend.draw_text(*x, *y, text)?,
            RenderCommand::Brightness(level) => backend.set_brightness(*level)?,
        }
    }
    Ok(())
}
