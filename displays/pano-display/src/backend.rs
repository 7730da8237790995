//! Panel backend trait
//!
//! Defines the interface the firmware renders through. Scan-out, SPI
//! shifting and glyph rasterization all live behind it.

/// Panel backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Communication error with the panel
    Communication,
    /// Command did not fit the backend's buffer
    BufferOverflow,
}

/// Panel backend trait
///
/// Provides a hardware-agnostic interface for rendering to a chain of
/// P10 modules. Coordinates are pixels with the origin in the top-left
/// corner; text may start off-panel on either side and is clipped.
pub trait PanelBackend {
    /// Blank the whole panel
    fn clear(&mut self) -> Result<(), PanelError>;

    /// Draw text with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), PanelError>;

    /// Set output brightness (0-255)
    ///
    /// Backends without dimming accept and ignore it.
    fn set_brightness(&mut self, _level: u8) -> Result<(), PanelError> {
        Ok(())
    }

    /// Panel width in pixels
    fn width(&self) -> i16;

    /// Panel height in pixels
    fn height(&self) -> i16;
}
