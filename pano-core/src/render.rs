//! Render commands and panel geometry
//!
//! Mode controllers never touch pixels. Each tick they return a short
//! [`RenderList`] that the render adapter applies to the panel.

use heapless::{String, Vec};

/// Longest text a controller will render
pub const MAX_TEXT_LEN: usize = 64;

/// Most commands a single tick can produce
pub const MAX_COMMANDS: usize = 4;

/// Owned text for render commands
pub type Text = String<MAX_TEXT_LEN>;

/// Copy `text` into a fixed-capacity string, dropping whatever does not fit
///
/// Cuts on character boundaries, never inside a multi-byte character.
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Glyph metrics of the panel font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextMetrics {
    /// Horizontal advance per character in pixels (glyph + spacing)
    pub advance: i16,
    /// Glyph height in pixels
    pub glyph_height: i16,
}

impl TextMetrics {
    /// 5x7 system font with one column of spacing
    pub const SYSTEM_5X7: TextMetrics = TextMetrics {
        advance: 6,
        glyph_height: 7,
    };

    /// Rendered width of `text` in pixels
    pub fn width(&self, text: &str) -> i16 {
        let chars = text.chars().count().min(i16::MAX as usize) as i16;
        chars.saturating_mul(self.advance)
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::SYSTEM_5X7
    }
}

/// Pixel dimensions of the assembled panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    pub width: i16,
    pub height: i16,
}

impl PanelGeometry {
    /// Width of one P10 module
    pub const MODULE_WIDTH: i16 = 32;
    /// Height of one P10 module
    pub const MODULE_HEIGHT: i16 = 16;

    pub const fn new(width: i16, height: i16) -> Self {
        Self { width, height }
    }

    /// Geometry of `wide` x `high` chained P10 modules
    pub const fn from_modules(wide: u8, high: u8) -> Self {
        Self {
            width: Self::MODULE_WIDTH * wide as i16,
            height: Self::MODULE_HEIGHT * high as i16,
        }
    }

    /// Left edge that centers `text`; negative if the text is wider than the panel
    pub fn centered_x(&self, metrics: &TextMetrics, text: &str) -> i16 {
        (self.width - metrics.width(text)) / 2
    }

    /// Top-left corner that centers `text`, clamped to the panel origin
    pub fn centered(&self, metrics: &TextMetrics, text: &str) -> (i16, i16) {
        let y = (self.height - metrics.glyph_height) / 2;
        (self.centered_x(metrics, text).max(0), y.max(0))
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::from_modules(1, 1)
    }
}

/// A single instruction for the render adapter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderCommand {
    /// Blank the panel
    Clear,
    /// Draw text with its top-left corner at (x, y)
    Text { x: i16, y: i16, text: Text },
    /// Set output brightness
    Brightness(u8),
}

/// Commands produced by one scheduler tick, in order
///
/// An empty list means the panel keeps whatever it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderList {
    commands: Vec<RenderCommand, MAX_COMMANDS>,
}

impl RenderList {
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a clear command
    pub fn clear(&mut self) -> &mut Self {
        self.push(RenderCommand::Clear)
    }

    /// Append a text command
    pub fn text(&mut self, x: i16, y: i16, text: &str) -> &mut Self {
        self.push(RenderCommand::Text {
            x,
            y,
            text: truncated(text),
        })
    }

    /// Append a brightness command
    pub fn brightness(&mut self, level: u8) -> &mut Self {
        self.push(RenderCommand::Brightness(level))
    }

    fn push(&mut self, command: RenderCommand) -> &mut Self {
        // A tick emits at most clear + text; a full list is a controller bug
        debug_assert!(!self.commands.is_full(), "render list overflow");
        let _ = self.commands.push(command);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn as_slice(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter()
    }

    /// True if the list starts by blanking the panel
    pub fn starts_with_clear(&self) -> bool {
        matches!(self.commands.first(), Some(RenderCommand::Clear))
    }

    /// The last text drawn by this list, with its position
    pub fn last_text(&self) -> Option<(i16, i16, &str)> {
        self.commands.iter().rev().find_map(|command| match command {
            RenderCommand::Text { x, y, text } => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a RenderList {
    type Item = &'a RenderCommand;
    type IntoIter = core::slice::Iter<'a, RenderCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_uses_char_count() {
        let metrics = TextMetrics::SYSTEM_5X7;
        assert_eq!(metrics.width("Welcome"), 42);
        assert_eq!(metrics.width(""), 0);
    }

    #[test]
    fn test_centered_on_double_panel() {
        let panel = PanelGeometry::from_modules(2, 1);
        // "PANEL" = 30px wide on a 64x16 panel
        assert_eq!(panel.centered(&TextMetrics::SYSTEM_5X7, "PANEL"), (17, 4));
    }

    #[test]
    fn test_centered_x_overhangs_both_edges() {
        let panel = PanelGeometry::from_modules(1, 1);
        // 48px of text on a 32px panel
        assert_eq!(panel.centered_x(&TextMetrics::SYSTEM_5X7, "00:00:33"), -8);
    }

    #[test]
    fn test_centered_clamps_wide_text_to_origin() {
        let panel = PanelGeometry::from_modules(1, 1);
        assert_eq!(
            panel.centered(&TextMetrics::SYSTEM_5X7, "TOO WIDE TEXT"),
            (0, 4)
        );
    }

    #[test]
    fn test_truncated_respects_capacity() {
        let text: String<4> = truncated("MERHABA");
        assert_eq!(text.as_str(), "MERH");
    }

    #[test]
    fn test_truncated_keeps_char_boundaries() {
        // 'Ü' is two bytes; only one fits after "AB"
        let text: String<4> = truncated("ABÜÜ");
        assert_eq!(text.as_str(), "ABÜ");
    }

    #[test]
    fn test_render_list_last_text() {
        let mut list = RenderList::new();
        list.clear().text(2, 4, "1500 TL");
        assert_eq!(list.len(), 2);
        assert!(list.starts_with_clear());
        assert_eq!(list.last_text(), Some((2, 4, "1500 TL")));
    }
}
