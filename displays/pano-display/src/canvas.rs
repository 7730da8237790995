//! In-memory panel
//!
//! Records what a real panel would show: the text items drawn since the
//! last clear and the current brightness. Used by host tests and as a
//! reference backend.

use heapless::{String, Vec};

use pano_core::render::{PanelGeometry, MAX_TEXT_LEN};

use crate::backend::{PanelBackend, PanelError};

/// Maximum text items between clears
pub const MAX_ITEMS: usize = 8;

/// One piece of text on the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextItem {
    pub x: i16,
    pub y: i16,
    pub text: String<MAX_TEXT_LEN>,
}

/// Text canvas for hosts and tests
#[derive(Clone)]
pub struct TextCanvas {
    geometry: PanelGeometry,
    items: Vec<TextItem, MAX_ITEMS>,
    brightness: u8,
    /// Clears since creation
    clears: u32,
}

impl TextCanvas {
    /// Create a blank canvas
    pub fn new(geometry: PanelGeometry) -> Self {
        Self {
            geometry,
            items: Vec::new(),
            brightness: u8::MAX,
            clears: 0,
        }
    }

    /// Text items drawn since the last clear, oldest first
    pub fn items(&self) -> &[TextItem] {
        &self.items
    }

    /// Most recently drawn text
    pub fn top(&self) -> Option<&TextItem> {
        self.items.last()
    }

    /// True if nothing has been drawn since the last clear
    pub fn is_blank(&self) -> bool {
        self.items.is_empty()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn clears(&self) -> u32 {
        self.clears
    }
}

impl PanelBackend for TextCanvas {
    fn clear(&mut self) -> Result<(), PanelError> {
        self.items.clear();
        self.clears = self.clears.wrapping_add(1);
        Ok(())
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), PanelError> {
        let mut owned = String::new();
        for ch in text.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        self.items
            .push(TextItem { x, y, text: owned })
            .map_err(|_| PanelError::BufferOverflow)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), PanelError> {
        self.brightness = level;
        Ok(())
    }

    fn width(&self) -> i16 {
        self.geometry.width
    }

    fn height(&self) -> i16 {
        self.geometry.height
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextCanvas {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Canvas[");
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "({},{}) {}", item.x, item.y, item.text.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_items() {
        let mut canvas = TextCanvas::new(PanelGeometry::default());
        canvas.draw_text(2, 4, "1500 TL").unwrap();
        assert!(!canvas.is_blank());

        canvas.clear().unwrap();
        assert!(canvas.is_blank());
        assert_eq!(canvas.clears(), 1);
    }

    #[test]
    fn test_overflow_reported() {
        let mut canvas = TextCanvas::new(PanelGeometry::default());
        for _ in 0..MAX_ITEMS {
            canvas.draw_text(0, 0, "X").unwrap();
        }
        assert_eq!(
            canvas.draw_text(0, 0, "X"),
            Err(PanelError::BufferOverflow)
        );
    }

    #[test]
    fn test_dimensions() {
        let canvas = TextCanvas::new(PanelGeometry::from_modules(2, 1));
        assert_eq!(canvas.width(), 64);
        assert_eq!(canvas.height(), 16);
    }
}
