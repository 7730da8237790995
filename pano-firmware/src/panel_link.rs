//! Panel link backend
//!
//! Implements `PanelBackend` by encoding each command as a frame for the
//! panel module, which owns scan-out and fonts. Frames are queued in an
//! outbox while a render list is applied and written to the UART in one
//! go afterwards.

use defmt::*;
use embassy_rp::uart::{Async, UartTx};
use heapless::Vec;

use pano_core::render::PanelGeometry;
use pano_display::{PanelBackend, PanelError};
use pano_protocol::{PanelMessage, MAX_FRAME_SIZE};

/// Outbox capacity: one full render list
const OUTBOX_SIZE: usize = 4 * MAX_FRAME_SIZE;

/// Panel module reached over a UART
pub struct LinkPanel {
    address: u8,
    geometry: PanelGeometry,
    outbox: Vec<u8, OUTBOX_SIZE>,
}

impl LinkPanel {
    pub fn new(address: u8, geometry: PanelGeometry) -> Self {
        Self {
            address,
            geometry,
            outbox: Vec::new(),
        }
    }

    fn queue(&mut self, message: PanelMessage<'_>) -> Result<(), PanelError> {
        let frame = message
            .to_frame(self.address)
            .map_err(|_| PanelError::BufferOverflow)?;
        let bytes = frame
            .encode_to_vec()
            .map_err(|_| PanelError::BufferOverflow)?;
        self.outbox
            .extend_from_slice(&bytes)
            .map_err(|_| PanelError::BufferOverflow)
    }

    /// Write queued frames to the panel module
    ///
    /// The outbox is emptied even on error; a lost frame is repaired by
    /// the next render.
    pub async fn flush(&mut self, tx: &mut UartTx<'static, Async>) -> Result<(), PanelError> {
        if self.outbox.is_empty() {
            return Ok(());
        }
        trace!("Panel link: {} bytes", self.outbox.len());
        let result = tx.write(&self.outbox).await;
        self.outbox.clear();
        result.map_err(|e| {
            warn!("Panel link write failed: {:?}", e);
            PanelError::Communication
        })
    }
}

impl PanelBackend for LinkPanel {
    fn clear(&mut self) -> Result<(), PanelError> {
        self.queue(PanelMessage::Clear)
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str) -> Result<(), PanelError> {
        self.queue(PanelMessage::Text { x, y, text })
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), PanelError> {
        self.queue(PanelMessage::Brightness(level))
    }

    fn width(&self) -> i16 {
        self.geometry.width
    }

    fn height(&self) -> i16 {
        self.geometry.height
    }
}
