//! Half-duplex RS-485 transmitter
//!
//! The transceiver's DE/RE pin is held low (receive) except while a reply
//! is on the wire.

use embedded_hal::digital::OutputPin;
use embedded_io_async::Write;

/// RS-485 transmit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rs485Error {
    /// Direction pin could not be driven
    DirectionPin,
    /// UART write or flush failed
    Uart,
}

/// UART transmitter plus direction control
pub struct Rs485Tx<W, P> {
    tx: W,
    direction: P,
}

impl<W: Write, P: OutputPin> Rs485Tx<W, P> {
    /// Wrap a transmitter; the bus is released immediately
    pub fn new(tx: W, mut direction: P) -> Self {
        let _ = direction.set_low();
        Self { tx, direction }
    }

    /// Drive the bus, send `bytes`, wait for them to leave, release the bus
    pub async fn send(&mut self, bytes: &[u8]) -> Result<(), Rs485Error> {
        self.direction
            .set_high()
            .map_err(|_| Rs485Error::DirectionPin)?;

        let result = match self.tx.write_all(bytes).await {
            Ok(()) => self.tx.flush().await.map_err(|_| Rs485Error::Uart),
            Err(_) => Err(Rs485Error::Uart),
        };

        // Always release the bus, even after a failed write
        self.direction
            .set_low()
            .map_err(|_| Rs485Error::DirectionPin)?;
        result
    }
}
