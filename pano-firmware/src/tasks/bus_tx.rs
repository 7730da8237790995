//! Register link transmit task
//!
//! Sends replies queued by the main loop, driving the RS-485 direction
//! pin around each frame.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::uart::BufferedUartTx;

use crate::channels::BUS_REPLIES;
use crate::rs485::Rs485Tx;

/// Bus TX task - sends replies to the bus master
#[embassy_executor::task]
pub async fn bus_tx_task(tx: BufferedUartTx, direction: Output<'static>, unit_address: u8) {
    info!("Bus TX task started");

    let mut link = Rs485Tx::new(tx, direction);

    loop {
        let reply = BUS_REPLIES.receive().await;

        let frame = match reply.to_frame(unit_address) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to build reply: {:?}", e);
                continue;
            }
        };
        let bytes = match frame.encode_to_vec() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode reply: {:?}", e);
                continue;
            }
        };

        match link.send(&bytes).await {
            Ok(()) => trace!("Reply sent: {:?}", reply),
            Err(e) => warn!("Failed to send reply: {:?}", e),
        }
    }
}
