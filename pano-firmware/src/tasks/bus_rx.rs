//! Register link receive task
//!
//! Receives frames from the bus master, keeps those addressed to this unit
//! (or broadcast) and hands decoded requests to the main loop.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use pano_protocol::{Frame, FrameParser, HostRequest, ResultCode, SignReply};

use crate::channels::{BusTransaction, BUS_REPLIES, BUS_REQUESTS};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bus RX task - receives and parses frames from the bus master
#[embassy_executor::task]
pub async fn bus_rx_task(mut rx: BufferedUartRx, unit_address: u8) {
    info!("Bus RX task started, unit {}", unit_address);

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => handle_frame(&frame, unit_address),
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Dispatch one complete frame
fn handle_frame(frame: &Frame, unit_address: u8) {
    if !frame.is_for(unit_address) {
        trace!("Frame for unit {} ignored", frame.address);
        return;
    }
    let respond = !frame.is_broadcast();

    match HostRequest::from_frame(frame) {
        Ok(request) => {
            debug!("Request: {:?}", request);
            if BUS_REQUESTS
                .try_send(BusTransaction { request, respond })
                .is_err()
            {
                warn!("Request channel full, dropping request");
            }
        }
        Err(e) => {
            warn!("Unsupported request {:#x}: {:?}", frame.msg_type, e);
            let nak = SignReply::Nak(ResultCode::IllegalFunction);
            if respond && BUS_REPLIES.try_send(nak).is_err() {
                warn!("Reply channel full, dropping NAK");
            }
        }
    }
}
