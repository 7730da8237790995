//! Pano link protocol
//!
//! This crate defines the UART-based framing used on both serial lines of
//! the sign controller:
//!
//! - **Register link** (RS-485): a bus master reads and writes the sign's
//!   holding registers (mode, scroll interval, price, time).
//! - **Panel link**: the sign controller sends clear/text/brightness
//!   commands to the panel module that performs scan-out.
//!
//! All messages use the same binary frame:
//! ```text
//! ┌───────┬─────────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ ADDRESS │ LENGTH │ TYPE │ PAYLOAD     │ CRC16 LE │
//! │ 1B    │ 1B      │ 1B     │ 1B   │ 0–96B       │ 2B       │
//! └───────┴─────────┴────────┴──────┴─────────────┴──────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod result;

pub use frame::{
    crc16, Frame, FrameError, FrameParser, BROADCAST_ADDRESS, FRAME_START, MAX_FRAME_SIZE,
    MAX_PAYLOAD_SIZE,
};
pub use messages::{
    HostRequest, PanelMessage, RegisterValues, SignReply, MAX_PANEL_TEXT,
    MAX_REGISTERS_PER_REQUEST,
};
pub use result::ResultCode;
