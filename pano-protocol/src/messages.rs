//! Message types carried in frames
//!
//! Message types are divided into three groups:
//! - Host → Sign: register reads/writes and link checks
//! - Sign → Host: register values and acknowledgements
//! - Sign → Panel module: clear, text and brightness commands
//!
//! Multi-byte values are big-endian.

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::result::ResultCode;

// Message type IDs: Host → Sign
pub const MSG_READ_REGISTERS: u8 = 0x10;
pub const MSG_WRITE_REGISTER: u8 = 0x11;
pub const MSG_WRITE_REGISTERS: u8 = 0x12;
pub const MSG_PING: u8 = 0x13;

// Message type IDs: Sign → Host
pub const MSG_REGISTERS: u8 = 0x30;
pub const MSG_ACK: u8 = 0x31;
pub const MSG_NAK: u8 = 0x32;
pub const MSG_PONG: u8 = 0x33;

// Message type IDs: Sign → Panel module
pub const MSG_CLEAR: u8 = 0x40;
pub const MSG_TEXT: u8 = 0x41;
pub const MSG_BRIGHTNESS: u8 = 0x42;

/// Most registers a single request may read or write
pub const MAX_REGISTERS_PER_REQUEST: usize = 8;

/// Longest text a single panel frame can carry
pub const MAX_PANEL_TEXT: usize = MAX_PAYLOAD_SIZE - 5;

/// Register values carried by a request or reply
pub type RegisterValues = Vec<u16, MAX_REGISTERS_PER_REQUEST>;

/// Requests from the bus master
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostRequest {
    /// Read `count` registers starting at `start`
    ReadRegisters { start: u8, count: u8 },
    /// Write a single register
    WriteRegister { address: u8, value: u16 },
    /// Write consecutive registers starting at `start`
    WriteRegisters { start: u8, values: RegisterValues },
    /// Link check
    Ping,
}

impl HostRequest {
    /// Parse a request from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.msg_type {
            MSG_READ_REGISTERS => match payload {
                [start, count] => Ok(HostRequest::ReadRegisters {
                    start: *start,
                    count: *count,
                }),
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_WRITE_REGISTER => match payload {
                [address, hi, lo] => Ok(HostRequest::WriteRegister {
                    address: *address,
                    value: u16::from_be_bytes([*hi, *lo]),
                }),
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_WRITE_REGISTERS => {
                let (start, values) = decode_register_block(payload)?;
                Ok(HostRequest::WriteRegisters { start, values })
            }
            MSG_PING => Ok(HostRequest::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this request for the unit at `address` (for hosts and tests)
    pub fn to_frame(&self, address: u8) -> Result<Frame, FrameError> {
        match self {
            HostRequest::ReadRegisters { start, count } => {
                Frame::new(address, MSG_READ_REGISTERS, &[*start, *count])
            }
            HostRequest::WriteRegister {
                address: register,
                value,
            } => {
                let [hi, lo] = value.to_be_bytes();
                Frame::new(address, MSG_WRITE_REGISTER, &[*register, hi, lo])
            }
            HostRequest::WriteRegisters { start, values } => {
                let payload = encode_register_block(*start, values)?;
                Frame::new(address, MSG_WRITE_REGISTERS, &payload)
            }
            HostRequest::Ping => Ok(Frame::empty(address, MSG_PING)),
        }
    }
}

/// Replies from the sign to the bus master
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignReply {
    /// Values of consecutive registers starting at `start`
    Registers { start: u8, values: RegisterValues },
    /// Write accepted
    Ack,
    /// Request refused
    Nak(ResultCode),
    /// Link check response
    Pong,
}

impl SignReply {
    /// Encode this reply, stamped with the replying unit's address
    pub fn to_frame(&self, address: u8) -> Result<Frame, FrameError> {
        match self {
            SignReply::Registers { start, values } => {
                let payload = encode_register_block(*start, values)?;
                Frame::new(address, MSG_REGISTERS, &payload)
            }
            SignReply::Ack => Ok(Frame::empty(address, MSG_ACK)),
            SignReply::Nak(code) => Frame::new(address, MSG_NAK, &[code.to_byte()]),
            SignReply::Pong => Ok(Frame::empty(address, MSG_PONG)),
        }
    }

    /// Parse a reply from a frame (for hosts and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_REGISTERS => {
                let (start, values) = decode_register_block(&frame.payload)?;
                Ok(SignReply::Registers { start, values })
            }
            MSG_ACK => Ok(SignReply::Ack),
            MSG_NAK => {
                let code = frame
                    .payload
                    .first()
                    .and_then(|&byte| ResultCode::from_byte(byte))
                    .ok_or(FrameError::InvalidFrame)?;
                Ok(SignReply::Nak(code))
            }
            MSG_PONG => Ok(SignReply::Pong),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Commands from the sign to the panel module that performs scan-out
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelMessage<'a> {
    /// Blank the whole panel
    Clear,
    /// Draw text with its top-left corner at pixel (x, y); may be off-screen
    Text { x: i16, y: i16, text: &'a str },
    /// Set output brightness (0-255)
    Brightness(u8),
}

impl<'a> PanelMessage<'a> {
    /// Encode this message into a frame
    ///
    /// Text longer than [`MAX_PANEL_TEXT`] bytes is cut at the last full
    /// character that fits.
    pub fn to_frame(&self, address: u8) -> Result<Frame, FrameError> {
        match self {
            PanelMessage::Clear => Ok(Frame::empty(address, MSG_CLEAR)),
            PanelMessage::Text { x, y, text } => {
                let text = clip_utf8(text, MAX_PANEL_TEXT);

                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&x.to_be_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(&y.to_be_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .push(text.len() as u8)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(text.as_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;

                Frame::new(address, MSG_TEXT, &payload)
            }
            PanelMessage::Brightness(level) => Frame::new(address, MSG_BRIGHTNESS, &[*level]),
        }
    }

    /// Parse a panel command, borrowing its text from the frame
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_CLEAR => Ok(PanelMessage::Clear),
            MSG_TEXT => match frame.payload.as_slice() {
                [x0, x1, y0, y1, len, text @ ..] if text.len() == *len as usize => {
                    let text =
                        core::str::from_utf8(text).map_err(|_| FrameError::InvalidFrame)?;
                    Ok(PanelMessage::Text {
                        x: i16::from_be_bytes([*x0, *x1]),
                        y: i16::from_be_bytes([*y0, *y1]),
                        text,
                    })
                }
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_BRIGHTNESS => match frame.payload.as_slice() {
                [level] => Ok(PanelMessage::Brightness(*level)),
                _ => Err(FrameError::InvalidFrame),
            },
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Payload: [start][count][value_hi value_lo]*count
fn encode_register_block(
    start: u8,
    values: &[u16],
) -> Result<Vec<u8, MAX_PAYLOAD_SIZE>, FrameError> {
    let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
    payload
        .extend_from_slice(&[start, values.len() as u8])
        .map_err(|_| FrameError::PayloadTooLarge)?;
    for value in values {
        payload
            .extend_from_slice(&value.to_be_bytes())
            .map_err(|_| FrameError::PayloadTooLarge)?;
    }
    Ok(payload)
}

fn decode_register_block(payload: &[u8]) -> Result<(u8, RegisterValues), FrameError> {
    let [start, count, data @ ..] = payload else {
        return Err(FrameError::InvalidFrame);
    };
    let count = *count as usize;
    if count > MAX_REGISTERS_PER_REQUEST || data.len() != count * 2 {
        return Err(FrameError::InvalidFrame);
    }

    let mut values = RegisterValues::new();
    for pair in data.chunks_exact(2) {
        // Bounded by the count check above
        let _ = values.push(u16::from_be_bytes([pair[0], pair[1]]));
    }
    Ok((*start, values))
}

fn clip_utf8(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_registers_request() {
        let frame = Frame::new(0x01, MSG_READ_REGISTERS, &[0, 4]).unwrap();
        let request = HostRequest::from_frame(&frame).unwrap();
        assert_eq!(request, HostRequest::ReadRegisters { start: 0, count: 4 });
    }

    #[test]
    fn test_write_register_request_big_endian() {
        let frame = Frame::new(0x01, MSG_WRITE_REGISTER, &[2, 0x05, 0xDC]).unwrap();
        let request = HostRequest::from_frame(&frame).unwrap();
        assert_eq!(
            request,
            HostRequest::WriteRegister {
                address: 2,
                value: 1500
            }
        );
    }

    #[test]
    fn test_write_registers_request_from_host_encoding() {
        let mut values = RegisterValues::new();
        values.extend_from_slice(&[2, 250]).unwrap();
        let original = HostRequest::WriteRegisters { start: 0, values };

        let frame = original.to_frame(0x03).unwrap();
        assert_eq!(frame.address, 0x03);
        assert_eq!(frame.payload.as_slice(), &[0, 2, 0, 2, 0, 250]);
        assert_eq!(HostRequest::from_frame(&frame).unwrap(), original);
    }

    #[test]
    fn test_write_registers_count_mismatch() {
        // Claims two registers but carries one
        let frame = Frame::new(0x01, MSG_WRITE_REGISTERS, &[0, 2, 0, 1]).unwrap();
        assert_eq!(
            HostRequest::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_malformed_write_register() {
        let frame = Frame::new(0x01, MSG_WRITE_REGISTER, &[2, 0x05]).unwrap();
        assert_eq!(
            HostRequest::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_unknown_request_type() {
        let frame = Frame::empty(0x01, 0x7E);
        assert_eq!(
            HostRequest::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_nak_reply() {
        let frame = SignReply::Nak(ResultCode::IllegalAddress)
            .to_frame(0x01)
            .unwrap();
        assert_eq!(frame.msg_type, MSG_NAK);
        assert_eq!(frame.payload.as_slice(), &[0x02]);
        assert_eq!(
            SignReply::from_frame(&frame).unwrap(),
            SignReply::Nak(ResultCode::IllegalAddress)
        );
    }

    #[test]
    fn test_registers_reply_signed_value() {
        let mut values = RegisterValues::new();
        values.push((-25i16) as u16).unwrap();
        let frame = SignReply::Registers { start: 3, values }
            .to_frame(0x01)
            .unwrap();
        assert_eq!(frame.payload.as_slice(), &[3, 1, 0xFF, 0xE7]);
    }

    #[test]
    fn test_panel_text_negative_position() {
        let msg = PanelMessage::Text {
            x: -12,
            y: 4,
            text: "Welcome",
        };
        let frame = msg.to_frame(0x00).unwrap();
        assert_eq!(frame.msg_type, MSG_TEXT);
        assert_eq!(&frame.payload[..5], &[0xFF, 0xF4, 0x00, 0x04, 7]);
        assert_eq!(&frame.payload[5..], b"Welcome");

        assert_eq!(PanelMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_panel_text_clipped_to_payload() {
        let bytes = [b'A'; 120];
        let long = core::str::from_utf8(&bytes).unwrap();
        let frame = PanelMessage::Text {
            x: 0,
            y: 0,
            text: long,
        }
        .to_frame(0x00)
        .unwrap();
        assert_eq!(frame.payload[4] as usize, MAX_PANEL_TEXT);
        assert_eq!(frame.payload.len(), MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn test_panel_brightness() {
        let frame = PanelMessage::Brightness(50).to_frame(0x00).unwrap();
        assert_eq!(frame.msg_type, MSG_BRIGHTNESS);
        assert_eq!(
            PanelMessage::from_frame(&frame).unwrap(),
            PanelMessage::Brightness(50)
        );
    }
}
