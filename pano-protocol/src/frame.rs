//! Addressed frame codec shared by the register link and the panel link.
//!
//! Frame format:
//! - START (1 byte): 0xA5 synchronization byte
//! - ADDRESS (1 byte): unit address of the sign (0 = broadcast)
//! - LENGTH (1 byte): payload length (0-96)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-96 bytes): type-specific data
//! - CRC (2 bytes, low byte first): CRC-16/MODBUS over ADDRESS through PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Address every unit on the line accepts; never answered
pub const BROADCAST_ADDRESS: u8 = 0x00;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 96;

/// ADDRESS + LENGTH + TYPE
const HEADER_LEN: usize = 3;

/// Bytes surrounding the payload (START + header + CRC)
pub const FRAME_OVERHEAD: usize = 1 + HEADER_LEN + 2;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

const CRC_INIT: u16 = 0xFFFF;
const CRC_POLY: u16 = 0xA001;

fn crc16_update(crc: u16, byte: &u8) -> u16 {
    let mut crc = crc ^ u16::from(*byte);
    for _ in 0..8 {
        crc = if crc & 1 != 0 {
            (crc >> 1) ^ CRC_POLY
        } else {
            crc >> 1
        };
    }
    crc
}

/// CRC-16/MODBUS of `data`
pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(CRC_INIT, crc16_update)
}

fn frame_crc(header: &[u8; HEADER_LEN], payload: &[u8]) -> u16 {
    payload
        .iter()
        .fold(header.iter().fold(CRC_INIT, crc16_update), crc16_update)
}

/// Errors raised while building, encoding or parsing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Received CRC does not match the frame contents
    CrcMismatch,
    /// Invalid frame structure or unknown message type
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// One addressed message on either link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Unit address the frame is for (or from, on replies)
    pub address: u8,
    /// Message type identifier
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(address: u8, msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self {
            address,
            msg_type,
            payload,
        })
    }

    /// Frame carrying only a message type
    pub fn empty(address: u8, msg_type: u8) -> Self {
        Self {
            address,
            msg_type,
            payload: Vec::new(),
        }
    }

    /// True if every unit on the line should act on this frame
    pub fn is_broadcast(&self) -> bool {
        self.address == BROADCAST_ADDRESS
    }

    /// True if a unit with `unit_address` should act on this frame
    pub fn is_for(&self, unit_address: u8) -> bool {
        self.is_broadcast() || self.address == unit_address
    }

    fn header(&self) -> [u8; HEADER_LEN] {
        [self.address, self.payload.len() as u8, self.msg_type]
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Write the frame into `out`, returning the number of bytes used
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let total = self.encoded_len();
        let out = out.get_mut(..total).ok_or(FrameError::BufferTooSmall)?;

        let header = self.header();
        let body_end = 1 + HEADER_LEN + self.payload.len();

        out[0] = FRAME_START;
        out[1..=HEADER_LEN].copy_from_slice(&header);
        out[1 + HEADER_LEN..body_end].copy_from_slice(&self.payload);
        out[body_end..].copy_from_slice(&frame_crc(&header, &self.payload).to_le_bytes());

        Ok(total)
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut out)?;
        Vec::from_slice(&out[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Incremental frame decoder fed one byte at a time
///
/// Anything before a START byte is discarded, so a stream corrupted by line
/// noise resynchronizes on the next frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    header: [u8; HEADER_LEN],
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    crc_low: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Hunt,
    /// Collecting header byte `n`
    Header(usize),
    Payload,
    CrcLow,
    CrcHigh,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            stage: Stage::Hunt,
            header: [0; HEADER_LEN],
            payload: Vec::new(),
            crc_low: 0,
        }
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.stage = Stage::Hunt;
        self.payload.clear();
    }

    fn declared_len(&self) -> usize {
        self.header[1] as usize
    }

    /// Consume one byte
    ///
    /// Yields `Ok(Some(frame))` once the CRC of a complete frame checks out.
    /// On error the partial frame is dropped and the parser hunts for the
    /// next START byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Hunt => {
                if byte == FRAME_START {
                    self.payload.clear();
                    self.stage = Stage::Header(0);
                }
            }
            Stage::Header(n) => {
                self.header[n] = byte;
                if n == 1 && self.declared_len() > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.stage = match n + 1 {
                    HEADER_LEN if self.declared_len() == 0 => Stage::CrcLow,
                    HEADER_LEN => Stage::Payload,
                    next => Stage::Header(next),
                };
            }
            Stage::Payload => {
                // Length was bounded in the header
                let _ = self.payload.push(byte);
                if self.payload.len() == self.declared_len() {
                    self.stage = Stage::CrcLow;
                }
            }
            Stage::CrcLow => {
                self.crc_low = byte;
                self.stage = Stage::CrcHigh;
            }
            Stage::CrcHigh => {
                let received = u16::from_le_bytes([self.crc_low, byte]);
                let computed = frame_crc(&self.header, &self.payload);
                if received != computed {
                    self.reset();
                    return Err(FrameError::CrcMismatch);
                }

                let frame = Frame {
                    address: self.header[0],
                    msg_type: self.header[2],
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after that frame are left unconsumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
