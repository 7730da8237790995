//! Negative acknowledgement codes for the register link

/// Why the sign refused a register request
///
/// Values follow the exception numbering field-bus masters already know,
/// so a host can map them onto its own error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResultCode {
    /// Message type is not a register operation
    IllegalFunction,
    /// Register address (or address + count) is outside the bank
    IllegalAddress,
    /// Request is structurally valid but its value cannot be applied
    IllegalValue,
}

// Wire format values
const CODE_ILLEGAL_FUNCTION: u8 = 0x01;
const CODE_ILLEGAL_ADDRESS: u8 = 0x02;
const CODE_ILLEGAL_VALUE: u8 = 0x03;

impl ResultCode {
    /// Parse a code from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CODE_ILLEGAL_FUNCTION => Some(ResultCode::IllegalFunction),
            CODE_ILLEGAL_ADDRESS => Some(ResultCode::IllegalAddress),
            CODE_ILLEGAL_VALUE => Some(ResultCode::IllegalValue),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            ResultCode::IllegalFunction => CODE_ILLEGAL_FUNCTION,
            ResultCode::IllegalAddress => CODE_ILLEGAL_ADDRESS,
            ResultCode::IllegalValue => CODE_ILLEGAL_VALUE,
        }
    }
}
