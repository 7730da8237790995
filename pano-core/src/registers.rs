//! Holding registers of the bus variant
//!
//! Four 16-bit registers written by the bus master and re-read by the
//! controller every tick:
//!
//! | Address | Meaning                         | Power-on |
//! |---------|---------------------------------|----------|
//! | 0       | display mode                    | 1        |
//! | 1       | scroll interval (ms, 50..=500)  | 100      |
//! | 2       | price (signed)                  | 1500     |
//! | 3       | time (signed seconds)           | 60       |
//!
//! The bank stores whatever the master writes. Range checks on the scroll
//! interval happen in the controller so an out-of-range write leaves the
//! interval in effect untouched.

use pano_protocol::{HostRequest, RegisterValues, ResultCode, SignReply};

/// Number of holding registers
pub const REGISTER_COUNT: usize = 4;

pub const REG_MODE: u8 = 0;
pub const REG_SCROLL_INTERVAL: u8 = 1;
pub const REG_PRICE: u8 = 2;
pub const REG_TIME: u8 = 3;

/// Register access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Address (or address range) outside the bank
    IllegalAddress,
    /// Request cannot be represented in a reply
    IllegalValue,
}

impl From<RegisterError> for ResultCode {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::IllegalAddress => ResultCode::IllegalAddress,
            RegisterError::IllegalValue => ResultCode::IllegalValue,
        }
    }
}

/// Typed view of the bank, taken once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterSnapshot {
    /// Raw mode selector (may be unrecognized)
    pub mode: u16,
    /// Raw scroll interval (may be out of range)
    pub scroll_interval: u16,
    pub price: i16,
    pub time: i16,
}

impl Default for RegisterSnapshot {
    fn default() -> Self {
        RegisterBank::default().snapshot()
    }
}

/// The holding register bank
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBank {
    values: [u16; REGISTER_COUNT],
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new([1, 100, 1500, 60])
    }
}

impl RegisterBank {
    /// Bank with explicit power-on values
    pub const fn new(initial: [u16; REGISTER_COUNT]) -> Self {
        Self { values: initial }
    }

    pub fn read(&self, address: u8) -> Result<u16, RegisterError> {
        self.values
            .get(usize::from(address))
            .copied()
            .ok_or(RegisterError::IllegalAddress)
    }

    pub fn write(&mut self, address: u8, value: u16) -> Result<(), RegisterError> {
        let slot = self
            .values
            .get_mut(usize::from(address))
            .ok_or(RegisterError::IllegalAddress)?;
        *slot = value;
        Ok(())
    }

    /// Read `count` consecutive registers
    pub fn read_range(&self, start: u8, count: u8) -> Result<RegisterValues, RegisterError> {
        let range = Self::range(start, usize::from(count))?;
        RegisterValues::from_slice(&self.values[range]).map_err(|_| RegisterError::IllegalValue)
    }

    /// Write consecutive registers; nothing is written if any address is bad
    pub fn write_range(&mut self, start: u8, values: &[u16]) -> Result<(), RegisterError> {
        let range = Self::range(start, values.len())?;
        self.values[range].copy_from_slice(values);
        Ok(())
    }

    fn range(start: u8, count: usize) -> Result<core::ops::Range<usize>, RegisterError> {
        let start = usize::from(start);
        let end = start + count;
        if count == 0 || end > REGISTER_COUNT {
            return Err(RegisterError::IllegalAddress);
        }
        Ok(start..end)
    }

    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            mode: self.values[usize::from(REG_MODE)],
            scroll_interval: self.values[usize::from(REG_SCROLL_INTERVAL)],
            price: self.values[usize::from(REG_PRICE)] as i16,
            time: self.values[usize::from(REG_TIME)] as i16,
        }
    }

    /// Apply a bus request and build the reply
    pub fn handle(&mut self, request: &HostRequest) -> SignReply {
        let result = match request {
            HostRequest::ReadRegisters { start, count } => self
                .read_range(*start, *count)
                .map(|values| SignReply::Registers {
                    start: *start,
                    values,
                }),
            HostRequest::WriteRegister { address, value } => {
                self.write(*address, *value).map(|()| SignReply::Ack)
            }
            HostRequest::WriteRegisters { start, values } => {
                self.write_range(*start, values).map(|()| SignReply::Ack)
            }
            HostRequest::Ping => Ok(SignReply::Pong),
        };

        result.unwrap_or_else(|err| SignReply::Nak(err.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_defaults() {
        let snapshot = RegisterBank::default().snapshot();
        assert_eq!(
            snapshot,
            RegisterSnapshot {
                mode: 1,
                scroll_interval: 100,
                price: 1500,
                time: 60,
            }
        );
    }

    #[test]
    fn test_signed_values() {
        let mut bank = RegisterBank::default();
        bank.write(REG_PRICE, (-250i16) as u16).unwrap();
        bank.write(REG_TIME, 0xFFFF).unwrap();
        let snapshot = bank.snapshot();
        assert_eq!(snapshot.price, -250);
        assert_eq!(snapshot.time, -1);
    }

    #[test]
    fn test_illegal_address() {
        let mut bank = RegisterBank::default();
        assert_eq!(bank.read(4), Err(RegisterError::IllegalAddress));
        assert_eq!(bank.write(4, 1), Err(RegisterError::IllegalAddress));
    }

    #[test]
    fn test_out_of_range_interval_is_stored_raw() {
        let mut bank = RegisterBank::default();
        bank.write(REG_SCROLL_INTERVAL, 30).unwrap();
        assert_eq!(bank.snapshot().scroll_interval, 30);
    }

    #[test]
    fn test_handle_read_all() {
        let mut bank = RegisterBank::default();
        let reply = bank.handle(&HostRequest::ReadRegisters { start: 0, count: 4 });
        assert_eq!(
            reply,
            SignReply::Registers {
                start: 0,
                values: RegisterValues::from_slice(&[1, 100, 1500, 60]).unwrap(),
            }
        );
    }

    #[test]
    fn test_handle_read_past_end() {
        let mut bank = RegisterBank::default();
        for (start, count) in [(2, 3), (4, 1), (0, 0)] {
            assert_eq!(
                bank.handle(&HostRequest::ReadRegisters { start, count }),
                SignReply::Nak(ResultCode::IllegalAddress)
            );
        }
    }

    #[test]
    fn test_handle_write_single() {
        let mut bank = RegisterBank::default();
        let reply = bank.handle(&HostRequest::WriteRegister {
            address: REG_MODE,
            value: 2,
        });
        assert_eq!(reply, SignReply::Ack);
        assert_eq!(bank.snapshot().mode, 2);
    }

    #[test]
    fn test_handle_write_block_is_all_or_nothing() {
        let mut bank = RegisterBank::default();
        let reply = bank.handle(&HostRequest::WriteRegisters {
            start: 2,
            values: RegisterValues::from_slice(&[10, 20, 30]).unwrap(),
        });
        assert_eq!(reply, SignReply::Nak(ResultCode::IllegalAddress));
        assert_eq!(bank, RegisterBank::default());

        let reply = bank.handle(&HostRequest::WriteRegisters {
            start: 2,
            values: RegisterValues::from_slice(&[10, 20]).unwrap(),
        });
        assert_eq!(reply, SignReply::Ack);
        assert_eq!(bank.snapshot().price, 10);
        assert_eq!(bank.snapshot().time, 20);
    }

    #[test]
    fn test_handle_ping() {
        let mut bank = RegisterBank::default();
        assert_eq!(bank.handle(&HostRequest::Ping), SignReply::Pong);
    }
}
