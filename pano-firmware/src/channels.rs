//! Inter-task communication channels
//!
//! The register link tasks talk to the main loop only through these
//! channels; the register bank itself is owned by the main loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use pano_protocol::{HostRequest, SignReply};

/// Channel capacity for decoded bus requests
const REQUEST_CHANNEL_SIZE: usize = 4;

/// Channel capacity for replies waiting to be transmitted
const REPLY_CHANNEL_SIZE: usize = 4;

/// A decoded request and whether the master expects a reply
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTransaction {
    pub request: HostRequest,
    /// False for broadcasts
    pub respond: bool,
}

/// Requests from the register link, applied by the main loop
pub static BUS_REQUESTS: Channel<CriticalSectionRawMutex, BusTransaction, REQUEST_CHANNEL_SIZE> =
    Channel::new();

/// Replies for the register link transmitter
pub static BUS_REPLIES: Channel<CriticalSectionRawMutex, SignReply, REPLY_CHANNEL_SIZE> =
    Channel::new();
