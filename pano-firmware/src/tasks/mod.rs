//! Embassy async tasks
//!
//! The register link runs in its own tasks so bytes are never lost while
//! the main loop waits between ticks.

pub mod bus_rx;
pub mod bus_tx;

pub use bus_rx::bus_rx_task;
pub use bus_tx::bus_tx_task;
