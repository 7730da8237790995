//! Display-mode controllers
//!
//! One controller per firmware variant. Both are driven by the main loop
//! with the current time and return the render commands for that tick;
//! neither ever blocks or talks to hardware.

pub mod bus;
pub mod showcase;

pub use bus::BusController;
pub use showcase::ShowcaseController;
