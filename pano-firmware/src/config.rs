//! Embedded board configuration
//!
//! `build.rs` validates pano.toml and serializes it with postcard into
//! OUT_DIR; the firmware decodes that blob once at boot.

use defmt::*;

use pano_core::config::PanoConfig;

/// Validated configuration produced by the build script
static CONFIG_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/pano_config.bin"));

/// Decode the embedded configuration, falling back to power-on defaults
pub fn load() -> PanoConfig {
    match postcard::from_bytes::<PanoConfig>(CONFIG_BLOB) {
        Ok(config) => {
            info!(
                "Config: {}x{} panels, tick {}ms, unit {}",
                config.panel.panels_wide,
                config.panel.panels_high,
                config.panel.tick_ms,
                config.bus.unit_address
            );
            config
        }
        Err(_) => {
            error!("Embedded config could not be decoded, using defaults");
            PanoConfig::default()
        }
    }
}
