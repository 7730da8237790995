//! Build script for pano-firmware
//!
//! - Puts memory.x on the linker search path
//! - Loads and validates pano.toml
//! - Embeds the validated configuration as a postcard blob in OUT_DIR

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use pano_core::config::{ConfigError, PanoConfig};

const CONFIG_FILE: &str = "pano.toml";

/// File name of the embedded configuration in OUT_DIR
const CONFIG_BLOB: &str = "pano_config.bin";

/// Inner width of the framed error box
const BOX_WIDTH: usize = 66;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    let config = load_config();
    embed_config(&out_dir, &config);

    println!("cargo:rerun-if-changed=build.rs");
}

fn setup_linker(out_dir: &Path) {
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
}

fn load_config() -> PanoConfig {
    println!("cargo:rerun-if-changed={CONFIG_FILE}");

    let text = match fs::read_to_string(CONFIG_FILE) {
        Ok(text) => text,
        Err(e) => fail(
            &format!("Cannot read {CONFIG_FILE}"),
            &format!(
                "{e}\nThe firmware needs a board configuration next to Cargo.toml.\n\
                 Every key is optional; an empty file selects the defaults."
            ),
        ),
    };

    // Missing keys fall back to defaults; bad types and over-long strings land here
    let config: PanoConfig = match toml::from_str(&text) {
        Ok(config) => config,
        Err(e) => fail(&format!("Invalid {CONFIG_FILE}"), &e.to_string()),
    };

    if let Err(e) = config.validate() {
        fail(&format!("{CONFIG_FILE} failed validation"), hint(e));
    }

    println!(
        "cargo:warning={CONFIG_FILE} validated: {}x{} panels, unit {}, {} playlist entries",
        config.panel.panels_wide,
        config.panel.panels_high,
        config.bus.unit_address,
        config.showcase.playlist.len()
    );
    config
}

fn hint(error: ConfigError) -> &'static str {
    match error {
        ConfigError::InvalidPanelCount => "[panel] panels_wide/panels_high out of range",
        ConfigError::InvalidGlyph => "[panel] glyph_advance and glyph_height must be non-zero",
        ConfigError::InvalidTick => "[panel] tick_ms must be non-zero",
        ConfigError::InvalidBaudRate => "a baud rate is zero",
        ConfigError::InvalidUnitAddress => "[bus] unit_address must be 1-247",
        ConfigError::ScrollIntervalOutOfRange => {
            "[bus] initial scroll interval register must be 50-500 ms"
        }
        ConfigError::InvalidScrollStep => "scroll_step must be non-zero",
        ConfigError::EmptyPlaylist => "[showcase] playlist needs at least one entry",
        ConfigError::InvalidTiming => {
            "[showcase] dwell_ms, cycles_per_mode and scroll_interval_ms must be non-zero"
        }
        ConfigError::InvalidStatusInterval => "[status] interval_ms must be non-zero",
    }
}

fn embed_config(out_dir: &Path, config: &PanoConfig) {
    let blob = postcard::to_stdvec(config).unwrap();
    fs::write(out_dir.join(CONFIG_BLOB), blob).unwrap();
}

/// Abort the build with `title` and `body` in a box
fn fail(title: &str, body: &str) -> ! {
    let rule = "═".repeat(BOX_WIDTH);
    let mut framed = format!("\n╔{rule}╗\n{}\n╠{rule}╣\n", row(&format!("ERROR: {title}")));
    for line in body.lines() {
        framed.push_str(&row(line));
        framed.push('\n');
    }
    framed.push_str(&format!("╚{rule}╝\n"));
    panic!("{framed}");
}

fn row(text: &str) -> String {
    let limit = BOX_WIDTH - 4;
    let clipped: String = if text.chars().count() > limit {
        text.chars().take(limit - 3).chain("...".chars()).collect()
    } else {
        text.to_string()
    };
    format!("║  {clipped:<limit$}  ║")
}
