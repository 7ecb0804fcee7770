//! Configuration loading and parsing
//!
//! The board file is compiled into the firmware and parsed at boot by a
//! custom no_std parser. A broken file never bricks the controller: the
//! compiled defaults (kill-switch gate) are used instead.

pub mod toml;

use defmt::*;
use pushstart_core::config::PushstartConfig;

pub use toml::{parse_config, ParseError};

/// Embedded board configuration (compiled into firmware)
/// Edit pushstart.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../../pushstart.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> PushstartConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates the file, so this only happens when the
            // two checkers disagree
            error!("Failed to parse embedded config: {}", e);
            warn!("Using compiled defaults (kill switch gate)");
            PushstartConfig::default()
        }
    }
}
