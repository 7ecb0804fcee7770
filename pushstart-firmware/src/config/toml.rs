//! Simple TOML parser for the controller configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the board file. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - [token.name] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys outside section headers

use pushstart_core::config::{
    AnimationPolicy, GateSource, PinConfig, PushstartConfig, CONFIG_VERSION,
};
use pushstart_core::gate::TokenId;
use pushstart_hal_rp2040::{parse_pin_string, GpioAllocator};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type or out-of-range value
    InvalidValue,
    /// Key not valid in its section
    UnknownKey,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string, reserved pin or pin used twice
    InvalidPin,
    /// Token uid is not 4, 7 or 10 hex bytes
    InvalidTokenId,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Control,
    Indicator,
    Gate,
    Pins,
    Token,
}

/// Parse TOML configuration into PushstartConfig
///
/// Keys that are absent keep their compiled defaults.
pub fn parse_config(input: &str) -> Result<PushstartConfig, ParseError> {
    let mut config = PushstartConfig::new();
    let mut section = Section::Root;
    let mut token_seen = true;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            if !token_seen {
                // [token.x] without a uid
                return Err(ParseError::InvalidTokenId);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            token_seen = section != Section::Token;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
        if section == Section::Token && key == "uid" {
            token_seen = true;
        }
    }

    if !token_seen {
        return Err(ParseError::InvalidTokenId);
    }

    validate(&config)?;
    Ok(config)
}

/// Parse a section header like "control" or "token.keyfob"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some(name) = header.strip_prefix("token.") {
        let valid = !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        return if valid {
            Ok(Section::Token)
        } else {
            Err(ParseError::InvalidSection)
        };
    }

    match header {
        "control" => Ok(Section::Control),
        "indicator" => Ok(Section::Indicator),
        "gate" => Ok(Section::Gate),
        "pins" => Ok(Section::Pins),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio11", "!gpio12", "^!gpio2"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let spec = parse_pin_string(parse_string(value)).ok_or(ParseError::InvalidPin)?;
    Ok(PinConfig {
        pin: spec.pin,
        inverted: spec.inverted,
        pull_up: spec.pull_up,
    })
}

/// Parse the gate source
fn parse_gate_source(value: &str) -> Result<GateSource, ParseError> {
    match parse_string(value) {
        "kill_switch" => Ok(GateSource::KillSwitch),
        "token" => Ok(GateSource::Token),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a key/value pair to the config for the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PushstartConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "version" => {
                if parse_int::<u8>(value)? != CONFIG_VERSION {
                    return Err(ParseError::InvalidValue);
                }
            }
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Control => {
            let c = &mut config.control;
            match key {
                "hold_threshold_ms" => c.hold_threshold_ms = parse_int(value)?,
                "cycle_period_ms" => c.cycle_period_ms = parse_int(value)?,
                "settle_delay_ms" => c.settle_delay_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Indicator => {
            let i = &mut config.indicator;
            match key {
                "fade_step" => i.fade_step = parse_int(value)?,
                "flash_period_cycles" => i.flash_period_cycles = parse_int(value)?,
                "reset_on_entry" => {
                    i.policy = if parse_bool(value)? {
                        AnimationPolicy::ResetOnEntry
                    } else {
                        AnimationPolicy::Continuous
                    };
                }
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Gate => {
            let g = &mut config.gate;
            match key {
                "source" => g.source = parse_gate_source(value)?,
                "token_timeout_ms" => g.token_timeout_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Pins => {
            let p = &mut config.pins;
            match key {
                "button" => p.button = parse_pin(value)?,
                "interlock" => p.interlock = parse_pin(value)?,
                "kill_switch" => p.kill_switch = parse_pin(value)?,
                "relay_acc" => p.relay_acc = parse_pin(value)?,
                "relay_ign" => p.relay_ign = parse_pin(value)?,
                "relay_start" => p.relay_start = parse_pin(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Token => match key {
            "uid" => {
                let token = TokenId::parse_hex(parse_string(value))
                    .map_err(|_| ParseError::InvalidTokenId)?;
                config
                    .gate
                    .allow_list
                    .push(token)
                    .map_err(|_| ParseError::TooManyItems)?;
            }
            _ => return Err(ParseError::UnknownKey),
        },
    }

    Ok(())
}

/// Cross-field checks once the whole file is read
fn validate(config: &PushstartConfig) -> Result<(), ParseError> {
    let c = &config.control;
    if c.cycle_period_ms == 0 || c.hold_threshold_ms <= c.cycle_period_ms {
        return Err(ParseError::InvalidValue);
    }
    if config.indicator.fade_step == 0 || config.indicator.flash_period_cycles == 0 {
        return Err(ParseError::InvalidValue);
    }

    // A token gate that authorizes nobody would lock the vehicle out
    if config.gate.source == GateSource::Token
        && (config.gate.allow_list.is_empty() || config.gate.token_timeout_ms == 0)
    {
        return Err(ParseError::InvalidValue);
    }

    let mut gpio = GpioAllocator::new();
    let inputs = config.pins.inputs();
    let relays = config.pins.relays();
    for (name, pin) in inputs.iter().chain(relays.iter()) {
        // The kill switch input is not wired up with the token gate
        if *name == "kill_switch" && config.gate.source == GateSource::Token {
            continue;
        }
        gpio.allocate(pin.pin).map_err(|_| ParseError::InvalidPin)?;
    }

    Ok(())
}
