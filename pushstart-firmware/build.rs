//! Build script for pushstart-firmware
//!
//! - Copies memory.x for the linker and adds the link scripts
//! - Validates pushstart.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs taken by the PN532 I2C bus and the indicator PWM slice
const RESERVED_PINS: [u32; 4] = [4, 5, 14, 15];

/// Highest user GPIO on the RP2040
const MAX_GPIO: u32 = 29;

/// Allow-list capacity in pushstart-core
const MAX_TOKENS: usize = 8;

const CONFIG_VERSION: i64 = 1;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pushstart.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=pushstart.toml");

    let config_path = Path::new("pushstart.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pushstart.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a pushstart.toml board file.              ║\n\
            ║  Please create one in the pushstart-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pushstart.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in pushstart.toml                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_tokens(&config, &mut errors);
    report("Invalid configuration in pushstart.toml", &errors);

    println!("cargo:warning=pushstart.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors, if there are any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Keys allowed in each fixed section
fn known_keys(section: &str) -> Option<&'static [&'static str]> {
    match section {
        "control" => Some(&["hold_threshold_ms", "cycle_period_ms", "settle_delay_ms"]),
        "indicator" => Some(&["fade_step", "flash_period_cycles", "reset_on_entry"]),
        "gate" => Some(&["source", "token_timeout_ms"]),
        "pins" => Some(&[
            "button",
            "interlock",
            "kill_switch",
            "relay_acc",
            "relay_ign",
            "relay_start",
        ]),
        _ => None,
    }
}

/// Reject unknown sections and keys, check the version
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match (name.as_str(), value) {
            ("version", toml::Value::Integer(v)) => {
                if *v != CONFIG_VERSION {
                    errors.push(format!("version must be {}", CONFIG_VERSION));
                }
            }
            ("version", _) => errors.push("version must be an integer".to_string()),
            ("token", toml::Value::Table(_)) => {}
            (section, toml::Value::Table(table)) => match known_keys(section) {
                Some(keys) => {
                    for key in table.keys() {
                        if !keys.contains(&key.as_str()) {
                            errors.push(format!("[{}] unknown key '{}'", section, key));
                        }
                    }
                }
                None => errors.push(format!("unknown section [{}]", section)),
            },
            (key, _) => errors.push(format!("unknown top-level key '{}'", key)),
        }
    }
}

/// Look up an integer in a section, if present
fn get_int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Check timing values and their relationships
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let ranges: [(&str, &str, i64, i64); 6] = [
        ("control", "hold_threshold_ms", 1, u32::MAX as i64),
        ("control", "cycle_period_ms", 1, u32::MAX as i64),
        ("control", "settle_delay_ms", 0, u32::MAX as i64),
        ("indicator", "fade_step", 1, u8::MAX as i64),
        ("indicator", "flash_period_cycles", 1, u16::MAX as i64),
        ("gate", "token_timeout_ms", 1, u32::MAX as i64),
    ];

    for (section, key, min, max) in ranges {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        match value.as_integer() {
            Some(v) if v >= min && v <= max => {}
            Some(_) => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
            None => errors.push(format!("[{}] {} must be an integer", section, key)),
        }
    }

    if let Some(value) = config.get("indicator").and_then(|s| s.get("reset_on_entry")) {
        if value.as_bool().is_none() {
            errors.push("[indicator] reset_on_entry must be true or false".to_string());
        }
    }

    // Defaults match pushstart-core
    let hold = get_int(config, "control", "hold_threshold_ms").unwrap_or(1000);
    let cycle = get_int(config, "control", "cycle_period_ms").unwrap_or(30);
    if hold <= cycle {
        errors.push("[control] hold_threshold_ms must exceed cycle_period_ms".to_string());
    }
}

/// Gate source, defaulting to the kill switch
fn gate_source(config: &toml::Value) -> &str {
    config
        .get("gate")
        .and_then(|g| g.get("source"))
        .and_then(|s| s.as_str())
        .unwrap_or("kill_switch")
}

/// Parse "gpioN" with optional "!" and "^" prefixes
fn parse_pin(s: &str) -> Option<u32> {
    let mut rest = s.trim();
    let mut inverted = false;
    let mut pull_up = false;
    loop {
        if let Some(r) = rest.strip_prefix('!').filter(|_| !inverted) {
            inverted = true;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('^').filter(|_| !pull_up) {
            pull_up = true;
            rest = r;
        } else {
            break;
        }
    }
    let digits = rest.strip_prefix("gpio")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pin: u32 = digits.parse().ok()?;
    (pin <= MAX_GPIO).then_some(pin)
}

/// Check pin syntax, reserved pins and duplicates
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pins) = config.get("pins").and_then(|p| p.as_table()) else {
        return;
    };
    let token_gate = gate_source(config) == "token";

    let mut used = HashSet::new();
    for (name, value) in pins {
        if name == "kill_switch" && token_gate {
            continue;
        }
        let Some(spec) = value.as_str() else {
            errors.push(format!("[pins] {} must be a string", name));
            continue;
        };
        let Some(pin) = parse_pin(spec) else {
            errors.push(format!("[pins] {} = '{}' is not a valid pin", name, spec));
            continue;
        };
        if RESERVED_PINS.contains(&pin) {
            errors.push(format!("[pins] {} uses reserved gpio{}", name, pin));
        } else if !used.insert(pin) {
            errors.push(format!("[pins] gpio{} is assigned twice", pin));
        }
    }
}

/// Check the gate source and the token allow-list
fn validate_tokens(config: &toml::Value, errors: &mut Vec<String>) {
    let source = gate_source(config);
    if source != "kill_switch" && source != "token" {
        errors.push("[gate] source must be 'kill_switch' or 'token'".to_string());
    }

    let tokens = config.get("token").and_then(|t| t.as_table());
    let count = tokens.map_or(0, |t| t.len());

    if count > MAX_TOKENS {
        errors.push(format!("at most {} [token.*] entries are allowed", MAX_TOKENS));
    }
    if source == "token" && count == 0 {
        errors.push("source = 'token' needs at least one [token.*] entry".to_string());
    }

    for (name, token) in tokens.into_iter().flatten() {
        let Some(table) = token.as_table() else {
            errors.push(format!("[token.{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if key != "uid" {
                errors.push(format!("[token.{}] unknown key '{}'", name, key));
            }
        }
        match table.get("uid").and_then(|u| u.as_str()) {
            Some(uid) => {
                // Separators between bytes are allowed ("04:A1:B2:C3")
                let digits: String = uid.chars().filter(|c| !matches!(c, ':' | '-' | ' ')).collect();
                let valid_hex = digits.len() % 2 == 0 && digits.bytes().all(|b| b.is_ascii_hexdigit());
                if !valid_hex || ![4, 7, 10].contains(&(digits.len() / 2)) {
                    errors.push(format!("[token.{}] uid must be 4, 7 or 10 hex bytes", name));
                }
            }
            None => errors.push(format!("[token.{}] missing 'uid'", name)),
        }
    }
}
