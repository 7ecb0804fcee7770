//! Hardware configuration types
//!
//! Pin assignments for the digital inputs and relay outputs, and the
//! top-level configuration that bundles everything the firmware loads.

use super::types::{ControlConfig, GateConfig, IndicatorConfig};

/// Configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Active-high pin without pull-up
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Active-low pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Active-low pin with pull-up, the usual wiring for a switch to ground
    pub const fn switch_to_ground(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Config-assigned GPIO pins
///
/// The indicator PWM pins and the token reader's I2C pins are tied to
/// specific peripherals and are fixed by the board, not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// Momentary start button
    pub button: PinConfig,
    /// Brake/clutch/neutral interlock, active = safe to start
    pub interlock: PinConfig,
    /// Kill switch, active = enabled (unused with the token gate)
    pub kill_switch: PinConfig,
    /// Accessory relay
    pub relay_acc: PinConfig,
    /// Ignition relay
    pub relay_ign: PinConfig,
    /// Starter relay
    pub relay_start: PinConfig,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            button: PinConfig::switch_to_ground(2),
            interlock: PinConfig::switch_to_ground(3),
            kill_switch: PinConfig::switch_to_ground(6),
            relay_acc: PinConfig::new(10),
            relay_ign: PinConfig::new(11),
            relay_start: PinConfig::new(12),
        }
    }
}

impl PinMap {
    /// Inputs in (name, pin) form for logging and allocation
    pub fn inputs(&self) -> [(&'static str, PinConfig); 3] {
        [
            ("button", self.button),
            ("interlock", self.interlock),
            ("kill_switch", self.kill_switch),
        ]
    }

    /// Relay outputs in (name, pin) form
    pub fn relays(&self) -> [(&'static str, PinConfig); 3] {
        [
            ("relay_acc", self.relay_acc),
            ("relay_ign", self.relay_ign),
            ("relay_start", self.relay_start),
        ]
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PushstartConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Cycle and gesture timing
    pub control: ControlConfig,
    /// Indicator animation
    pub indicator: IndicatorConfig,
    /// Enablement source
    pub gate: GateConfig,
    /// GPIO assignments
    pub pins: PinMap,
}

impl Default for PushstartConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            control: ControlConfig::default(),
            indicator: IndicatorConfig::default(),
            gate: GateConfig::default(),
            pins: PinMap::default(),
        }
    }
}

impl PushstartConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }
}
