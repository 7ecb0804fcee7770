//! Configuration type definitions
//!
//! Timing, indicator and gate settings. Defaults match the stock board;
//! the firmware overrides them from its TOML file.

use crate::gate::AllowList;

/// Tap/hold boundary (ms)
pub const DEFAULT_HOLD_THRESHOLD_MS: u32 = 1000;

/// Control cycle period (ms)
pub const DEFAULT_CYCLE_PERIOD_MS: u32 = 30;

/// Pause between all-off and ACC when leaving RUN with a long press (ms)
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 500;

/// Slow flash toggle period in cycles (≈300 ms at 30 ms)
pub const DEFAULT_FLASH_PERIOD_CYCLES: u16 = 10;

/// Brightness change per cycle while breathing
pub const DEFAULT_FADE_STEP: u8 = 5;

/// Bounded wait for a token per read attempt (ms)
pub const DEFAULT_TOKEN_TIMEOUT_MS: u32 = 50;

/// State machine and cycle timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Press longer than this is a hold (ms)
    pub hold_threshold_ms: u32,
    /// Delay between control cycles (ms)
    pub cycle_period_ms: u32,
    /// Relay settle pause for RUN → OFF → ACC (ms)
    pub settle_delay_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: DEFAULT_HOLD_THRESHOLD_MS,
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

/// What happens to the LED animation counters on a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationPolicy {
    /// Keep brightness, fade direction and tick counter
    #[default]
    Continuous,
    /// Clear them on every accepted transition
    ResetOnEntry,
}

/// Indicator LED settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// Brightness step per cycle in OFF
    pub fade_step: u8,
    /// Cycles between toggles in ACC
    pub flash_period_cycles: u16,
    /// Counter handling on state change
    pub policy: AnimationPolicy,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            fade_step: DEFAULT_FADE_STEP,
            flash_period_cycles: DEFAULT_FLASH_PERIOD_CYCLES,
            policy: AnimationPolicy::Continuous,
        }
    }
}

/// Source of the "system enabled" signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateSource {
    /// Level-sensed kill switch
    #[default]
    KillSwitch,
    /// NFC token matched against the allow-list
    Token,
}

/// Enablement gate settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateConfig {
    /// Which input enables the system
    pub source: GateSource,
    /// Read timeout for the token reader (ms)
    pub token_timeout_ms: u32,
    /// Authorized token identifiers
    pub allow_list: AllowList,
}

impl GateConfig {
    /// Kill-switch gate with default timings
    pub fn kill_switch() -> Self {
        Self {
            source: GateSource::KillSwitch,
            token_timeout_ms: DEFAULT_TOKEN_TIMEOUT_MS,
            allow_list: AllowList::new(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::kill_switch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_defaults() {
        let cfg = ControlConfig::default();
        assert_eq!(cfg.hold_threshold_ms, 1000);
        assert_eq!(cfg.cycle_period_ms, 30);
        assert_eq!(cfg.settle_delay_ms, 500);
    }

    #[test]
    fn test_flash_period_is_about_300ms() {
        let control = ControlConfig::default();
        let indicator = IndicatorConfig::default();
        let period_ms = indicator.flash_period_cycles as u32 * control.cycle_period_ms;
        assert_eq!(period_ms, 300);
    }

    #[test]
    fn test_gate_default_is_kill_switch() {
        let gate = GateConfig::kill_switch();
        assert_eq!(gate.source, GateSource::KillSwitch);
        assert!(gate.allow_list.is_empty());
        assert_eq!(gate.token_timeout_ms, DEFAULT_TOKEN_TIMEOUT_MS);
    }
}
