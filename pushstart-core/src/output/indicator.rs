//! Indicator LED animation
//!
//! The button ring and dash indicator show the run state:
//!
//! - DISABLED: dark
//! - OFF: slow breathing (triangle-wave fade)
//! - ACC: slow flash
//! - START: rapid flash, toggling every cycle
//! - RUN: solid on
//!
//! The animation counters are shared across states. By default they are
//! not reset on a state change, so e.g. the breathing in OFF picks up from
//! whatever brightness the previous state left behind.

use crate::config::IndicatorConfig;
use crate::state::RunState;

/// Full brightness
pub const BRIGHTNESS_MAX: u8 = 255;

/// Direction of the OFF-state fade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeDirection {
    #[default]
    Rising,
    Falling,
}

/// Animation state carried from one cycle to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    /// Current brightness (0-255)
    pub brightness: u8,
    /// Fade direction for the breathing effect
    pub direction: FadeDirection,
    /// Cycles since the last slow-flash toggle
    pub tick: u16,
}

impl Animation {
    /// Dark, rising, counter at zero
    pub const fn new() -> Self {
        Self {
            brightness: 0,
            direction: FadeDirection::Rising,
            tick: 0,
        }
    }

    /// Compute this cycle's brightness and the next animation state
    ///
    /// Total over [`RunState`]; pure so it can be tested without hardware.
    pub fn next(self, state: RunState, config: &IndicatorConfig) -> (u8, Animation) {
        let mut next = self;

        match state {
            RunState::Disabled => next.brightness = 0,
            RunState::Off => next.fade(config.fade_step),
            RunState::Acc => {
                next.tick = next.tick.saturating_add(1);
                if next.tick >= config.flash_period_cycles.max(1) {
                    next.tick = 0;
                    next.toggle();
                }
            }
            RunState::Start => next.toggle(),
            RunState::Run => next.brightness = BRIGHTNESS_MAX,
        }

        (next.brightness, next)
    }

    /// Advance in place and return the brightness to apply
    pub fn advance(&mut self, state: RunState, config: &IndicatorConfig) -> u8 {
        let (brightness, next) = self.next(state, config);
        *self = next;
        brightness
    }

    /// Back to dark with counters cleared
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn fade(&mut self, step: u8) {
        match self.direction {
            FadeDirection::Rising => {
                self.brightness = self.brightness.saturating_add(step);
                if self.brightness == BRIGHTNESS_MAX {
                    self.direction = FadeDirection::Falling;
                }
            }
            FadeDirection::Falling => {
                self.brightness = self.brightness.saturating_sub(step);
                if self.brightness == 0 {
                    self.direction = FadeDirection::Rising;
                }
            }
        }
    }

    fn toggle(&mut self) {
        self.brightness = if self.brightness > 0 { 0 } else { BRIGHTNESS_MAX };
    }
}
