//! PWM indicator LEDs
//!
//! The button ring and the dash lamp show the same brightness.

use pushstart_core::traits::IndicatorOutput;
use pushstart_hal::PwmPin;

/// Primary and secondary indicator driven together
pub struct PwmIndicator<P, S> {
    primary: P,
    secondary: S,
    level: u8,
}

impl<P: PwmPin, S: PwmPin> PwmIndicator<P, S> {
    /// Create the indicator pair, dark
    pub fn new(primary: P, secondary: S) -> Self {
        let mut indicator = Self {
            primary,
            secondary,
            level: 0,
        };
        indicator.set_brightness(0);
        indicator
    }

    /// Last brightness applied
    pub fn level(&self) -> u8 {
        self.level
    }
}

impl<P: PwmPin, S: PwmPin> IndicatorOutput for PwmIndicator<P, S> {
    fn set_brightness(&mut self, level: u8) {
        self.level = level;
        self.primary.set_level_u8(level);
        self.secondary.set_level_u8(level);
    }
}
