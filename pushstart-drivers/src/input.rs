//! Polarity-mapped digital inputs
//!
//! Start button, interlock and kill switch are all plain switches. The
//! wiring decides whether "closed" reads high or low; this driver hides
//! that from the core.

use pushstart_core::state::ButtonLevel;
use pushstart_core::traits::{ButtonInput, EnableSwitch, SafetyInterlock};
use pushstart_hal::{InputPin, Polarity};

/// A switch input with configured polarity
pub struct SwitchInput<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: InputPin> SwitchInput<P> {
    /// Create a new switch input
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Switch pulling the input high when closed
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }

    /// Switch to ground with a pull-up
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    /// Check if the switch is in its active (closed) position
    pub fn is_active(&self) -> bool {
        self.polarity.is_active(self.pin.is_high())
    }

    /// Configured polarity
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

impl<P: InputPin> ButtonInput for SwitchInput<P> {
    fn read_level(&mut self) -> ButtonLevel {
        if self.is_active() {
            ButtonLevel::Pressed
        } else {
            ButtonLevel::Released
        }
    }
}

impl<P: InputPin> SafetyInterlock for SwitchInput<P> {
    fn is_safe_to_start(&mut self) -> bool {
        self.is_active()
    }
}

impl<P: InputPin> EnableSwitch for SwitchInput<P> {
    fn is_closed(&mut self) -> bool {
        self.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Mock GPIO input for testing
    struct MockPin {
        high: Cell<bool>,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self {
                high: Cell::new(high),
            }
        }
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high.get()
        }
    }

    #[test]
    fn test_active_low_button() {
        // Pull-up: idle high, pressed low
        let mut button = SwitchInput::active_low(MockPin::new(true));
        assert_eq!(button.read_level(), ButtonLevel::Released);

        button.pin.high.set(false);
        assert_eq!(button.read_level(), ButtonLevel::Pressed);
    }

    #[test]
    fn test_active_high_button() {
        let mut button = SwitchInput::active_high(MockPin::new(true));
        assert_eq!(button.read_level(), ButtonLevel::Pressed);
        assert_eq!(button.polarity(), Polarity::ActiveHigh);
    }

    #[test]
    fn test_interlock_and_kill_switch() {
        let mut interlock = SwitchInput::active_low(MockPin::new(false));
        assert!(interlock.is_safe_to_start());

        let mut kill = SwitchInput::active_low(MockPin::new(true));
        assert!(!kill.is_closed());
        kill.pin.high.set(false);
        assert!(kill.is_closed());
    }
}
