//! Board-agnostic pin traits for embassy-rp types

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use embedded_hal::pwm::SetDutyCycle;
use pushstart_hal::{InputPin, OutputPin, PwmPin};

use crate::gpio::PinSpec;

/// GPIO input
pub struct RpInput(Input<'static>);

impl RpInput {
    /// Configure a pin as input with the pull requested in the config
    pub fn new(pin: Peri<'static, AnyPin>, spec: PinSpec) -> Self {
        let pull = if spec.pull_up { Pull::Up } else { Pull::None };
        Self(Input::new(pin, pull))
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// GPIO push-pull output
pub struct RpOutput(Output<'static>);

impl RpOutput {
    /// Configure a pin as output at the given initial level
    ///
    /// Relay pins pass the level of a released coil so nothing clicks
    /// during bring-up.
    pub fn new(pin: Peri<'static, AnyPin>, high: bool) -> Self {
        let level = if high { Level::High } else { Level::Low };
        Self(Output::new(pin, level))
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// PWM channel adapter for any embedded-hal `SetDutyCycle`
pub struct RpPwm<P>(P);

impl<P: SetDutyCycle> RpPwm<P> {
    pub fn new(channel: P) -> Self {
        Self(channel)
    }
}

impl<P: SetDutyCycle> PwmPin for RpPwm<P> {
    fn max_duty(&self) -> u16 {
        self.0.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.0.max_duty_cycle());
        // Duty is clamped, so the channel cannot reject it
        let _ = self.0.set_duty_cycle(duty);
    }
}
