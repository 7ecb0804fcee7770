//! PWM output abstraction
//!
//! The indicator LEDs are dimmed with PWM. Chip HALs expose duty cycles in
//! their own resolution, so the trait reports its maximum and callers scale.

/// A single PWM output channel
pub trait PwmPin {
    /// Duty value that corresponds to 100% on
    fn max_duty(&self) -> u16;

    /// Set the duty cycle (0 = off, `max_duty()` = fully on)
    ///
    /// Values above `max_duty()` are clamped by the implementation.
    fn set_duty(&mut self, duty: u16);

    /// Set the duty cycle from an 8-bit level (0-255)
    fn set_level_u8(&mut self, level: u8) {
        let duty = (level as u32 * self.max_duty() as u32) / 255;
        self.set_duty(duty as u16);
    }
}
