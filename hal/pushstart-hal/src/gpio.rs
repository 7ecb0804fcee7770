//! GPIO pin abstractions
//!
//! Digital input and output traits plus the polarity convention used to
//! translate between electrical levels and logical "active" states.

/// Electrical convention of a pin
///
/// Relay boards, switches and sensors in a vehicle come in both flavours:
/// a kill switch may pull its input to ground when closed, a relay module
/// may energize its coil on a low input. The drivers use this to map the
/// raw level to a named meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Active when the pin reads/drives high
    #[default]
    ActiveHigh,
    /// Active when the pin reads/drives low
    ActiveLow,
}

impl Polarity {
    /// Build from an "inverted" flag as found in pin strings (`!gpio5`)
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Interpret a sampled level
    pub const fn is_active(self, high: bool) -> bool {
        match self {
            Polarity::ActiveHigh => high,
            Polarity::ActiveLow => !high,
        }
    }

    /// Electrical level that represents the given logical state
    pub const fn level_for(self, active: bool) -> bool {
        match self {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        }
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
