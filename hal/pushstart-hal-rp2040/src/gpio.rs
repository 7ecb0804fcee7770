//! GPIO allocation and pin-string parsing
//!
//! Tracks which GPIO pins are in use to prevent conflicts, and turns the
//! config file's pin strings into pin numbers and electrical options.

use heapless::FnvIndexSet;

use crate::pins::{PinError, RESERVED_PINS};

/// User GPIOs on the RP2040 (GPIO0-29)
pub const GPIO_COUNT: usize = 30;

/// Tracks which config pins are spoken for
///
/// Used when validating the config file, before any pin is configured.
#[derive(Default)]
pub struct GpioAllocator {
    taken: FnvIndexSet<u8, 32>,
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a GPIO pin
    ///
    /// Pins wired to the token reader bus or the indicator PWM slice are
    /// never handed out.
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        if pin as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if RESERVED_PINS.contains(&pin) {
            return Err(PinError::Reserved);
        }
        match self.taken.insert(pin) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PinError::AlreadyTaken),
            Err(_) => Err(PinError::InvalidPin),
        }
    }

    /// Check if a pin has been claimed
    pub fn is_taken(&self, pin: u8) -> bool {
        self.taken.contains(&pin)
    }
}

/// A parsed pin string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    /// GPIO number
    pub pin: u8,
    /// Active-low
    pub inverted: bool,
    /// Internal pull-up requested
    pub pull_up: bool,
}

/// Parse a config pin string
///
/// Supports formats:
/// - "gpio11" -> pin 11
/// - "!gpio12" -> pin 12, inverted (active-low)
/// - "^gpio4" -> pin 4, pull-up
/// - "!^gpio2" or "^!gpio2" -> both
pub fn parse_pin_string(s: &str) -> Option<PinSpec> {
    let mut s = s.trim();
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            if inverted {
                return None;
            }
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            if pull_up {
                return None;
            }
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let num_str = s.strip_prefix("gpio")?;
    if num_str.is_empty() || !num_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pin: u8 = num_str.parse().ok()?;

    if pin >= GPIO_COUNT as u8 {
        return None;
    }

    Some(PinSpec {
        pin,
        inverted,
        pull_up,
    })
}
