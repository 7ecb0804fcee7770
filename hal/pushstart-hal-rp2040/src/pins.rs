//! Config-driven pin assignment
//!
//! The button, interlock, kill switch and relay pins come from the TOML
//! config, so they are taken from a bank by number at runtime. The token
//! reader's I2C pins and the indicator PWM pins are tied to specific
//! peripherals and are handed out separately in [`BoardPeripherals`].

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{I2C0, PIN_14, PIN_15, PIN_4, PIN_5, PWM_SLICE7};
use embassy_rp::{Peri, Peripherals};

use crate::gpio::GPIO_COUNT;

/// Pins owned by fixed board functions
///
/// GPIO4/5 are I2C0 SDA/SCL for the token reader; GPIO14/15 are PWM
/// slice 7 A/B for the indicator LEDs.
pub const RESERVED_PINS: [u8; 4] = [4, 5, 14, 15];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for a board function
    Reserved,
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Split the chip peripherals into the pin bank and the board-fixed set
    pub fn from_peripherals(p: Peripherals) -> (Self, BoardPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                None, // I2C0 SDA
                None, // I2C0 SCL
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                None, // indicator A
                None, // indicator B
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        let board = BoardPeripherals {
            i2c0: p.I2C0,
            i2c0_sda: p.PIN_4,
            i2c0_scl: p.PIN_5,
            pwm_slice7: p.PWM_SLICE7,
            indicator_primary: p.PIN_14,
            indicator_secondary: p.PIN_15,
        };
        (bank, board)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if RESERVED_PINS.contains(&pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

/// Peripherals with a fixed board function
pub struct BoardPeripherals {
    /// Token reader bus
    pub i2c0: Peri<'static, I2C0>,
    pub i2c0_sda: Peri<'static, PIN_4>,
    pub i2c0_scl: Peri<'static, PIN_5>,
    /// Indicator LEDs
    pub pwm_slice7: Peri<'static, PWM_SLICE7>,
    pub indicator_primary: Peri<'static, PIN_14>,
    pub indicator_secondary: Peri<'static, PIN_15>,
}
