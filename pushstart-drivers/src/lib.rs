//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pushstart-core for the controller's hardware:
//!
//! - Switch inputs with configurable polarity (button, interlock, kill switch)
//! - GPIO relay bank (ACC, IGN, START)
//! - PWM indicator pair
//! - PN532 NFC reader over I2C

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod indicator;
pub mod input;
pub mod nfc;
pub mod relay;

pub use indicator::PwmIndicator;
pub use input::SwitchInput;
pub use relay::{GpioRelay, GpioRelayBank};
