//! RP2040-specific HAL for the push-button ignition firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `pushstart-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO allocation and pin-string parsing
//! - Pin bank for config-driven pin assignment
//! - Input, output and PWM adapters over embassy-rp

#![no_std]

pub mod gpio;
pub mod io;
pub mod pins;

pub use gpio::{parse_pin_string, GpioAllocator, PinSpec};
pub use io::{RpInput, RpOutput, RpPwm};
pub use pins::{BoardPeripherals, PinBank, PinError, RESERVED_PINS};
