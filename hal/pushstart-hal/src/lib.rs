//! Pushstart Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the ignition
//! drivers are written against. Chip-specific HALs implement them so the
//! same drivers run on the target board and against host-side mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pushstart-firmware                     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pushstart-drivers (relays, inputs,     │
//! │  indicator, token reader)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pushstart-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ pushstart-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmPin`] - Duty-cycle outputs for the indicator LEDs
//!
//! [`gpio::Polarity`] carries the active-high/active-low convention of a
//! pin so that only the driver layer ever deals with electrical levels.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, Polarity};
pub use pwm::PwmPin;
