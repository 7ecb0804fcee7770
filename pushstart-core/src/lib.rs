//! Board-agnostic core logic for the push-button ignition controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits for the button, interlock, gate inputs and outputs
//! - Run-state machine (DISABLED, OFF, ACC, START, RUN)
//! - Enablement gates (kill switch, NFC token allow-list)
//! - Relay pattern and indicator animation mappers
//! - Control-cycle controller
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod gate;
pub mod output;
pub mod state;
pub mod traits;
