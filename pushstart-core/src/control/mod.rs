//! Control cycle
//!
//! Binds the run-state machine to the output mappers. One call to
//! [`Controller::cycle`] per 30 ms tick.

pub mod controller;

pub use controller::{Controller, CycleReport};
