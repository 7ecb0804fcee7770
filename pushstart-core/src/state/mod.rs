//! Run-state machine
//!
//! Defines the authoritative vehicle electrical mode and the button
//! gesture rules that move between modes.

pub mod events;
pub mod machine;

pub use events::{ButtonEdge, ButtonLevel, CycleInputs, StepOutcome, Transition, Warning};
pub use machine::{RunState, RunStateMachine};
