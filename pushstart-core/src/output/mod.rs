//! Output mappers
//!
//! Two independent mappings from run state to outputs: the relay pattern
//! (pure, applied on transitions) and the indicator animation (applied
//! every cycle).

pub mod indicator;
pub mod relay;

pub use indicator::{Animation, FadeDirection, BRIGHTNESS_MAX};
pub use relay::{RelayChannel, RelayPattern, RelayUpdate};
