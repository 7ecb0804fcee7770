//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and the
//! board-specific drivers.

pub mod io;

pub use io::{
    ButtonInput, Clock, EnableSwitch, IndicatorOutput, RelayDriver, SafetyInterlock, TokenReader,
};
