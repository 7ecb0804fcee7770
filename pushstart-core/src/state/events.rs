//! Per-cycle inputs and the outcomes they produce

use super::machine::RunState;

/// Sampled level of the start button
///
/// This is the logical meaning of the input; the electrical level
/// (pull-up, active-low wiring) is resolved by the input driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLevel {
    /// Button held down
    Pressed,
    /// Button not touched
    #[default]
    Released,
}

impl ButtonLevel {
    /// Check if the button is held down
    pub fn is_pressed(self) -> bool {
        self == ButtonLevel::Pressed
    }
}

/// Change in button level between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// Released → Pressed
    Pressed,
    /// Pressed → Released
    Released,
    /// Same level as the previous sample
    Unchanged,
}

impl ButtonEdge {
    /// Derive the edge from the previous and current sample
    pub fn detect(previous: ButtonLevel, current: ButtonLevel) -> Self {
        match (previous, current) {
            (ButtonLevel::Released, ButtonLevel::Pressed) => ButtonEdge::Pressed,
            (ButtonLevel::Pressed, ButtonLevel::Released) => ButtonEdge::Released,
            _ => ButtonEdge::Unchanged,
        }
    }
}

/// Everything the state machine samples in one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleInputs {
    /// Enablement gate result for this cycle
    pub enabled: bool,
    /// Start button level
    pub button: ButtonLevel,
    /// Safety interlock satisfied (brake/clutch/neutral)
    pub safe_to_start: bool,
    /// Monotonic time in milliseconds
    pub now_ms: u32,
}

/// An accepted state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State before the change
    pub from: RunState,
    /// State after the change
    pub to: RunState,
    /// Relays must pass through the all-off pattern and settle before
    /// the `to` pattern is applied (RUN → ACC after a long press)
    pub via_off: bool,
}

impl Transition {
    /// A direct transition
    pub const fn direct(from: RunState, to: RunState) -> Self {
        Self {
            from,
            to,
            via_off: false,
        }
    }
}

/// Recoverable conditions reported to diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Warning {
    /// Start requested by a long press but the interlock is not satisfied
    UnsafeStart {
        /// How long the button had been held when the request was refused
        held_ms: u32,
    },
}

/// Result of evaluating one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepOutcome {
    /// State change accepted this cycle, if any
    pub transition: Option<Transition>,
    /// Warning raised this cycle, if any
    pub warning: Option<Warning>,
}

impl StepOutcome {
    pub(crate) fn transition(transition: Transition) -> Self {
        Self {
            transition: Some(transition),
            warning: None,
        }
    }

    pub(crate) fn warning(warning: Warning) -> Self {
        Self {
            transition: None,
            warning: Some(warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_detection() {
        use ButtonLevel::*;

        assert_eq!(ButtonEdge::detect(Released, Pressed), ButtonEdge::Pressed);
        assert_eq!(ButtonEdge::detect(Pressed, Released), ButtonEdge::Released);
        assert_eq!(ButtonEdge::detect(Pressed, Pressed), ButtonEdge::Unchanged);
        assert_eq!(ButtonEdge::detect(Released, Released), ButtonEdge::Unchanged);
    }

    #[test]
    fn test_default_level_is_released() {
        assert_eq!(ButtonLevel::default(), ButtonLevel::Released);
        assert!(!ButtonLevel::Released.is_pressed());
        assert!(ButtonLevel::Pressed.is_pressed());
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = StepOutcome::default();
        assert!(outcome.transition.is_none());
        assert!(outcome.warning.is_none());
    }
}
