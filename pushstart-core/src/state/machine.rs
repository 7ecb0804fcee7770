//! Run-state machine
//!
//! Every relay and indicator output is a function of the current run state.
//! The machine is explicit, finite and deterministic: given the same
//! sequence of [`CycleInputs`] it always produces the same states.

use super::events::{ButtonEdge, ButtonLevel, CycleInputs, StepOutcome, Transition, Warning};

/// Vehicle electrical mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Gate closed (kill switch open or no token); nothing energized
    #[default]
    Disabled,
    /// Armed and waiting for the button; nothing energized
    Off,
    /// Accessory circuit powered
    Acc,
    /// Ignition and starter energized while the button is held
    Start,
    /// Engine running on ignition
    Run,
}

impl RunState {
    /// Check if any vehicle circuit is live in this state
    pub fn is_live(&self) -> bool {
        matches!(self, RunState::Acc | RunState::Start | RunState::Run)
    }

    /// Check if the enablement gate must re-validate its source
    ///
    /// Token-based gates only look for a token while the vehicle is not in
    /// use; once a circuit is live, losing the token does not kill it.
    pub fn needs_authentication(&self) -> bool {
        matches!(self, RunState::Disabled | RunState::Off)
    }
}

/// Run-state machine with button gesture tracking
///
/// Owns the single authoritative [`RunState`]. It is evaluated once per
/// control cycle with [`RunStateMachine::step`].
#[derive(Debug, Clone)]
pub struct RunStateMachine {
    state: RunState,
    /// Button level seen in the previous cycle
    last_button: ButtonLevel,
    /// Time of the last Pressed edge, cleared when consumed
    pressed_at_ms: Option<u32>,
    /// Tap/hold boundary
    hold_threshold_ms: u32,
    /// Unsafe-start warning already raised for the current press
    unsafe_reported: bool,
}

impl RunStateMachine {
    /// Create a machine in the `Disabled` state
    pub fn new(hold_threshold_ms: u32) -> Self {
        Self {
            state: RunState::Disabled,
            last_button: ButtonLevel::Released,
            pressed_at_ms: None,
            hold_threshold_ms,
            unsafe_reported: false,
        }
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// How long the button has been held, if a press is being tracked
    pub fn held_for(&self, now_ms: u32) -> Option<u32> {
        self.pressed_at_ms.map(|t| now_ms.wrapping_sub(t))
    }

    /// Evaluate one control cycle
    ///
    /// The gate is checked first and overrides everything else. Button
    /// decisions are made on edges, except the ACC → START check which
    /// runs every cycle the button stays pressed.
    pub fn step(&mut self, inputs: CycleInputs) -> StepOutcome {
        let edge = ButtonEdge::detect(self.last_button, inputs.button);
        self.last_button = inputs.button;

        if !inputs.enabled {
            self.pressed_at_ms = None;
            self.unsafe_reported = false;
            return self.enter(RunState::Disabled, false);
        }

        if self.state == RunState::Disabled {
            return self.enter(RunState::Off, false);
        }

        match edge {
            ButtonEdge::Pressed => {
                self.pressed_at_ms = Some(inputs.now_ms);
                self.unsafe_reported = false;
                StepOutcome::default()
            }
            ButtonEdge::Released => {
                // A press that began while disabled has no timestamp; treat it as a tap
                let held_ms = self
                    .pressed_at_ms
                    .take()
                    .map(|t| inputs.now_ms.wrapping_sub(t))
                    .unwrap_or(0);
                self.unsafe_reported = false;
                self.on_release(held_ms)
            }
            ButtonEdge::Unchanged if inputs.button.is_pressed() => {
                self.on_held(inputs.now_ms, inputs.safe_to_start)
            }
            ButtonEdge::Unchanged => StepOutcome::default(),
        }
    }

    fn on_release(&mut self, held_ms: u32) -> StepOutcome {
        let is_hold = held_ms > self.hold_threshold_ms;

        match (self.state, is_hold) {
            (RunState::Off, _) => self.enter(RunState::Acc, false),
            (RunState::Acc, false) => self.enter(RunState::Off, false),
            (RunState::Start, _) => self.enter(RunState::Run, false),
            (RunState::Run, false) => self.enter(RunState::Off, false),
            (RunState::Run, true) => self.enter(RunState::Acc, true),
            // Long press in ACC that was refused as unsafe: stay in ACC
            _ => StepOutcome::default(),
        }
    }

    fn on_held(&mut self, now_ms: u32, safe_to_start: bool) -> StepOutcome {
        if self.state != RunState::Acc {
            return StepOutcome::default();
        }

        let Some(held_ms) = self.held_for(now_ms) else {
            return StepOutcome::default();
        };

        if held_ms <= self.hold_threshold_ms {
            return StepOutcome::default();
        }

        if safe_to_start {
            return self.enter(RunState::Start, false);
        }

        if self.unsafe_reported {
            return StepOutcome::default();
        }
        self.unsafe_reported = true;
        StepOutcome::warning(Warning::UnsafeStart { held_ms })
    }

    fn enter(&mut self, next: RunState, via_off: bool) -> StepOutcome {
        if next == self.state {
            return StepOutcome::default();
        }

        let transition = Transition {
            from: self.state,
            to: next,
            via_off,
        };
        self.state = next;
        StepOutcome::transition(transition)
    }
}
