//! Control-cycle controller
//!
//! Owns the run-state machine and the indicator animation, and turns one
//! cycle's inputs into the relay and indicator commands for that cycle.
//! Performs no I/O itself so the whole cycle is testable on the host.

use crate::config::{AnimationPolicy, ControlConfig, IndicatorConfig};
use crate::gate::EnablementGate;
use crate::output::{Animation, RelayPattern, RelayUpdate};
use crate::state::{CycleInputs, RunState, RunStateMachine, Transition, Warning};
use crate::traits::{ButtonInput, Clock, SafetyInterlock};

/// What one control cycle decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Run state after the cycle
    pub state: RunState,
    /// Transition accepted this cycle
    pub transition: Option<Transition>,
    /// Warning raised this cycle
    pub warning: Option<Warning>,
    /// Relay command for this cycle
    pub relays: RelayUpdate,
    /// Indicator brightness for this cycle
    pub brightness: u8,
}

/// Control loop state
///
/// Exactly one instance exists, owned by the control task.
#[derive(Debug, Clone)]
pub struct Controller {
    machine: RunStateMachine,
    animation: Animation,
    indicator: IndicatorConfig,
    settle_delay_ms: u32,
}

impl Controller {
    /// Create a controller in the `Disabled` state
    pub fn new(control: &ControlConfig, indicator: IndicatorConfig) -> Self {
        Self {
            machine: RunStateMachine::new(control.hold_threshold_ms),
            animation: Animation::new(),
            indicator,
            settle_delay_ms: control.settle_delay_ms,
        }
    }

    /// Pattern to drive once before the first cycle
    pub fn boot_pattern(&self) -> RelayPattern {
        RelayPattern::for_state(self.machine.state())
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.machine.state()
    }

    /// Current animation counters
    pub fn animation(&self) -> Animation {
        self.animation
    }

    /// Gather this cycle's inputs
    ///
    /// The gate is polled first with the state from the previous cycle,
    /// then the button and the interlock are sampled.
    pub fn sample<G, B, S, C>(
        &self,
        gate: &mut G,
        button: &mut B,
        interlock: &mut S,
        clock: &C,
    ) -> CycleInputs
    where
        G: EnablementGate,
        B: ButtonInput,
        S: SafetyInterlock,
        C: Clock,
    {
        let enabled = gate.is_enabled(self.machine.state());
        CycleInputs {
            enabled,
            button: button.read_level(),
            safe_to_start: interlock.is_safe_to_start(),
            now_ms: clock.now_ms(),
        }
    }

    /// Run one control cycle
    pub fn cycle(&mut self, inputs: CycleInputs) -> CycleReport {
        let outcome = self.machine.step(inputs);

        let relays = match outcome.transition {
            None => RelayUpdate::Hold,
            Some(t) => {
                if self.indicator.policy == AnimationPolicy::ResetOnEntry {
                    self.animation.reset();
                }
                let pattern = RelayPattern::for_state(t.to);
                if t.via_off {
                    RelayUpdate::Settle {
                        settle_ms: self.settle_delay_ms,
                        then: pattern,
                    }
                } else {
                    RelayUpdate::Drive(pattern)
                }
            }
        };

        let brightness = self.animation.advance(self.machine.state(), &self.indicator);

        CycleReport {
            state: self.machine.state(),
            transition: outcome.transition,
            warning: outcome.warning,
            relays,
            brightness,
        }
    }
}
