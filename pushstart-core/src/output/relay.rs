//! Relay energization pattern
//!
//! The three ignition relays replace the contacts of a key switch:
//!
//! | State    | ACC | IGN | START |
//! |----------|-----|-----|-------|
//! | DISABLED |     |     |       |
//! | OFF      |     |     |       |
//! | ACC      |  x  |     |       |
//! | START    |     |  x  |   x   |
//! | RUN      |     |  x  |       |

use crate::state::RunState;

/// One of the three relay outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayChannel {
    /// Accessory circuit
    Acc,
    /// Ignition circuit
    Ign,
    /// Starter solenoid
    Start,
}

impl RelayChannel {
    /// All channels in driving order
    pub const ALL: [RelayChannel; 3] = [RelayChannel::Acc, RelayChannel::Ign, RelayChannel::Start];
}

/// Energized/deenergized flag for each relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayPattern {
    pub acc: bool,
    pub ign: bool,
    pub start: bool,
}

impl RelayPattern {
    /// Everything deenergized
    pub const ALL_OFF: Self = Self {
        acc: false,
        ign: false,
        start: false,
    };

    /// Relay pattern for a run state
    pub const fn for_state(state: RunState) -> Self {
        match state {
            RunState::Disabled | RunState::Off => Self::ALL_OFF,
            RunState::Acc => Self {
                acc: true,
                ign: false,
                start: false,
            },
            RunState::Start => Self {
                acc: false,
                ign: true,
                start: true,
            },
            RunState::Run => Self {
                acc: false,
                ign: true,
                start: false,
            },
        }
    }

    /// Check whether a channel is energized
    pub fn is_energized(&self, channel: RelayChannel) -> bool {
        match channel {
            RelayChannel::Acc => self.acc,
            RelayChannel::Ign => self.ign,
            RelayChannel::Start => self.start,
        }
    }

    /// Check if no relay is energized
    pub fn is_all_off(&self) -> bool {
        *self == Self::ALL_OFF
    }

    /// Iterate over (channel, energized) pairs in driving order
    pub fn channels(&self) -> impl Iterator<Item = (RelayChannel, bool)> + '_ {
        RelayChannel::ALL
            .into_iter()
            .map(move |ch| (ch, self.is_energized(ch)))
    }
}

/// How the relays must be driven after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayUpdate {
    /// No transition; leave relays as they are
    Hold,
    /// Drive the pattern immediately
    Drive(RelayPattern),
    /// Drive all-off, wait `settle_ms`, then drive `then`
    ///
    /// Emulates turning a key fully off before returning to accessory.
    Settle {
        settle_ms: u32,
        then: RelayPattern,
    },
}

impl RelayUpdate {
    /// Pattern the relays end up in, if this update changes them
    pub fn final_pattern(&self) -> Option<RelayPattern> {
        match self {
            RelayUpdate::Hold => None,
            RelayUpdate::Drive(p) => Some(*p),
            RelayUpdate::Settle { then, .. } => Some(*then),
        }
    }
}
