//! Input and output capabilities consumed by the control cycle
//!
//! All of these speak in named, logical terms (`Pressed`, safe, closed,
//! energized). Electrical polarity is the implementor's business.

use crate::gate::TokenId;
use crate::output::{RelayChannel, RelayPattern};
use crate::state::ButtonLevel;

/// Momentary start button
pub trait ButtonInput {
    /// Sample the button once
    fn read_level(&mut self) -> ButtonLevel;
}

/// Brake/clutch/neutral interlock
pub trait SafetyInterlock {
    /// True when cranking is permitted
    fn is_safe_to_start(&mut self) -> bool;
}

/// Level-sensed kill switch
pub trait EnableSwitch {
    /// True when the switch is in the enabled position
    fn is_closed(&mut self) -> bool;
}

/// Token authenticator (NFC reader)
pub trait TokenReader {
    /// Reader/bus error
    type Error;

    /// Look for a token for at most `timeout_ms`
    ///
    /// Returns `Ok(None)` when no token was presented in time.
    fn read_token(&mut self, timeout_ms: u32) -> Result<Option<TokenId>, Self::Error>;
}

/// The three ignition relays
pub trait RelayDriver {
    /// Energize or release one relay
    fn set_relay(&mut self, channel: RelayChannel, energized: bool);

    /// Drive all three relays to a pattern
    fn apply(&mut self, pattern: RelayPattern) {
        for (channel, energized) in pattern.channels() {
            self.set_relay(channel, energized);
        }
    }
}

/// Indicator LEDs (primary and secondary driven together)
pub trait IndicatorOutput {
    /// Set brightness, 0 = off, 255 = full
    fn set_brightness(&mut self, level: u8);
}

/// Monotonic millisecond clock
///
/// Wraps at `u32::MAX`; consumers use wrapping arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
