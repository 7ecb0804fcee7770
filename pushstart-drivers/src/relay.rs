//! GPIO relay bank
//!
//! Three relay coils (ACC, IGN, START) driven through transistor or
//! opto-isolated relay modules. Many cheap modules are active-low, so
//! polarity is configured per channel.

use pushstart_core::output::RelayChannel;
use pushstart_core::traits::RelayDriver;
use pushstart_hal::{OutputPin, Polarity};

/// One relay output
pub struct GpioRelay<P> {
    pin: P,
    polarity: Polarity,
    energized: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output, released
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut relay = Self {
            pin,
            polarity,
            energized: false,
        };
        // Ensure coil starts released
        relay.set(false);
        relay
    }

    /// Energize or release the coil
    pub fn set(&mut self, energized: bool) {
        self.energized = energized;
        self.pin.set_state(self.polarity.level_for(energized));
    }

    /// Current logical state
    pub fn is_energized(&self) -> bool {
        self.energized
    }
}

/// The three ignition relays
pub struct GpioRelayBank<A, I, S> {
    acc: GpioRelay<A>,
    ign: GpioRelay<I>,
    start: GpioRelay<S>,
}

impl<A, I, S> GpioRelayBank<A, I, S>
where
    A: OutputPin,
    I: OutputPin,
    S: OutputPin,
{
    /// Build the bank; all relays start released
    pub fn new(acc: GpioRelay<A>, ign: GpioRelay<I>, start: GpioRelay<S>) -> Self {
        Self { acc, ign, start }
    }

    /// Logical state of one channel
    pub fn is_energized(&self, channel: RelayChannel) -> bool {
        match channel {
            RelayChannel::Acc => self.acc.is_energized(),
            RelayChannel::Ign => self.ign.is_energized(),
            RelayChannel::Start => self.start.is_energized(),
        }
    }
}

impl<A, I, S> RelayDriver for GpioRelayBank<A, I, S>
where
    A: OutputPin,
    I: OutputPin,
    S: OutputPin,
{
    fn set_relay(&mut self, channel: RelayChannel, energized: bool) {
        match channel {
            RelayChannel::Acc => self.acc.set(energized),
            RelayChannel::Ign => self.ign.set(energized),
            RelayChannel::Start => self.start.set(energized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushstart_core::output::RelayPattern;
    use pushstart_core::state::RunState;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self { high, writes: 0 }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_relay() {
        let mut relay = GpioRelay::new(MockPin::new(true), Polarity::ActiveHigh);
        assert!(!relay.is_energized());
        assert!(!relay.pin.is_set_high());

        relay.set(true);
        assert!(relay.is_energized());
        assert!(relay.pin.is_set_high());
    }

    #[test]
    fn test_active_low_relay() {
        let mut relay = GpioRelay::new(MockPin::new(false), Polarity::ActiveLow);
        // Released coil is a high pin on an active-low module
        assert!(!relay.is_energized());
        assert!(relay.pin.is_set_high());

        relay.set(true);
        assert!(!relay.pin.is_set_high());
    }

    fn bank() -> GpioRelayBank<MockPin, MockPin, MockPin> {
        GpioRelayBank::new(
            GpioRelay::new(MockPin::new(false), Polarity::ActiveHigh),
            GpioRelay::new(MockPin::new(false), Polarity::ActiveLow),
            GpioRelay::new(MockPin::new(false), Polarity::ActiveHigh),
        )
    }

    #[test]
    fn test_bank_starts_released() {
        let bank = bank();
        for channel in RelayChannel::ALL {
            assert!(!bank.is_energized(channel));
        }
        assert_eq!(bank.acc.pin.writes, 1);
    }

    #[test]
    fn test_apply_start_pattern() {
        let mut bank = bank();
        bank.apply(RelayPattern::for_state(RunState::Start));

        assert!(!bank.is_energized(RelayChannel::Acc));
        assert!(bank.is_energized(RelayChannel::Ign));
        assert!(bank.is_energized(RelayChannel::Start));
        // IGN is active-low
        assert!(!bank.ign.pin.is_set_high());
        assert!(bank.start.pin.is_set_high());

        bank.apply(RelayPattern::ALL_OFF);
        for channel in RelayChannel::ALL {
            assert!(!bank.is_energized(channel));
        }
        assert!(bank.ign.pin.is_set_high());
    }
}
