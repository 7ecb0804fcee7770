//! Enablement gate implementations

use super::token::{AllowList, TokenId};
use crate::state::RunState;
use crate::traits::{EnableSwitch, TokenReader};

/// Produces the "system enabled" signal once per cycle
pub trait EnablementGate {
    /// Evaluate the gate
    ///
    /// `state` is the run state before this cycle's evaluation; gates may
    /// use it to skip re-authentication while the vehicle is live.
    fn is_enabled(&mut self, state: RunState) -> bool;
}

/// Gate driven by a level-sensed kill switch
pub struct KillSwitchGate<S> {
    switch: S,
}

impl<S: EnableSwitch> KillSwitchGate<S> {
    /// Create a gate that is open while the switch is closed
    pub fn new(switch: S) -> Self {
        Self { switch }
    }
}

impl<S: EnableSwitch> EnablementGate for KillSwitchGate<S> {
    fn is_enabled(&mut self, _state: RunState) -> bool {
        self.switch.is_closed()
    }
}

/// Gate driven by token presence
///
/// While the vehicle is live (ACC, START, RUN) the gate stays open without
/// reading, so a token drifting out of range never stalls a running
/// engine. In DISABLED and OFF every cycle performs one bounded read.
pub struct TokenGate<R: TokenReader> {
    reader: R,
    allow_list: AllowList,
    timeout_ms: u32,
    last_error: Option<R::Error>,
    /// Result of the last successful read
    last_seen: Option<TokenId>,
    /// Unauthorized token not yet reported
    rejected: Option<TokenId>,
    rejected_count: u32,
}

impl<R: TokenReader> TokenGate<R> {
    /// Create a gate that reads at most `timeout_ms` per cycle
    pub fn new(reader: R, allow_list: AllowList, timeout_ms: u32) -> Self {
        Self {
            reader,
            allow_list,
            timeout_ms,
            last_error: None,
            last_seen: None,
            rejected: None,
            rejected_count: 0,
        }
    }

    /// Take the most recent reader error, if one occurred since the last call
    pub fn take_error(&mut self) -> Option<R::Error> {
        self.last_error.take()
    }

    /// Take the unauthorized token presented since the last call, if any
    ///
    /// A token left on the reader is reported once, not once per read.
    pub fn take_rejected(&mut self) -> Option<TokenId> {
        self.rejected.take()
    }

    /// Number of unauthorized token presentations since boot
    pub fn rejected_count(&self) -> u32 {
        self.rejected_count
    }
}

impl<R: TokenReader> EnablementGate for TokenGate<R> {
    fn is_enabled(&mut self, state: RunState) -> bool {
        if !state.needs_authentication() {
            return true;
        }

        match self.reader.read_token(self.timeout_ms) {
            Ok(Some(token)) => {
                let authorized = self.allow_list.contains(&token);
                if !authorized && self.last_seen.as_ref() != Some(&token) {
                    self.rejected_count = self.rejected_count.wrapping_add(1);
                    self.rejected = Some(token.clone());
                }
                self.last_seen = Some(token);
                authorized
            }
            Ok(None) => {
                self.last_seen = None;
                false
            }
            Err(e) => {
                self.last_error = Some(e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSwitch {
        closed: bool,
    }

    impl EnableSwitch for MockSwitch {
        fn is_closed(&mut self) -> bool {
            self.closed
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ReadFailed;

    struct MockReader {
        presented: Option<TokenId>,
        fail: bool,
        reads: u32,
        last_timeout_ms: u32,
    }

    impl MockReader {
        fn new(presented: Option<TokenId>) -> Self {
            Self {
                presented,
                fail: false,
                reads: 0,
                last_timeout_ms: 0,
            }
        }
    }

    impl TokenReader for MockReader {
        type Error = ReadFailed;

        fn read_token(&mut self, timeout_ms: u32) -> Result<Option<TokenId>, ReadFailed> {
            self.reads += 1;
            self.last_timeout_ms = timeout_ms;
            if self.fail {
                return Err(ReadFailed);
            }
            Ok(self.presented.clone())
        }
    }

    fn token(b: u8) -> TokenId {
        TokenId::from_bytes(&[0x04, b, 0x1B, 0x22]).unwrap()
    }

    fn allow(tokens: &[TokenId]) -> AllowList {
        let mut list = AllowList::new();
        for t in tokens {
            list.push(t.clone()).unwrap();
        }
        list
    }

    #[test]
    fn test_kill_switch_follows_level() {
        let mut gate = KillSwitchGate::new(MockSwitch { closed: false });
        assert!(!gate.is_enabled(RunState::Run));

        gate.switch.closed = true;
        assert!(gate.is_enabled(RunState::Disabled));
    }

    #[test]
    fn test_token_authorized() {
        let mut gate = TokenGate::new(MockReader::new(Some(token(1))), allow(&[token(1)]), 50);
        assert!(gate.is_enabled(RunState::Disabled));
        assert!(gate.is_enabled(RunState::Off));
        assert_eq!(gate.reader.reads, 2);
        assert_eq!(gate.reader.last_timeout_ms, 50);
    }

    #[test]
    fn test_token_not_on_list() {
        let mut gate = TokenGate::new(MockReader::new(Some(token(2))), allow(&[token(1)]), 50);
        assert!(!gate.is_enabled(RunState::Off));
        assert_eq!(gate.rejected_count(), 1);
        assert_eq!(gate.take_rejected(), Some(token(2)));
        assert_eq!(gate.take_rejected(), None);
    }

    #[test]
    fn test_rejected_token_reported_once_per_presentation() {
        let mut gate = TokenGate::new(MockReader::new(Some(token(2))), allow(&[token(1)]), 50);
        for _ in 0..3 {
            assert!(!gate.is_enabled(RunState::Off));
        }
        assert_eq!(gate.rejected_count(), 1);
        assert_eq!(gate.take_rejected(), Some(token(2)));
        assert_eq!(gate.take_rejected(), None);

        // Token taken away and presented again
        gate.reader.presented = None;
        assert!(!gate.is_enabled(RunState::Off));
        gate.reader.presented = Some(token(2));
        assert!(!gate.is_enabled(RunState::Off));
        assert_eq!(gate.rejected_count(), 2);
        assert_eq!(gate.take_rejected(), Some(token(2)));

        // A different unknown token counts on its own
        gate.reader.presented = Some(token(3));
        assert!(!gate.is_enabled(RunState::Off));
        assert_eq!(gate.rejected_count(), 3);
        assert_eq!(gate.take_rejected(), Some(token(3)));
    }

    #[test]
    fn test_no_token_presented() {
        let mut gate = TokenGate::new(MockReader::new(None), allow(&[token(1)]), 50);
        assert!(!gate.is_enabled(RunState::Disabled));
        assert_eq!(gate.rejected_count(), 0);
        assert_eq!(gate.take_rejected(), None);
    }

    #[test]
    fn test_live_states_skip_reader() {
        let mut gate = TokenGate::new(MockReader::new(None), allow(&[token(1)]), 50);
        for state in [RunState::Acc, RunState::Start, RunState::Run] {
            assert!(gate.is_enabled(state));
        }
        assert_eq!(gate.reader.reads, 0);
    }

    #[test]
    fn test_reader_error_disables_and_is_reported() {
        let mut reader = MockReader::new(Some(token(1)));
        reader.fail = true;
        let mut gate = TokenGate::new(reader, allow(&[token(1)]), 50);

        assert!(!gate.is_enabled(RunState::Off));
        assert_eq!(gate.take_error(), Some(ReadFailed));
        assert_eq!(gate.take_error(), None);

        // Next cycle is a fresh attempt
        gate.reader.fail = false;
        assert!(gate.is_enabled(RunState::Off));
    }

    #[test]
    fn test_empty_allow_list_never_enables() {
        let mut gate = TokenGate::new(MockReader::new(Some(token(1))), AllowList::new(), 50);
        assert!(!gate.is_enabled(RunState::Disabled));
        assert!(gate.allow_list.is_empty());
        assert_eq!(gate.take_rejected(), Some(token(1)));
    }
}
