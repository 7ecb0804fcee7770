//! Enablement gate
//!
//! Decides each cycle whether the system may leave DISABLED: either a
//! kill switch or an NFC token from the allow-list.

pub mod enablement;
pub mod token;

pub use enablement::{EnablementGate, KillSwitchGate, TokenGate};
pub use token::{AllowList, TokenId, TokenIdError, MAX_TOKENS, MAX_TOKEN_LEN};
