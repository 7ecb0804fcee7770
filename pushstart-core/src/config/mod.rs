//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware fills them from
//! its embedded TOML file and falls back to these defaults.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
