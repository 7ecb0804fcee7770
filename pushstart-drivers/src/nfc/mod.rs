//! NFC token readers

pub mod pn532;

pub use pn532::{FirmwareVersion, Pn532, Pn532Error};
