//! Pre-configured panel models
//!
//! Waveshare panels the bridge has drivers for, plus a virtual full-RGB model
//! for development without hardware.

pub mod virtual_panel;
pub mod waveshare;

pub use virtual_panel::*;
pub use waveshare::*;
