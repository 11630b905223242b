//! Panel driver seam for the e-paper frame bridge
//!
//! Everything above this crate is hardware-agnostic. A concrete panel is
//! reached only through the [`PanelDriver`] trait, opened once at startup by a
//! [`DriverFactory`] chosen from the model's driver binding.
//!
//! # Architecture Layers
//!
//! ```text
//! Gateway / scheduler (bridge crate)
//!         ↓
//! DisplayAdapter (bridge crate, owns one driver)
//!         ↓
//! Platform seam (this crate - PanelDriver, PanelFrame, HardwareProbe)
//!         ↓
//! Vendor driver (SPI/GPIO) or simulation (eink-emulator)
//! ```
//!
//! # Features
//!
//! - `mocks`: in-memory [`mocks::MockPanel`] for downstream tests
//!
//! # Example
//!
//! ```
//! use platform::{PanelDriver, PanelFrame};
//!
//! fn show_white<D: PanelDriver>(driver: &mut D) -> Result<(), platform::DisplayError> {
//!     let (width, height) = driver.dimensions();
//!     driver.display(&PanelFrame::white(width, height))
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod display;
pub mod hardware;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use display::{DisplayError, PanelDriver, PanelFrame};
pub use hardware::{DriverFactory, HardwareError, HardwareProbe, NoVendorDriver};
