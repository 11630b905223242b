//! E-Paper Frame Bridge
//!
//! Accepts still frames from a remote controller over HTTP and drives one
//! e-paper panel.
//!
//! # Architecture
//!
//! ```text
//! HTTP gateway (axum)          ── gateway
//!         ↓ bytes
//! Wire decoder                 ── protocol crate
//!         ↓ Frame / Config
//! Frame validation             ── frame
//!         ↓ ValidatedFrame
//! Render scheduler (1 thread)  ── render
//!         ↓
//! Display adapter              ── display
//!         ↓ PanelFrame
//! PanelDriver (vendor / sim)   ── platform, eink-emulator
//! ```
//!
//! Exactly one render drives the panel at any instant. A frame that arrives
//! while the panel is busy waits in a single slot; a newer frame replaces it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod app;
pub mod config;
pub mod config_handler;
pub mod display;
pub mod error;
pub mod frame;
pub mod gateway;
pub mod render;
pub mod status;

pub use app::Bridge;
pub use config::BridgeConfig;
pub use display::{AdapterOptions, DisplayAdapter};
pub use error::{BridgeError, SchedulerError};
pub use frame::ValidatedFrame;
pub use render::{RenderScheduler, SubmitOutcome, Submission};
pub use status::{DisplayState, Phase, StatusBoard};
