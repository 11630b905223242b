//! Bridge error types
//!
//! Each layer owns its own enum; [`BridgeError`] gathers them for callers that
//! cross layers (startup, the gateway).

use eink_specs::ModelError;
use platform::HardwareError;
use protocol::{DecodeError, FrameError};
use thiserror::Error;

use crate::config_handler::ConfigError;
use crate::status::Phase;

/// Render scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The scheduler no longer accepts work
    #[error("render scheduler is shut down")]
    ShutDown,

    /// The render worker thread panicked
    #[error("render worker panicked")]
    WorkerPanicked,
}

/// Any error the bridge can surface
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Unknown panel model
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Panel hardware failure
    #[error(transparent)]
    Hardware(#[from] HardwareError),

    /// Wire message rejected
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Frame payload rejected
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Configuration message rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scheduler unavailable
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Operation not valid in the adapter's current phase
    #[error("cannot {operation} while display is {phase:?}")]
    InvalidPhase {
        /// What was attempted
        operation: &'static str,
        /// Phase at the time
        phase: Phase,
    },
}

impl BridgeError {
    /// True for errors caused by the sender's input rather than the bridge
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Frame(_) | Self::Config(_))
    }
}
