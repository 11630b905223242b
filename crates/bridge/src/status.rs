//! Display status snapshots
//!
//! One [`DisplayState`] per process, published through a `watch` channel.
//! Writers replace fields under the channel's lock; readers always get a
//! whole, consistent copy and never touch the panel.

use std::sync::Arc;
use std::time::{Instant, SystemTime};

use serde::Serialize;
use tokio::sync::watch;

/// Display adapter lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing opened yet
    #[default]
    Uninitialized,
    /// Driver `init` in progress
    Initializing,
    /// Hardware panel ready
    Ready,
    /// Running without hardware
    SimulationReady,
    /// A frame is being pushed to the panel
    Rendering,
    /// Panel put to sleep; terminal
    Sleeping,
}

impl Phase {
    /// Ready for `render`, with or without hardware
    pub fn accepts_frames(self) -> bool {
        matches!(self, Self::Ready | Self::SimulationReady)
    }
}

/// Snapshot of the display's state
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// `initialize` completed
    pub initialized: bool,
    /// A hardware driver (not the simulator) is in use
    pub hardware_available: bool,
    /// Active model id
    pub model: Option<&'static str>,
    /// Panel width; fixed after initialization
    pub width: u32,
    /// Panel height; fixed after initialization
    pub height: u32,
    /// Frames rendered successfully
    pub frame_count: u64,
    /// Wall-clock time of the latest successful render (never decreases)
    pub last_render: Option<SystemTime>,
    /// Renders that failed in the driver or in decoding
    pub failed_renders: u64,
    /// Pending frames replaced before they were rendered
    pub coalesced_frames: u64,
    /// Most recent render or init error
    pub last_error: Option<String>,
    /// Adapter phase
    pub phase: Phase,
    /// Process start, for uptime
    pub started_at: Instant,
}

impl DisplayState {
    fn new() -> Self {
        Self {
            initialized: false,
            hardware_available: false,
            model: None,
            width: 0,
            height: 0,
            frame_count: 0,
            last_render: None,
            failed_renders: 0,
            coalesced_frames: 0,
            last_error: None,
            phase: Phase::Uninitialized,
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since start
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Record a successful render finishing at `at`
    pub fn record_render(&mut self, at: SystemTime) {
        self.frame_count += 1;
        self.last_render = Some(match self.last_render {
            Some(prev) if prev > at => prev,
            _ => at,
        });
    }

    /// Record a failed render
    pub fn record_failure(&mut self, error: impl ToString) {
        self.failed_renders += 1;
        self.last_error = Some(error.to_string());
    }
}

/// Shared publisher of [`DisplayState`]
#[derive(Clone)]
pub struct StatusBoard {
    tx: Arc<watch::Sender<DisplayState>>,
}

impl StatusBoard {
    /// Fresh board in the `Uninitialized` phase
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DisplayState::new());
        Self { tx: Arc::new(tx) }
    }

    /// Modify the state in place and notify subscribers
    pub fn update(&self, f: impl FnOnce(&mut DisplayState)) {
        self.tx.send_modify(f);
    }

    /// Set the phase
    pub fn set_phase(&self, phase: Phase) {
        self.update(|s| s.phase = phase);
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DisplayState {
        self.tx.borrow().clone()
    }

    /// Receiver that sees every future update
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.tx.subscribe()
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_last_render_is_monotonic() {
        let mut state = DisplayState::new();
        let t1 = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(50);
        state.record_render(t1);
        state.record_render(t0);
        assert_eq!(state.last_render, Some(t1));
        assert_eq!(state.frame_count, 2);
    }

    #[test]
    fn test_update_without_subscribers() {
        let board = StatusBoard::new();
        board.update(|s| s.width = 792);
        assert_eq!(board.snapshot().width, 792);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let board = StatusBoard::new();
        let mut rx = board.subscribe();
        board.set_phase(Phase::SimulationReady);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().phase, Phase::SimulationReady);
    }

    #[test]
    fn test_accepts_frames() {
        assert!(Phase::Ready.accepts_frames());
        assert!(Phase::SimulationReady.accepts_frames());
        assert!(!Phase::Rendering.accepts_frames());
        assert!(!Phase::Sleeping.accepts_frames());
    }
}
