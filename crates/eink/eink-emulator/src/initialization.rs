//! Simulated panel power state
//!
//! Mirrors the controller lifecycle a real panel goes through:
//! Uninitialized → Initialized ⇄ Sleeping. A sleeping panel needs another
//! `init` before it accepts frames.

/// Power/initialization state of the simulated panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitializationState {
    /// `init` has not been called
    #[default]
    Uninitialized,

    /// Ready to accept frames
    Initialized,

    /// Deep sleep; frames are rejected until the next `init`
    Sleeping,
}

impl InitializationState {
    /// Check if display is ready to use (initialized)
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Initialized)
    }

    /// Check if display is asleep
    pub fn is_sleeping(&self) -> bool {
        matches!(self, Self::Sleeping)
    }
}
