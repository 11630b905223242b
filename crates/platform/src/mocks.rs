//! Mock implementations for testing
//!
//! In-memory [`PanelDriver`] that records every call. Richer fakes (blocking
//! gates, hanging init, concurrency checks) live in the `eink-testing` crate.

use crate::display::{DisplayError, PanelDriver, PanelFrame};

/// Mock panel implementation
#[derive(Debug, Default)]
pub struct MockPanel {
    width: u32,
    height: u32,
    initialized: bool,
    sleeping: bool,
    frames: Vec<PanelFrame>,
    clear_count: usize,
    fail_display: bool,
}

impl MockPanel {
    /// Create new mock panel
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Make every subsequent `display` call fail
    pub fn fail_display(&mut self, fail: bool) {
        self.fail_display = fail;
    }

    /// Frames received so far
    pub fn frames(&self) -> &[PanelFrame] {
        &self.frames
    }

    /// Number of `clear` calls
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Whether `sleep` was called
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }
}

impl PanelDriver for MockPanel {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.initialized = true;
        self.sleeping = false;
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn display(&mut self, frame: &PanelFrame) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::InvalidState("display before init"));
        }
        if self.fail_display {
            return Err(DisplayError::Communication("mock failure".into()));
        }
        if frame.dimensions() != (self.width, self.height) {
            return Err(DisplayError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: frame.dimensions(),
            });
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clear_count += 1;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        self.sleeping = true;
        Ok(())
    }
}
