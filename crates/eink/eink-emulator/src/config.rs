//! Emulator configuration

use std::path::PathBuf;

/// Configuration for the simulated panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Directory for PNG snapshots; `None` keeps frames in memory only
    pub output_dir: Option<PathBuf>,
    /// Snapshot file name prefix (`<prefix>_latest.png`)
    pub file_prefix: String,
}

impl EmulatorConfig {
    /// In-memory only, no snapshots
    pub fn headless() -> Self {
        Self {
            output_dir: None,
            file_prefix: DEFAULT_PREFIX.to_owned(),
        }
    }

    /// Keep a PNG snapshot of the latest displayed frame in `dir`
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            ..Self::headless()
        }
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self::headless()
    }
}

const DEFAULT_PREFIX: &str = "epaper_frame";
