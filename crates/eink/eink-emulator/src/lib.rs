//! E-Paper Panel Emulator
//!
//! Stand-in for a physical panel when no hardware is present. Implements
//! [`platform::PanelDriver`] so the bridge drives it exactly like a vendor
//! driver: frames land in an in-memory [`Framebuffer`] and, when an output
//! directory is configured, each refresh overwrites a single PNG snapshot of
//! the latest frame.
//!
//! # Example
//!
//! ```no_run
//! use eink_emulator::{Emulator, EmulatorConfig};
//! use platform::{PanelDriver, PanelFrame};
//!
//! let model = eink_specs::PanelRegistry::lookup("5in79g").unwrap();
//! let mut emulator = Emulator::for_model(model, EmulatorConfig::with_output_dir("/tmp"));
//!
//! emulator.init().unwrap();
//! emulator.display(&PanelFrame::white(792, 272)).unwrap();
//! println!("wrote {:?}", emulator.last_snapshot());
//! ```

pub mod config;
mod framebuffer;
mod initialization;
pub mod snapshot;

pub use config::EmulatorConfig;
pub use framebuffer::Framebuffer;
pub use initialization::InitializationState;
pub use snapshot::SnapshotError;

use std::path::{Path, PathBuf};

use eink_specs::PanelModel;
use platform::{DisplayError, PanelDriver, PanelFrame};

/// Display statistics tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayStats {
    /// Frames accepted by `display`
    pub frames_displayed: u64,
    /// `clear` calls
    pub clears: u64,
    /// Snapshots written to disk
    pub snapshots_written: u64,
    /// Snapshots that failed to write
    pub snapshot_failures: u64,
}

/// Simulated e-paper panel
pub struct Emulator {
    /// Last displayed content
    pub framebuffer: Framebuffer,
    config: EmulatorConfig,
    state: InitializationState,
    stats: DisplayStats,
    last_snapshot: Option<PathBuf>,
}

impl Emulator {
    /// Headless emulator of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, EmulatorConfig::headless())
    }

    /// Emulator with explicit configuration
    pub fn with_config(width: u32, height: u32, config: EmulatorConfig) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            config,
            state: InitializationState::Uninitialized,
            stats: DisplayStats::default(),
            last_snapshot: None,
        }
    }

    /// Emulator sized for a panel model
    pub fn for_model(model: &PanelModel, config: EmulatorConfig) -> Self {
        Self::with_config(model.width, model.height, config)
    }

    /// Current power state
    pub fn state(&self) -> InitializationState {
        self.state
    }

    /// Counters since creation
    pub fn stats(&self) -> DisplayStats {
        self.stats
    }

    /// Path of the most recent snapshot written, if any
    pub fn last_snapshot(&self) -> Option<&Path> {
        self.last_snapshot.as_deref()
    }

    /// Snapshot directory, if configured
    pub fn output_dir(&self) -> Option<&Path> {
        self.config.output_dir.as_deref()
    }

    /// Save the framebuffer to PNG (for testing)
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let img = self.framebuffer.to_image().ok_or(SnapshotError::Buffer)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| "screenshot.png".into(), |n| n.to_string_lossy());
        snapshot::write_png(dir, &name, &img).map(|_| ())
    }

    fn write_snapshot(&mut self) {
        let Some(dir) = self.config.output_dir.clone() else {
            return;
        };
        let name = snapshot::snapshot_name(&self.config.file_prefix);
        let result = self
            .framebuffer
            .to_image()
            .ok_or(SnapshotError::Buffer)
            .and_then(|img| snapshot::write_png(&dir, &name, &img));

        match result {
            Ok(path) => {
                tracing::info!(path = %path.display(), "simulation: frame saved");
                self.stats.snapshots_written += 1;
                self.last_snapshot = Some(path);
            }
            Err(e) => {
                // The frame is still "shown"; only the side channel failed
                tracing::warn!(error = %e, "simulation: could not save frame");
                self.stats.snapshot_failures += 1;
            }
        }
    }
}

impl PanelDriver for Emulator {
    fn init(&mut self) -> Result<(), DisplayError> {
        tracing::debug!(
            width = self.framebuffer.width,
            height = self.framebuffer.height,
            "simulation: panel init"
        );
        self.state = InitializationState::Initialized;
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.framebuffer.width, self.framebuffer.height)
    }

    fn display(&mut self, frame: &PanelFrame) -> Result<(), DisplayError> {
        if !self.state.is_ready() {
            return Err(DisplayError::InvalidState("display while not initialized"));
        }
        if frame.dimensions() != self.dimensions() {
            return Err(DisplayError::DimensionMismatch {
                expected: self.dimensions(),
                actual: frame.dimensions(),
            });
        }

        self.framebuffer.load(frame);
        self.stats.frames_displayed += 1;
        self.write_snapshot();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        tracing::info!("simulation: clear");
        self.framebuffer.clear();
        self.stats.clears += 1;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        tracing::info!("simulation: panel sleep");
        self.state = InitializationState::Sleeping;
        Ok(())
    }
}
