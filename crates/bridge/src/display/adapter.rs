//! Display adapter state machine
//!
//! ```text
//! Uninitialized → Initializing → Ready ⇄ Rendering
//!                             ↘ SimulationReady ⇄ Rendering
//! any → Sleeping (terminal)
//! ```
//!
//! The adapter is owned by exactly one thread at a time; the render
//! scheduler moves it onto its worker after startup.

use std::io::Cursor;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use eink_emulator::{Emulator, EmulatorConfig};
use eink_specs::{DriverBinding, PanelModel, PanelRegistry};
use image::{ImageFormat, Rgb, RgbImage};
use platform::{DisplayError, DriverFactory, HardwareError, HardwareProbe, PanelDriver, PanelFrame};

use super::backend::PanelBackend;
use super::normalize::normalize;
use crate::error::BridgeError;
use crate::status::{DisplayState, Phase, StatusBoard};

/// Startup options for the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Hard deadline for the driver's `init`
    pub init_timeout: Duration,
    /// Where the simulator writes PNG snapshots; `None` disables them
    pub simulation_dir: Option<PathBuf>,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            init_timeout: Duration::from_secs(platform::config::DEFAULT_INIT_TIMEOUT_SECS),
            simulation_dir: None,
        }
    }
}

/// Owns the panel and turns PNG frames into refreshes
pub struct DisplayAdapter {
    probe: HardwareProbe,
    factory: Box<dyn DriverFactory>,
    options: AdapterOptions,
    status: StatusBoard,
    model: Option<&'static PanelModel>,
    backend: Option<PanelBackend>,
    phase: Phase,
    current_frame: Option<PanelFrame>,
}

impl DisplayAdapter {
    /// Adapter that has not touched any hardware yet
    pub fn new(
        probe: HardwareProbe,
        factory: Box<dyn DriverFactory>,
        options: AdapterOptions,
        status: StatusBoard,
    ) -> Self {
        Self {
            probe,
            factory,
            options,
            status,
            model: None,
            backend: None,
            phase: Phase::Uninitialized,
            current_frame: None,
        }
    }

    /// Resolve the model, open its driver (or the simulator) and run `init`
    ///
    /// Blocks for at most the init deadline. Model and hardware errors are
    /// fatal; a missing driver is not.
    pub fn initialize(&mut self, model_id: &str) -> Result<(), BridgeError> {
        if self.phase != Phase::Uninitialized {
            return Err(BridgeError::InvalidPhase {
                operation: "initialize",
                phase: self.phase,
            });
        }

        let model = PanelRegistry::lookup(model_id)?;
        tracing::info!(model = model.id, description = model.description, "initializing display");
        self.set_phase(Phase::Initializing);

        let backend = match self.open_driver(model) {
            Some(driver) => {
                match init_with_deadline(driver, self.options.init_timeout) {
                    Ok(driver) => PanelBackend::Hardware(driver),
                    Err(e) => return Err(self.init_failed(e)),
                }
            }
            None => {
                let config = self
                    .options
                    .simulation_dir
                    .clone()
                    .map_or_else(EmulatorConfig::headless, EmulatorConfig::with_output_dir);
                let mut emulator = Emulator::for_model(model, config);
                if let Err(e) = emulator.init() {
                    return Err(self.init_failed(HardwareError::InitFailure(e)));
                }
                PanelBackend::Simulated(Box::new(emulator))
            }
        };

        let (width, height) = backend.dimensions();
        if width == 0 || height == 0 {
            return Err(self.init_failed(HardwareError::InitFailure(DisplayError::InvalidState(
                "driver reported zero dimensions",
            ))));
        }
        if (width, height) != (model.width, model.height) {
            tracing::warn!(
                width,
                height,
                nominal_width = model.width,
                nominal_height = model.height,
                "driver dimensions differ from model"
            );
        }

        let hardware = backend.is_hardware();
        let phase = if hardware {
            Phase::Ready
        } else {
            Phase::SimulationReady
        };
        self.model = Some(model);
        self.backend = Some(backend);
        self.phase = phase;
        self.status.update(|s| {
            s.initialized = true;
            s.hardware_available = hardware;
            s.model = Some(model.id);
            s.width = width;
            s.height = height;
            s.phase = phase;
        });

        if hardware {
            tracing::info!(width, height, "display ready");
        } else {
            tracing::warn!(width, height, reason = self.probe.reason(), "running in simulation mode");
        }
        Ok(())
    }

    /// Decode, normalize and push one PNG frame
    ///
    /// The retained frame only changes when the driver accepts the new one.
    pub fn render(&mut self, png: &[u8]) -> Result<(), BridgeError> {
        let ready = self.phase;
        if !ready.accepts_frames() {
            return Err(BridgeError::InvalidPhase {
                operation: "render",
                phase: ready,
            });
        }
        let (Some(model), Some(backend)) = (self.model, self.backend.as_mut()) else {
            return Err(BridgeError::InvalidPhase {
                operation: "render",
                phase: ready,
            });
        };

        let (width, height) = backend.dimensions();
        let frame = normalize(png, width, height, model.palette)?;

        self.phase = Phase::Rendering;
        self.status.set_phase(Phase::Rendering);
        // A panicking driver must not leave the adapter stuck in Rendering
        let result = catch_unwind(AssertUnwindSafe(|| backend.display(&frame))).unwrap_or_else(
            |payload| {
                Err(DisplayError::Communication(format!(
                    "driver panicked: {}",
                    crate::render::panic_message(payload.as_ref())
                )))
            },
        );
        self.phase = ready;
        self.status.set_phase(ready);

        result.map_err(HardwareError::DriverFailure)?;
        self.current_frame = Some(frame);
        Ok(())
    }

    /// Render a blank white frame
    pub fn show_startup_screen(&mut self) -> Result<(), BridgeError> {
        let (width, height) = self.dimensions();
        let white = RgbImage::from_pixel(width.max(1), height.max(1), Rgb([255, 255, 255]));
        let mut png = Cursor::new(Vec::new());
        white
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| protocol::FrameError::InvalidContainer(e.to_string()))?;
        tracing::info!("showing startup screen");
        self.render(png.get_ref())
    }

    /// Blank the panel to white
    ///
    /// In simulation this only logs; the last frame stays on the virtual panel.
    pub fn clear(&mut self) -> Result<(), BridgeError> {
        if !self.phase.accepts_frames() {
            return Err(BridgeError::InvalidPhase {
                operation: "clear",
                phase: self.phase,
            });
        }
        match self.backend.as_mut() {
            Some(backend) if backend.is_hardware() => {
                tracing::info!("clearing display");
                backend.clear().map_err(HardwareError::DriverFailure)?;
                self.current_frame = None;
            }
            _ => tracing::info!("simulation: clear requested"),
        }
        Ok(())
    }

    /// Put the panel to sleep; later calls are no-ops
    pub fn sleep(&mut self) -> Result<(), BridgeError> {
        if self.phase == Phase::Sleeping {
            return Ok(());
        }
        self.phase = Phase::Sleeping;
        self.status.set_phase(Phase::Sleeping);

        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };
        tracing::info!("putting display to sleep");
        backend.sleep().map_err(|e| {
            tracing::error!(error = %e, "display sleep failed");
            HardwareError::DriverFailure(e).into()
        })
    }

    /// Same as [`sleep`](Self::sleep)
    pub fn shutdown(&mut self) -> Result<(), BridgeError> {
        self.sleep()
    }

    /// Current status snapshot
    pub fn get_stats(&self) -> DisplayState {
        self.status.snapshot()
    }

    /// Adapter phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Active model, once initialized
    pub fn model(&self) -> Option<&'static PanelModel> {
        self.model
    }

    /// Panel dimensions; `(0, 0)` before initialization
    pub fn dimensions(&self) -> (u32, u32) {
        self.backend.as_ref().map_or((0, 0), PanelDriver::dimensions)
    }

    /// True when a vendor driver is in use
    pub fn is_hardware(&self) -> bool {
        self.backend.as_ref().is_some_and(PanelBackend::is_hardware)
    }

    /// Last frame the panel accepted
    pub fn current_frame(&self) -> Option<&PanelFrame> {
        self.current_frame.as_ref()
    }

    /// The backend, for inspection
    pub fn backend(&self) -> Option<&PanelBackend> {
        self.backend.as_ref()
    }

    /// Status board this adapter publishes to
    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    fn open_driver(&self, model: &PanelModel) -> Option<Box<dyn PanelDriver>> {
        if model.driver == DriverBinding::None {
            tracing::info!(model = model.id, "model has no hardware driver");
            return None;
        }
        if !self.probe.is_available() {
            tracing::info!(reason = self.probe.reason(), "no panel hardware detected");
            return None;
        }
        match self.factory.open(model.driver) {
            Ok(driver) => Some(driver),
            Err(e) => {
                tracing::warn!(error = %e, "could not open panel driver");
                None
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.status.set_phase(phase);
    }

    fn init_failed(&mut self, error: HardwareError) -> BridgeError {
        tracing::error!(error = %error, "display initialization failed");
        self.phase = Phase::Uninitialized;
        let message = error.to_string();
        self.status.update(|s| {
            s.phase = Phase::Uninitialized;
            s.last_error = Some(message);
        });
        error.into()
    }
}

/// Run `driver.init()` on a helper thread and give up after `deadline`
///
/// A hung driver stays parked on its helper thread; the process is expected
/// to exit on the resulting error.
fn init_with_deadline(
    mut driver: Box<dyn PanelDriver>,
    deadline: Duration,
) -> Result<Box<dyn PanelDriver>, HardwareError> {
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("panel-init".into())
        .spawn(move || {
            let result = driver.init().map(|()| driver);
            let _ = tx.send(result);
        })
        .map_err(|e| HardwareError::InitFailure(DisplayError::Communication(e.to_string())))?;

    match rx.recv_timeout(deadline) {
        Ok(Ok(driver)) => Ok(driver),
        Ok(Err(e)) => Err(HardwareError::InitFailure(e)),
        Err(RecvTimeoutError::Timeout) => Err(HardwareError::InitTimeout(deadline)),
        Err(RecvTimeoutError::Disconnected) => Err(HardwareError::InitFailure(
            DisplayError::InvalidState("init thread panicked"),
        )),
    }
}
