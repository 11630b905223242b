//! Process wiring: startup and shutdown sequence
//!
//! initialize → startup screen → serve → (signal) → stop scheduler → sleep

use std::sync::Arc;

use eink_specs::PanelRegistry;
use platform::{DriverFactory, HardwareProbe};

use crate::config::BridgeConfig;
use crate::config_handler::ConfigHandler;
use crate::display::DisplayAdapter;
use crate::error::BridgeError;
use crate::gateway::{read_mac_address, AppState};
use crate::render::RenderScheduler;
use crate::status::StatusBoard;

/// A running bridge (everything except the HTTP listener)
pub struct Bridge {
    state: AppState,
    clear_on_shutdown: bool,
}

impl Bridge {
    /// Initialize the display and start the render worker
    ///
    /// Blocks for up to the init deadline; call from a blocking context.
    pub fn start(config: &BridgeConfig, factory: Box<dyn DriverFactory>) -> Result<Self, BridgeError> {
        let model = PanelRegistry::lookup(&config.model)?;
        let probe = HardwareProbe::detect(&config.spi_device, config.force_simulation);
        Self::start_with_probe(config, probe, factory).inspect(|_| {
            tracing::info!(model = model.id, "bridge started");
        })
    }

    /// Same as [`start`](Self::start) with an explicit hardware probe
    pub fn start_with_probe(
        config: &BridgeConfig,
        probe: HardwareProbe,
        factory: Box<dyn DriverFactory>,
    ) -> Result<Self, BridgeError> {
        let status = StatusBoard::new();
        let mut adapter = DisplayAdapter::new(probe, factory, config.adapter_options(), status.clone());
        adapter.initialize(&config.model)?;
        let model = adapter.model().ok_or(BridgeError::InvalidPhase {
            operation: "start",
            phase: adapter.phase(),
        })?;

        if !config.no_startup_screen {
            if let Err(e) = adapter.show_startup_screen() {
                tracing::warn!(error = %e, "startup screen failed");
            }
        }

        let scheduler = RenderScheduler::spawn(adapter).map_err(|e| {
            platform::HardwareError::InitFailure(platform::DisplayError::Communication(e.to_string()))
        })?;

        Ok(Self {
            state: AppState {
                scheduler: Arc::new(scheduler),
                status,
                config: Arc::new(ConfigHandler::default()),
                model,
                mac_address: read_mac_address().into(),
            },
            clear_on_shutdown: config.clear_on_shutdown,
        })
    }

    /// Handler state for the gateway
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Stop the render worker and put the panel to sleep
    ///
    /// Blocks until the running render finishes.
    pub fn shutdown(self) -> Result<(), BridgeError> {
        tracing::info!("shutting down");
        let mut adapter = self.state.scheduler.shutdown()?;
        if self.clear_on_shutdown {
            if let Err(e) = adapter.clear() {
                tracing::warn!(error = %e, "clear on shutdown failed");
            }
        }
        adapter.shutdown()?;
        tracing::info!("shutdown complete");
        Ok(())
    }
}
