//! Bridge configuration
//!
//! Every option can come from the command line or the environment
//! (`EPAPER_*`). Defaults live in `platform::config`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use platform::config::{
    DEFAULT_BIND, DEFAULT_INIT_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_SIMULATION_DIR,
    SPI_DEVICE_PATH,
};

use crate::display::AdapterOptions;

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "epaper-bridge")]
#[command(about = "Receives frames over HTTP and drives an e-paper panel", long_about = None)]
#[command(version)]
pub struct BridgeConfig {
    /// Address the HTTP gateway listens on
    #[arg(long, env = "EPAPER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Panel model id (see GET /api/display/models)
    #[arg(long, env = "EPAPER_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Seconds to wait for the panel driver's init before giving up
    #[arg(long, env = "EPAPER_INIT_TIMEOUT", default_value_t = DEFAULT_INIT_TIMEOUT_SECS)]
    pub init_timeout_secs: u64,

    /// SPI device node whose presence means panel hardware is attached
    #[arg(long, env = "EPAPER_SPI_DEVICE", default_value = SPI_DEVICE_PATH)]
    pub spi_device: PathBuf,

    /// Never try the hardware driver
    #[arg(long, env = "EPAPER_FORCE_SIMULATION")]
    pub force_simulation: bool,

    /// Directory for simulated frame snapshots
    #[arg(long, env = "EPAPER_SIMULATION_DIR", default_value = DEFAULT_SIMULATION_DIR)]
    pub simulation_dir: PathBuf,

    /// Keep simulated frames in memory only
    #[arg(long, env = "EPAPER_NO_SNAPSHOTS")]
    pub no_snapshots: bool,

    /// Skip the blank startup frame
    #[arg(long, env = "EPAPER_NO_STARTUP_SCREEN")]
    pub no_startup_screen: bool,

    /// Blank the panel before putting it to sleep on shutdown
    #[arg(long, env = "EPAPER_CLEAR_ON_SHUTDOWN")]
    pub clear_on_shutdown: bool,
}

impl BridgeConfig {
    /// Init deadline as a `Duration`
    pub fn init_timeout(&self) -> Duration {
        Duration::from_secs(self.init_timeout_secs)
    }

    /// Options for the display adapter
    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            init_timeout: self.init_timeout(),
            simulation_dir: (!self.no_snapshots).then(|| self.simulation_dir.clone()),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 80)),
            model: DEFAULT_MODEL.to_owned(),
            init_timeout_secs: DEFAULT_INIT_TIMEOUT_SECS,
            spi_device: PathBuf::from(SPI_DEVICE_PATH),
            force_simulation: false,
            simulation_dir: PathBuf::from(DEFAULT_SIMULATION_DIR),
            no_snapshots: false,
            no_startup_screen: false,
            clear_on_shutdown: false,
        }
    }
}
