//! Application configuration and constants
//!
//! Central values used across the bridge. Branding, defaults and version
//! strings should reference these constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "E-Paper Frame Bridge";

/// The service identifier reported on status endpoints
pub const SERVICE_ID: &str = "epaper_frame_display";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP API version reported by `/api/display/info`
pub const API_VERSION: &str = "2.0";

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:80";

/// Default panel model
pub const DEFAULT_MODEL: &str = "5in79g";

/// Hard deadline for `PanelDriver::init`, in seconds
pub const DEFAULT_INIT_TIMEOUT_SECS: u64 = 30;

/// SPI device node checked by the hardware probe
pub const SPI_DEVICE_PATH: &str = "/dev/spidev0.0";

/// Where simulated frames are written when enabled
pub const DEFAULT_SIMULATION_DIR: &str = "/tmp";

/// Largest HTTP body accepted (a full 800×480 RGBA PNG is well under this)
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Largest inflated configuration document
pub const MAX_CONFIG_BYTES: usize = 1024 * 1024;

/// Capabilities advertised on the info endpoint
pub const CAPABILITIES: &[&str] = &["frame_display", "png_support", "color_epaper"];

/// Full application title (name + version)
pub fn app_title() -> String {
    format!("{APP_NAME} v{APP_VERSION}")
}
