//! Hardware detection and driver selection

use std::path::Path;
use std::time::Duration;

use eink_specs::DriverBinding;
use thiserror::Error;

use crate::display::{DisplayError, PanelDriver};

/// Panel hardware errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardwareError {
    /// `init()` did not return within the deadline
    #[error("panel initialization timed out after {0:?}")]
    InitTimeout(Duration),

    /// `init()` returned an error
    #[error("panel initialization failed: {0}")]
    InitFailure(#[source] DisplayError),

    /// A display/clear/sleep call failed
    #[error("panel driver failure: {0}")]
    DriverFailure(#[source] DisplayError),

    /// No driver could be opened for the binding
    #[error("no driver available for {binding}: {reason}")]
    DriverUnavailable {
        /// Driver binding that was requested
        binding: &'static str,
        /// Why it could not be opened
        reason: String,
    },
}

/// Opens a driver for a model's binding
///
/// Called once at startup. An error here is not fatal: the bridge degrades to
/// simulation.
pub trait DriverFactory: Send + Sync {
    /// Open a driver for `binding`
    fn open(&self, binding: DriverBinding) -> Result<Box<dyn PanelDriver>, HardwareError>;
}

impl<F: DriverFactory + ?Sized> DriverFactory for std::sync::Arc<F> {
    fn open(&self, binding: DriverBinding) -> Result<Box<dyn PanelDriver>, HardwareError> {
        (**self).open(binding)
    }
}

/// Factory for builds that link no vendor driver
///
/// Every binding is reported unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVendorDriver;

impl DriverFactory for NoVendorDriver {
    fn open(&self, binding: DriverBinding) -> Result<Box<dyn PanelDriver>, HardwareError> {
        Err(HardwareError::DriverUnavailable {
            binding: binding.as_str(),
            reason: "this build links no vendor driver".into(),
        })
    }
}

/// Result of the one-time hardware capability check
///
/// Computed once at startup and passed to the display adapter; nothing reads
/// it from a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareProbe {
    available: bool,
    reason: String,
}

impl HardwareProbe {
    /// Check for the panel's SPI device node
    ///
    /// `force_simulation` short-circuits the check.
    pub fn detect(spi_device: &Path, force_simulation: bool) -> Self {
        if force_simulation {
            tracing::debug!("hardware probe skipped: simulation forced");
            return Self::unavailable("simulation forced by configuration");
        }

        if spi_device.exists() {
            tracing::debug!(device = %spi_device.display(), "SPI device present");
            Self {
                available: true,
                reason: format!("found {}", spi_device.display()),
            }
        } else {
            tracing::debug!(device = %spi_device.display(), "SPI device missing");
            Self::unavailable(format!("{} not present", spi_device.display()))
        }
    }

    /// Probe that reports hardware present (tests, custom factories)
    pub fn available() -> Self {
        Self {
            available: true,
            reason: "assumed present".into(),
        }
    }

    /// Probe that reports no hardware
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: reason.into(),
        }
    }

    /// Whether a hardware driver should be attempted
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Human-readable explanation of the probe result
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
