//! Hardware or simulated panel behind one type

use eink_emulator::Emulator;
use platform::{DisplayError, PanelDriver, PanelFrame};

/// The panel the adapter drives
pub enum PanelBackend {
    /// Vendor driver opened through a `DriverFactory`
    Hardware(Box<dyn PanelDriver>),
    /// In-memory emulator with optional PNG snapshots
    Simulated(Box<Emulator>),
}

impl PanelBackend {
    /// True for a vendor driver
    pub fn is_hardware(&self) -> bool {
        matches!(self, Self::Hardware(_))
    }

    /// The emulator, when simulating
    pub fn emulator(&self) -> Option<&Emulator> {
        match self {
            Self::Simulated(emulator) => Some(emulator),
            Self::Hardware(_) => None,
        }
    }

    fn driver(&mut self) -> &mut dyn PanelDriver {
        match self {
            Self::Hardware(driver) => driver.as_mut(),
            Self::Simulated(emulator) => emulator.as_mut(),
        }
    }
}

impl PanelDriver for PanelBackend {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.driver().init()
    }

    fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Hardware(driver) => driver.dimensions(),
            Self::Simulated(emulator) => emulator.dimensions(),
        }
    }

    fn display(&mut self, frame: &PanelFrame) -> Result<(), DisplayError> {
        self.driver().display(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.driver().clear()
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        self.driver().sleep()
    }
}
