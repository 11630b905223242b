//! Virtual panel model
//!
//! A full-RGB panel with no hardware driver. Frames are resized but never
//! quantized, and the bridge always runs it in simulation.

use crate::{Controller, DriverBinding, PanelModel, PanelType};

/// Virtual 800×480 full-RGB panel
pub const VIRTUAL_RGB: PanelModel = PanelModel {
    id: "virtual-rgb",
    description: "Virtual 800×480 RGB panel (simulation only)",
    width: 800,
    height: 480,
    palette: &[],
    driver: DriverBinding::None,
    controller: Controller::Generic,
    panel_type: PanelType::Virtual,
    full_refresh_ms: 0,
};
