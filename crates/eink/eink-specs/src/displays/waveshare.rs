//! Waveshare e-paper panel models
//!
//! Pre-configured models for the Waveshare panels the bridge drives. Geometry
//! and color sets follow the vendor datasheets.

use crate::{palette, Controller, DriverBinding, PanelModel, PanelType};

/// Waveshare 5.79" (G) (792×272, 4-color)
///
/// Wide-format panel built from two cascaded controllers.
/// - Colors: black, white, red, yellow
/// - Full refresh: ~24s
///
/// # Known Quirks
/// - Reported width is 792 although each controller half is 396 columns
pub const WAVESHARE_5IN79G: PanelModel = PanelModel {
    id: "5in79g",
    description: "Waveshare 5.79\" (G) 4-color",
    width: 792,
    height: 272,
    palette: palette::BWRY,
    driver: DriverBinding::Waveshare5in79g,
    controller: Controller::SSD1683Dual,
    panel_type: PanelType::Spectra3100,
    full_refresh_ms: 24000,
};

/// Waveshare 7.3" (E) (800×480, Spectra 6)
///
/// Six-color ACeP panel.
/// - Colors: black, white, red, yellow, green, blue
/// - Full refresh: ~19s
pub const WAVESHARE_7IN3SCE: PanelModel = PanelModel {
    id: "7in3sce",
    description: "Waveshare 7.3\" (E) Spectra 6",
    width: 800,
    height: 480,
    palette: palette::SPECTRA_6,
    driver: DriverBinding::Waveshare7in3e,
    controller: Controller::ACeP,
    panel_type: PanelType::Spectra6,
    full_refresh_ms: 19000,
};

/// Waveshare 2.13" V4 (250×122, SSD1680, Carta 1000)
///
/// Small black/white panel, handy for bench testing.
pub const WAVESHARE_2IN13V4: PanelModel = PanelModel {
    id: "2in13v4",
    description: "Waveshare 2.13\" V4",
    width: 250,
    height: 122,
    palette: palette::BLACK_WHITE,
    driver: DriverBinding::Waveshare2in13V4,
    controller: Controller::SSD1680,
    panel_type: PanelType::Carta1000,
    full_refresh_ms: 2000,
};
