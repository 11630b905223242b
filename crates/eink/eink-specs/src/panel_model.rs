//! Panel model types
//!
//! Defines what the bridge needs to know about a panel before it touches the
//! hardware: nominal geometry, the colors it can show, and which driver speaks
//! to it.

use core::time::Duration;

use crate::palette::PaletteColor;

/// Complete specification of an e-paper panel model
///
/// Contains everything needed to normalize a frame for the panel:
/// - Nominal dimensions (the driver may report different ones at init)
/// - Color palette (empty = full RGB)
/// - Driver binding used to select a hardware driver once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelModel {
    /// Registry identifier (e.g., "5in79g")
    pub id: &'static str,

    /// Human-readable description (e.g., "Waveshare 5.79\" 4-color")
    pub description: &'static str,

    /// Nominal width in pixels
    pub width: u32,

    /// Nominal height in pixels
    pub height: u32,

    /// Ordered palette of displayable colors; empty for full-RGB panels
    pub palette: &'static [PaletteColor],

    /// Which hardware driver family talks to this panel
    pub driver: DriverBinding,

    /// Display controller chip
    pub controller: Controller,

    /// E-paper panel technology
    pub panel_type: PanelType,

    /// Full refresh duration in milliseconds (typical: 2000-30000ms)
    pub full_refresh_ms: u32,
}

impl PanelModel {
    /// True when the panel takes arbitrary RGB and needs no quantization
    pub fn is_full_rgb(&self) -> bool {
        self.palette.is_empty()
    }

    /// Derived color mode for info surfaces
    pub fn color_mode(&self) -> ColorMode {
        match self.palette.len() {
            0 => ColorMode::FullRgb,
            2 => ColorMode::Monochrome,
            _ => ColorMode::Indexed,
        }
    }

    /// Palette color names in palette order
    pub fn color_names(&self) -> impl Iterator<Item = &'static str> {
        self.palette.iter().map(|c| c.name)
    }

    /// Get full refresh duration as Duration
    pub fn full_refresh_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.full_refresh_ms))
    }

    /// Number of pixels in one full frame at nominal resolution
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Hardware driver family a panel model is bound to
///
/// Selected once at startup; there is no runtime module loading. `None`
/// means the model can only ever run in simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DriverBinding {
    /// Waveshare 5.79" (G) 4-color driver
    Waveshare5in79g,
    /// Waveshare 7.3" (E) Spectra 6 driver
    Waveshare7in3e,
    /// Waveshare 2.13" V4 black/white driver
    Waveshare2in13V4,
    /// No hardware driver exists for this model
    None,
}

impl DriverBinding {
    /// Short identifier used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waveshare5in79g => "waveshare-5in79g",
            Self::Waveshare7in3e => "waveshare-7in3e",
            Self::Waveshare2in13V4 => "waveshare-2in13v4",
            Self::None => "none",
        }
    }
}

/// E-paper display controller chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Controller {
    /// Solomon Systech SSD1680 (Waveshare 2.13" V4)
    SSD1680,
    /// Dual-controller 4-color driver used on the 5.79" (G) panel
    SSD1683Dual,
    /// ACeP (Advanced Color ePaper) controller for Spectra 6
    ACeP,
    /// Generic/unknown controller
    Generic,
}

/// E-paper panel technology types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PanelType {
    /// E Ink Carta 1000 (improved contrast)
    Carta1000,
    /// E Ink Carta 1200 (faster response)
    Carta1200,
    /// E Ink Spectra 3100 (black/white/red/yellow)
    Spectra3100,
    /// E Ink Spectra 6 (ACeP - Advanced Color ePaper)
    Spectra6,
    /// Not a physical panel
    Virtual,
}

/// Color capability derived from the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColorMode {
    /// Two colors (black/white)
    Monochrome,
    /// Small fixed palette (3-7 colors)
    Indexed,
    /// Accepts any RGB value
    FullRgb,
}
