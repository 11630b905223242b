//! E-Paper Panel Models
//!
//! Static specifications for the e-paper panels the frame bridge can drive:
//! resolution, color palette, controller family and the driver binding used to
//! pick a hardware driver at startup.
//!
//! # Features
//!
//! - **Registry** - [`PanelRegistry`] resolves a model id (`"5in79g"`) to its
//!   `&'static` [`PanelModel`]; the table is compiled in and never mutated
//! - **Palettes** - ordered, named RGB palettes with nearest-color lookup
//!   (ties resolve to the lowest palette index)
//! - **Serde support** - optional serialization of models for status surfaces
//!
//! # Example
//!
//! ```
//! use eink_specs::PanelRegistry;
//!
//! let model = PanelRegistry::lookup("5in79g").unwrap();
//! println!("Display: {}", model.description);
//! println!("Resolution: {}×{}", model.width, model.height);
//! println!("Colors: {}", model.palette.len());
//!
//! assert!(PanelRegistry::lookup("no-such-panel").is_err());
//! ```
//!
//! # Custom Panel Models
//!
//! ```
//! use eink_specs::{palette, Controller, DriverBinding, PanelModel, PanelType};
//!
//! const MY_PANEL: PanelModel = PanelModel {
//!     id: "custom-bw",
//!     description: "Custom 4.2\" black/white panel",
//!     width: 400,
//!     height: 300,
//!     palette: palette::BLACK_WHITE,
//!     driver: DriverBinding::None,
//!     controller: Controller::Generic,
//!     panel_type: PanelType::Carta1200,
//!     full_refresh_ms: 4000,
//! };
//!
//! assert!(!MY_PANEL.is_full_rgb());
//! ```

mod panel_model;
pub mod displays;
pub mod palette;
mod registry;

pub use palette::{PaletteColor, Rgb};
pub use panel_model::{ColorMode, Controller, DriverBinding, PanelModel, PanelType};
pub use registry::{ModelError, PanelRegistry, MODELS};
