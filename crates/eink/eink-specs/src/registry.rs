//! Panel model registry
//!
//! Read-only lookup from model identifier to static [`PanelModel`]. The table
//! is built at compile time; there is nothing to register at runtime.

use thiserror::Error;

use crate::displays::{VIRTUAL_RGB, WAVESHARE_2IN13V4, WAVESHARE_5IN79G, WAVESHARE_7IN3SCE};
use crate::PanelModel;

/// Every model the bridge knows about, in listing order
pub static MODELS: &[PanelModel] = &[
    WAVESHARE_5IN79G,
    WAVESHARE_7IN3SCE,
    WAVESHARE_2IN13V4,
    VIRTUAL_RGB,
];

/// Registry lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No model with this identifier
    #[error("unknown panel model '{0}'")]
    UnknownModel(String),
}

/// Static panel model registry
pub struct PanelRegistry;

impl PanelRegistry {
    /// Resolve a model identifier (exact, case-sensitive match)
    pub fn lookup(id: &str) -> Result<&'static PanelModel, ModelError> {
        MODELS
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ModelError::UnknownModel(id.to_owned()))
    }

    /// All known models
    pub fn list() -> &'static [PanelModel] {
        MODELS
    }

    /// `(id, description)` pairs for listing surfaces
    pub fn summaries() -> impl Iterator<Item = (&'static str, &'static str)> {
        MODELS.iter().map(|m| (m.id, m.description))
    }

    /// Identifiers of all known models
    pub fn ids() -> impl Iterator<Item = &'static str> {
        MODELS.iter().map(|m| m.id)
    }
}
