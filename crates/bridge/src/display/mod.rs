//! Display adapter and frame normalization
//!
//! This module owns everything between a validated PNG and the panel driver:
//! decoding, resizing to the panel, palette quantization and the adapter
//! state machine around one [`platform::PanelDriver`].

mod adapter;
mod backend;
pub mod normalize;
pub mod quantize;

pub use adapter::{AdapterOptions, DisplayAdapter};
pub use backend::PanelBackend;
pub use normalize::normalize;
pub use quantize::quantize;
