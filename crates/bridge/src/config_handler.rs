//! Configuration messages
//!
//! Controllers may push a JSON configuration document, plain (`00`) or
//! gzip-compressed (`01`). The bridge keeps only the most recent one; nothing
//! in the render path reads it.

use std::io::Read;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use flate2::read::GzDecoder;
use protocol::Message;
use serde::Serialize;
use thiserror::Error;

/// Configuration message errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Payload is not valid gzip
    #[error("configuration payload is not valid gzip: {0}")]
    Decompress(#[source] std::io::Error),

    /// Payload is not valid JSON
    #[error("configuration payload is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Inflated document exceeds the size limit
    #[error("configuration document exceeds {limit} bytes")]
    TooLarge {
        /// Limit in bytes
        limit: usize,
    },

    /// Message was not a configuration message
    #[error("expected a configuration message, got {0}")]
    NotConfig(&'static str),
}

/// Stored configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    /// Parsed JSON
    pub value: serde_json::Value,
    /// Arrived gzip-compressed
    pub compressed: bool,
    /// Arrival time
    pub received_at: SystemTime,
}

/// Summary returned to the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReceipt {
    /// `"config_json"` or `"config_gzip"`
    pub kind: &'static str,
    /// Size of the JSON document after inflation
    pub document_bytes: usize,
    /// Top-level keys, when the document is an object
    pub keys: Vec<String>,
}

/// Keeps the latest configuration document
pub struct ConfigHandler {
    latest: RwLock<Option<ConfigDocument>>,
    max_bytes: usize,
}

impl ConfigHandler {
    /// Handler that accepts documents up to `max_bytes` once inflated
    pub fn new(max_bytes: usize) -> Self {
        Self {
            latest: RwLock::new(None),
            max_bytes,
        }
    }

    /// Parse a configuration message and make it the latest document
    pub fn apply(&self, message: &Message) -> Result<ConfigReceipt, ConfigError> {
        let (json, compressed) = match message {
            Message::ConfigJson(bytes) => {
                if bytes.len() > self.max_bytes {
                    return Err(ConfigError::TooLarge {
                        limit: self.max_bytes,
                    });
                }
                (bytes.clone(), false)
            }
            Message::ConfigGzip(bytes) => (inflate(bytes, self.max_bytes)?, true),
            Message::Frame(_) => return Err(ConfigError::NotConfig(message.kind())),
        };

        let value: serde_json::Value = serde_json::from_slice(&json).map_err(ConfigError::Parse)?;
        let keys = value
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        let receipt = ConfigReceipt {
            kind: message.kind(),
            document_bytes: json.len(),
            keys,
        };

        tracing::info!(kind = receipt.kind, bytes = receipt.document_bytes, "configuration updated");
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(ConfigDocument {
            value,
            compressed,
            received_at: SystemTime::now(),
        });
        Ok(receipt)
    }

    /// Most recent document, if any
    pub fn latest(&self) -> Option<ConfigDocument> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ConfigHandler {
    fn default() -> Self {
        Self::new(platform::config::MAX_CONFIG_BYTES)
    }
}

/// Inflate gzip `bytes`, refusing output larger than `max_bytes`
pub fn inflate(bytes: &[u8], max_bytes: usize) -> Result<Vec<u8>, ConfigError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(ConfigError::Decompress)?;
    if out.len() > max_bytes {
        return Err(ConfigError::TooLarge { limit: max_bytes });
    }
    Ok(out)
}
