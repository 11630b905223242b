//! Frame ingestion wire protocol
//!
//! Classifies a received byte buffer into a [`Message`]. Two wire shapes are
//! accepted:
//!
//! ```text
//! Prefixed:  L L L L T T R R <payload...>
//!            └─len─┘ └ty┘└rt┘
//!            8 ASCII digits; length hint is advisory, route is opaque
//!
//! Raw PNG:   89 50 4E 47 0D 0A 1A 0A <rest of PNG...>
//!            the whole buffer is the frame
//! ```
//!
//! | Type | Message |
//! |------|---------|
//! | `00` | [`Message::ConfigJson`] |
//! | `01` | [`Message::ConfigGzip`] |
//! | `02` | [`Message::Frame`] |
//!
//! Decoding is pure: no I/O, no logging and no shared state, so it can run on
//! any request task.
//!
//! # Example
//!
//! ```
//! use protocol::{decode, encode_message, Message, MessageType};
//!
//! let payload = vec![0xAB; 128];
//! let wire = encode_message(MessageType::Frame, 0, &payload);
//! assert_eq!(&wire[..8], b"01280200");
//! assert_eq!(decode(&wire).unwrap(), Message::Frame(payload));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unreachable)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod error;
mod header;

pub use error::{DecodeError, FrameError, ProtocolError};
pub use header::{Header, MessageType, HEADER_LEN};

/// Eight-byte PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Smallest frame payload accepted; nothing shorter can be a useful PNG
pub const MIN_FRAME_LEN: usize = 100;

/// A classified message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// PNG frame bytes (signature not yet verified for prefixed frames)
    Frame(Vec<u8>),
    /// UTF-8 JSON configuration document
    ConfigJson(Vec<u8>),
    /// Gzip-compressed JSON configuration document
    ConfigGzip(Vec<u8>),
}

impl Message {
    /// Short label for logs and responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Frame(_) => "frame",
            Self::ConfigJson(_) => "config_json",
            Self::ConfigGzip(_) => "config_gzip",
        }
    }

    /// Payload bytes, whatever the kind
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Frame(b) | Self::ConfigJson(b) | Self::ConfigGzip(b) => b,
        }
    }
}

/// True when `bytes` starts with the PNG signature
pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Classify a received buffer
///
/// # Errors
///
/// - [`ProtocolError::TooShort`] for fewer than 8 bytes
/// - [`ProtocolError::MalformedHeader`] when the first 8 bytes are neither
///   digits nor a PNG signature
/// - [`ProtocolError::UnknownType`] for a type code other than `00`/`01`/`02`
/// - [`FrameError::TooSmall`] for a frame payload under [`MIN_FRAME_LEN`]
pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    decode_envelope(bytes).map(|(_, message)| message)
}

/// Classify a received buffer and return the parsed header, if any
///
/// Raw PNG buffers have no header and yield `None`.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_envelope(bytes: &[u8]) -> Result<(Option<Header>, Message), DecodeError> {
    let Some(prefix) = bytes.get(..HEADER_LEN) else {
        return Err(ProtocolError::TooShort(bytes.len()).into());
    };

    let Some(header) = Header::parse(prefix)? else {
        // Not a prefixed message; the only other shape is a bare PNG
        if has_png_signature(prefix) {
            let frame = check_frame_len(bytes)?;
            return Ok((None, Message::Frame(frame)));
        }
        return Err(ProtocolError::MalformedHeader.into());
    };

    let payload = &bytes[HEADER_LEN..];
    let message = match header.message_type {
        MessageType::Frame => Message::Frame(check_frame_len(payload)?),
        MessageType::ConfigJson => Message::ConfigJson(payload.to_vec()),
        MessageType::ConfigGzip => Message::ConfigGzip(payload.to_vec()),
    };
    Ok((Some(header), message))
}

/// Classify a body posted to the direct-frame endpoint (no header)
///
/// # Errors
///
/// - [`FrameError::Empty`] for an empty body
/// - [`FrameError::TooSmall`] for a body under [`MIN_FRAME_LEN`]
pub fn decode_raw_frame(bytes: &[u8]) -> Result<Message, DecodeError> {
    if bytes.is_empty() {
        return Err(FrameError::Empty.into());
    }
    Ok(Message::Frame(check_frame_len(bytes)?))
}

/// Build a prefixed wire message
///
/// The length hint is the payload length clamped to `9999`.
pub fn encode_message(message_type: MessageType, route: u8, payload: &[u8]) -> Vec<u8> {
    let header = Header::for_payload(message_type, route, payload.len());
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(payload);
    out
}

fn check_frame_len(bytes: &[u8]) -> Result<Vec<u8>, FrameError> {
    if bytes.len() < MIN_FRAME_LEN {
        return Err(FrameError::TooSmall(bytes.len()));
    }
    Ok(bytes.to_vec())
}
