//! Decoder error types

use thiserror::Error;

/// Wire-level classification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Fewer than 8 bytes received
    #[error("message too short: {0} bytes, need at least 8")]
    TooShort(usize),

    /// First 8 bytes are neither a digit header nor a PNG signature
    #[error("malformed header: expected 8 ASCII digits or a PNG signature")]
    MalformedHeader,

    /// Header parsed but the type code is not recognised
    #[error("unknown message type '{0}'")]
    UnknownType(String),
}

/// Frame payload failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// No frame data received
    #[error("no frame data received")]
    Empty,

    /// Payload shorter than the minimum frame length
    #[error("frame data too small: {0} bytes")]
    TooSmall(usize),

    /// Bytes are not a PNG container
    #[error("frame is not a valid PNG: {0}")]
    InvalidContainer(String),

    /// PNG header carries no usable dimensions
    #[error("frame dimensions could not be resolved")]
    UnresolvableDimensions,
}

/// Anything [`decode`](crate::decode) can reject
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Wire-level failure
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Frame payload failure
    #[error(transparent)]
    Frame(#[from] FrameError),
}
