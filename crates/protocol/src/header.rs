//! `LLLLTTRR` message header

use crate::error::ProtocolError;

/// Header length in bytes
pub const HEADER_LEN: usize = 8;

/// Largest value the 4-digit length hint can carry
const MAX_LENGTH_HINT: u16 = 9999;

/// Message type code (`TT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// `00`
    ConfigJson,
    /// `01`
    ConfigGzip,
    /// `02`
    Frame,
}

impl MessageType {
    /// Two-digit wire code
    pub fn code(self) -> u8 {
        match self {
            Self::ConfigJson => 0,
            Self::ConfigGzip => 1,
            Self::Frame => 2,
        }
    }

    fn from_digits(tt: [u8; 2]) -> Result<Self, ProtocolError> {
        match &tt {
            b"00" => Ok(Self::ConfigJson),
            b"01" => Ok(Self::ConfigGzip),
            b"02" => Ok(Self::Frame),
            _ => Err(ProtocolError::UnknownType(
                String::from_utf8_lossy(&tt).into_owned(),
            )),
        }
    }
}

/// Parsed message prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Advisory payload length; never validated against the real length
    pub length_hint: u16,
    /// Message type
    pub message_type: MessageType,
    /// Route code; opaque to the decoder
    pub route: u8,
}

impl Header {
    /// Header describing a payload of `len` bytes
    pub fn for_payload(message_type: MessageType, route: u8, len: usize) -> Self {
        let length_hint = u16::try_from(len).map_or(MAX_LENGTH_HINT, |l| l.min(MAX_LENGTH_HINT));
        Self {
            length_hint,
            message_type,
            route: route.min(99),
        }
    }

    /// Parse the first 8 bytes
    ///
    /// Returns `Ok(None)` when the bytes are not all ASCII digits (so the
    /// caller can try another shape), and an error when they are digits but
    /// the type code is unknown.
    pub(crate) fn parse(prefix: &[u8]) -> Result<Option<Self>, ProtocolError> {
        let Ok(digits) = <[u8; HEADER_LEN]>::try_from(prefix) else {
            return Err(ProtocolError::TooShort(prefix.len()));
        };
        if !digits.iter().all(u8::is_ascii_digit) {
            return Ok(None);
        }

        let message_type = MessageType::from_digits([digits[4], digits[5]])?;
        Ok(Some(Self {
            length_hint: digits_value(&digits[..4]),
            message_type,
            route: u8::try_from(digits_value(&digits[6..])).unwrap_or(u8::MAX),
        }))
    }

    /// Render as 8 ASCII digits
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let text = format!(
            "{:04}{:02}{:02}",
            self.length_hint.min(MAX_LENGTH_HINT),
            self.message_type.code(),
            self.route.min(99)
        );
        let mut out = [b'0'; HEADER_LEN];
        out.copy_from_slice(&text.as_bytes()[..HEADER_LEN]);
        out
    }
}

fn digits_value(digits: &[u8]) -> u16 {
    digits
        .iter()
        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let header = Header::parse(b"12340217").unwrap().unwrap();
        assert_eq!(header.length_hint, 1234);
        assert_eq!(header.message_type, MessageType::Frame);
        assert_eq!(header.route, 17);
    }

    #[test]
    fn test_non_digits_are_not_a_header() {
        assert_eq!(Header::parse(b"1234021x").unwrap(), None);
    }

    #[test]
    fn test_encode_clamps_length_hint() {
        let header = Header::for_payload(MessageType::Frame, 3, 250_000);
        assert_eq!(&header.encode(), b"99990203");
    }

    #[test]
    fn test_encode_parse_agree() {
        let header = Header::for_payload(MessageType::ConfigGzip, 5, 42);
        assert_eq!(Header::parse(&header.encode()).unwrap(), Some(header));
    }
}
