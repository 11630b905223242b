//! Property tests for the wire decoder

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use proptest::prelude::*;
use protocol::{
    decode, decode_envelope, encode_message, DecodeError, FrameError, Message, MessageType,
    ProtocolError, MIN_FRAME_LEN, PNG_SIGNATURE,
};

/// Noisy image; solid ones can encode below the minimum frame size
fn real_png(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    let img = RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn real_png_decodes_as_whole_buffer() {
    let png = real_png(64, 32);
    assert!(png.len() >= MIN_FRAME_LEN);
    assert_eq!(decode(&png), Ok(Message::Frame(png)));
}

#[test]
fn prefixed_real_png_yields_payload() {
    let png = real_png(64, 32);
    let wire = encode_message(MessageType::Frame, 0, &png);
    let (header, message) = decode_envelope(&wire).unwrap();
    assert_eq!(header.unwrap().message_type, MessageType::Frame);
    assert_eq!(message, Message::Frame(png));
}

proptest! {
    #[test]
    fn short_buffers_are_too_short(bytes in proptest::collection::vec(any::<u8>(), 0..8)) {
        let len = bytes.len();
        prop_assert_eq!(
            decode(&bytes),
            Err(DecodeError::Protocol(ProtocolError::TooShort(len)))
        );
    }

    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&bytes);
    }

    #[test]
    fn png_signature_buffers_are_frames(tail in proptest::collection::vec(any::<u8>(), 92..400)) {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&tail);
        prop_assert_eq!(decode(&bytes), Ok(Message::Frame(bytes.clone())));
    }

    #[test]
    fn length_hint_is_advisory(
        hint in 0u16..=9999,
        route in 0u8..=99,
        payload in proptest::collection::vec(any::<u8>(), MIN_FRAME_LEN..600),
    ) {
        let mut wire = format!("{hint:04}02{route:02}").into_bytes();
        wire.extend_from_slice(&payload);
        prop_assert_eq!(decode(&wire), Ok(Message::Frame(payload)));
    }

    #[test]
    fn small_frame_payloads_rejected(payload in proptest::collection::vec(any::<u8>(), 0..MIN_FRAME_LEN)) {
        let len = payload.len();
        let wire = encode_message(MessageType::Frame, 0, &payload);
        prop_assert_eq!(decode(&wire), Err(DecodeError::Frame(FrameError::TooSmall(len))));
    }

    #[test]
    fn unknown_type_codes_rejected(tt in 3u8..=99) {
        let wire = format!("0000{tt:02}00").into_bytes();
        prop_assert_eq!(
            decode(&wire),
            Err(DecodeError::Protocol(ProtocolError::UnknownType(format!("{tt:02}"))))
        );
    }
}
