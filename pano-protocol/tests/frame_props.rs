use pano_protocol::{Frame, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parser_recovers_frame_after_line_noise(
        noise in proptest::collection::vec(any::<u8>().prop_filter("not a start byte", |b| *b != FRAME_START), 0..32),
        address in any::<u8>(),
        msg_type in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
    ) {
        let frame = Frame::new(address, msg_type, &payload).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut stream = noise.clone();
        stream.extend_from_slice(&encoded);

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&stream).unwrap();
        prop_assert_eq!(parsed, Some(frame));
    }

    #[test]
    fn single_bit_flip_is_never_accepted_as_the_same_frame(
        payload in proptest::collection::vec(any::<u8>(), 1..16),
        bit in 0usize..8,
    ) {
        let frame = Frame::new(0x01, 0x41, &payload).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        // Corrupt the first payload byte; the CRC must catch it
        encoded[4] ^= 1 << bit;

        let mut parser = FrameParser::new();
        let result = parser.feed_bytes(&encoded);
        prop_assert!(result != Ok(Some(frame)));
    }
}
