//! # Codec Tests
//!
//! Verifies the binary ⇄ hex-text word codec: line format, little-endian word
//! values, padding reporting, decode failures, and the round-trip identity
//! for 8-byte-multiple inputs.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rvckpt_core::ToolError;
use rvckpt_core::codec;

/// One 8-byte word encodes as 16 lowercase hex digits of its LE value.
#[test]
fn encode_single_word() {
    let data = 0x1122_3344_5566_7788u64.to_le_bytes();
    let (text, padding) = codec::encode(&data);
    assert_eq!(text, "1122334455667788\n");
    assert_eq!(padding, 0);
}

/// Aligned multi-word input encodes one line per word, in address order.
#[test]
fn encode_multiple_words() {
    let mut data = Vec::new();
    data.extend_from_slice(&1u64.to_le_bytes());
    data.extend_from_slice(&0xffu64.to_le_bytes());
    let (text, padding) = codec::encode(&data);
    assert_eq!(text, "0000000000000001\n00000000000000ff\n");
    assert_eq!(padding, 0);
}

/// Short input is zero-padded to an 8-byte boundary and the amount reported.
#[test]
fn encode_reports_padding() {
    let (text, padding) = codec::encode(&[0xab, 0xcd, 0xef]);
    assert_eq!(padding, 5);
    assert_eq!(text, "0000000000efcdab\n");
}

/// The empty buffer encodes to no lines and no padding.
#[test]
fn encode_empty() {
    let (text, padding) = codec::encode(&[]);
    assert_eq!(text, "");
    assert_eq!(padding, 0);
}

/// Decoding reverses the hex-line format back into LE bytes.
#[test]
fn decode_known_lines() {
    let data = codec::decode("0000000000000001\n00000000000000ff\n").unwrap();
    let mut expected = Vec::new();
    expected.extend_from_slice(&1u64.to_le_bytes());
    expected.extend_from_slice(&0xffu64.to_le_bytes());
    assert_eq!(data, expected);
}

/// Blank lines in hex text are tolerated and contribute nothing.
#[test]
fn decode_skips_blank_lines() {
    let data = codec::decode("0000000000000001\n\n  \n00000000000000ff\n").unwrap();
    assert_eq!(data.len(), 16);
}

/// A line that is not 16 hex digits fails with its 1-based line number.
#[test]
fn decode_rejects_malformed_line() {
    let err = codec::decode("0000000000000001\nnot-hex\n").unwrap_err();
    match err {
        ToolError::MalformedHexLine { line, text } => {
            assert_eq!(line, 2);
            assert_eq!(text, "not-hex");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A short hex line fails even when every digit is valid.
#[test]
fn decode_rejects_short_line() {
    let err = codec::decode("1234\n").unwrap_err();
    assert!(matches!(err, ToolError::MalformedHexLine { line: 1, .. }));
}

proptest! {
    /// decode(encode(buf)) == buf for any buffer of whole 64-bit words.
    #[test]
    fn round_trip_identity(words in proptest::collection::vec(any::<u64>(), 0..64)) {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let (text, padding) = codec::encode(&bytes);
        prop_assert_eq!(padding, 0);
        prop_assert_eq!(codec::decode(&text).unwrap(), bytes);
    }

    /// Unaligned input round-trips to itself plus the reported zero padding.
    #[test]
    fn round_trip_with_padding(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let (text, padding) = codec::encode(&bytes);
        prop_assert_eq!((bytes.len() + padding) % 8, 0);
        let mut expected = bytes;
        expected.extend(std::iter::repeat_n(0u8, padding));
        prop_assert_eq!(codec::decode(&text).unwrap(), expected);
    }
}
