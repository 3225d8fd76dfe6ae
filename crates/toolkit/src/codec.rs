//! Binary ⇄ hex-text word codec.
//!
//! The simulator loader consumes memory images as text: one line per 8-byte
//! word, 16 lowercase hex digits, little-endian word value. Encoding pads
//! short inputs with zero bytes up to an 8-byte multiple and reports the pad
//! amount; decoding is the exact inverse, so `decode(encode(buf))` is the
//! identity for any buffer whose length is already a multiple of 8.

use std::fmt::Write as _;

use crate::common::error::{Result, ToolError};

/// Encodes a byte buffer as hex-text lines.
///
/// Returns the text and the number of zero bytes appended to reach an 8-byte
/// boundary (0 for aligned input).
pub fn encode(data: &[u8]) -> (String, usize) {
    let padding = (8 - data.len() % 8) % 8;
    let mut out = String::with_capacity((data.len() / 8 + 1) * 17);
    for chunk in data.chunks(8) {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        // Infallible: writing to a String cannot fail.
        let _ = writeln!(out, "{:016x}", u64::from_le_bytes(word));
    }
    (out, padding)
}

/// Decodes hex-text lines back into a byte buffer.
///
/// Blank lines are ignored; any other line must be exactly one 16-digit hex
/// word.
///
/// # Errors
///
/// Returns an error naming the 1-based line number of the first malformed
/// line.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let malformed = || ToolError::MalformedHexLine {
            line: idx + 1,
            text: trimmed.to_string(),
        };
        if trimmed.len() != 16 || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let word = u64::from_str_radix(trimmed, 16).map_err(|_| malformed())?;
        out.extend_from_slice(&word.to_le_bytes());
    }
    Ok(out)
}
