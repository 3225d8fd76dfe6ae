//! Memory dump reduction passes.
//!
//! Captured per-interval memory dumps carry large runs of padding: zero bytes
//! at the tail and pre-`.data` content at the head. Two independent,
//! idempotent passes trim them:
//! 1. **Tail:** Drop all trailing zero bytes; length becomes the index of the
//!    last nonzero byte plus one.
//! 2. **Head:** Discard everything before a resolved cut position (typically
//!    `.data` section start minus the canonical DRAM load base).
//!
//! The passes target disjoint ends of the buffer, so their effect is
//! order-independent.

use crate::common::error::{Result, ToolError};

/// Removes trailing zero bytes from a buffer.
///
/// Returns the number of bytes removed. An all-zero buffer truncates to
/// empty; applying the pass twice removes nothing the second time.
pub fn trim_trailing_zeros(buf: &mut Vec<u8>) -> usize {
    let keep = buf.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let removed = buf.len() - keep;
    buf.truncate(keep);
    removed
}

/// Keeps only the buffer content from `pos` onward.
///
/// # Errors
///
/// Returns an error if `pos` is not a valid position within the buffer; the
/// buffer is left unmodified in that case.
pub fn cut_before(buf: &mut Vec<u8>, pos: u64) -> Result<()> {
    let pos = usize::try_from(pos).map_err(|_| ToolError::CutOutOfRange {
        pos,
        len: buf.len(),
    })?;
    if pos >= buf.len() {
        return Err(ToolError::CutOutOfRange {
            pos: pos as u64,
            len: buf.len(),
        });
    }
    *buf = buf.split_off(pos);
    Ok(())
}
