//! Write-log parsing and memory image construction.
//!
//! A write-log is a trace of 64-bit store operations, one per line:
//! `memory[<decimal address>] <= <hex value>`. This module provides:
//! 1. **Parsing:** Tolerant line-by-line extraction of [`WriteLogEntry`] records.
//! 2. **Direct images:** A zero-initialized buffer sized `max(address) + 8`
//!    with each value written little-endian at its address.
//! 3. **Safe-landing fix-up:** Segmenting the log into instruction and data
//!    regions and terminating the instruction region with an exit-syscall
//!    trailer, so a replayed window always ends in a decodable trap.

use std::fmt::Write as _;

use tracing::warn;

use crate::config::FixupConfig;

/// One recorded store: a byte address and a 64-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteLogEntry {
    /// Byte offset of the store (8-byte aligned in well-formed logs).
    pub addr: u64,
    /// Stored 64-bit word.
    pub value: u64,
}

/// Parses one write-log line into an entry.
///
/// Returns `None` for lines that do not match the store grammar.
fn parse_line(line: &str) -> Option<WriteLogEntry> {
    let rest = line.trim().strip_prefix("memory[")?;
    let (addr_text, rest) = rest.split_once(']')?;
    let value_text = rest.trim_start().strip_prefix("<=")?.trim();
    if value_text.is_empty() || value_text.len() > 16 {
        return None;
    }
    let addr = addr_text.trim().parse().ok()?;
    let value = u64::from_str_radix(value_text, 16).ok()?;
    Some(WriteLogEntry { addr, value })
}

/// Parses a whole write-log text into entries, preserving input order.
///
/// Unmatched non-blank lines are reported and skipped; an input with no
/// matching lines yields an empty vector (the caller decides whether that
/// means "skip this file").
pub fn parse_write_log(text: &str) -> Vec<WriteLogEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(entry) => entries.push(entry),
            None => warn!(line, "unrecognized write-log line, skipping"),
        }
    }
    entries
}

/// Builds a byte-addressable memory image from write-log entries.
///
/// The image is zero-initialized and sized `max(address) + 8`; each entry owns
/// its 8-byte little-endian window, last write winning on overlap. Writes past
/// the buffer are reported and dropped (unreachable for a buffer sized from
/// the same entries). Empty input yields an empty image.
pub fn build_image(entries: &[WriteLogEntry]) -> Vec<u8> {
    let Some(max_addr) = entries.iter().map(|e| e.addr).max() else {
        return Vec::new();
    };
    let size = (max_addr + 8) as usize;
    let mut image = vec![0u8; size];
    for entry in entries {
        let start = entry.addr as usize;
        match image.get_mut(start..start + 8) {
            Some(window) => window.copy_from_slice(&entry.value.to_le_bytes()),
            None => warn!(
                addr = entry.addr,
                size, "write-log address outside image, dropping"
            ),
        }
    }
    image
}

/// Splits address-sorted entries into instruction and data segments.
///
/// The instruction segment is the maximal prefix whose consecutive address
/// deltas stay within `gap` bytes; the data segment starts at the first entry
/// whose gap from its predecessor exceeds it. Returns the split index.
pub fn split_segments(sorted: &[WriteLogEntry], gap: u64) -> usize {
    for i in 1..sorted.len() {
        if sorted[i].addr - sorted[i - 1].addr > gap {
            return i;
        }
    }
    sorted.len()
}

/// Applies the safe-landing fix-up to a write-log.
///
/// Entries are sorted by address and segmented. The last instruction word's
/// upper 32 bits decide the shape of the exit trailer:
/// - **nonzero** ("full" slot): two new words are appended at `+8` and `+16`,
///   the final one carrying the trap encoding in its low half;
/// - **zero** ("partial" slot): the upper half of the last word is overwritten
///   with the first trailer instruction and exactly one new word appears at
///   `+8`, packing the remaining two instructions.
///
/// The recombined entries are returned re-sorted by address. An empty input is
/// returned unchanged.
pub fn fix_up(mut entries: Vec<WriteLogEntry>, cfg: &FixupConfig) -> Vec<WriteLogEntry> {
    if entries.is_empty() {
        return entries;
    }
    entries.sort_by_key(|e| e.addr);
    let split = split_segments(&entries, cfg.gap_threshold);
    let mut data: Vec<WriteLogEntry> = entries.split_off(split);
    let mut instr = entries;

    // Never empty: the first sorted entry always opens the instruction segment.
    if let Some(last) = instr.last_mut() {
        let last_addr = last.addr;
        if last.value >> 32 == 0 {
            last.value = (u64::from(cfg.pad_low) << 32) | (last.value & 0xffff_ffff);
            instr.push(WriteLogEntry {
                addr: last_addr + 8,
                value: (u64::from(cfg.trap) << 32) | u64::from(cfg.pad_high),
            });
        } else {
            instr.push(WriteLogEntry {
                addr: last_addr + 8,
                value: (u64::from(cfg.pad_high) << 32) | u64::from(cfg.pad_low),
            });
            instr.push(WriteLogEntry {
                addr: last_addr + 16,
                value: u64::from(cfg.trap),
            });
        }
    }

    instr.append(&mut data);
    instr.sort_by_key(|e| e.addr);
    instr
}

/// Serializes entries back to the write-log grammar.
///
/// One `memory[<addr>] <= <016x>` line per entry, in the given order. Used to
/// emit the fixed-up log beside the binary image for inspection.
pub fn write_fix_log(entries: &[WriteLogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        // Infallible: writing to a String cannot fail.
        let _ = writeln!(out, "memory[{}] <= {:016x}", entry.addr, entry.value);
    }
    out
}
