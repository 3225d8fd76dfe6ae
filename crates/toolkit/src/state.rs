//! Architectural-state dump parsing.
//!
//! A dump is a text stream of interval blocks separated by a delimiter line of
//! `=` characters. Each block is headed by `Interval <id>` and followed by
//! `key: value` lines. This module provides:
//! 1. **Tokenizing:** Classifying each line into a typed record.
//! 2. **Assembly:** Building ordered [`Interval`] register maps, applying the
//!    ABI alias table and the key drop rules.
//! 3. **Re-serialization:** Writing the parsed intervals back out as the
//!    intermediate inspection format.
//!
//! Slot order within an interval is preserved exactly as read: it fixes the
//! data-section offsets the generated load instructions address.

use std::fmt::Write as _;

use tracing::debug;

use crate::isa::abi;

/// Dump key for the block-wide header line that is dropped during parsing.
const ARCH_STATE_KEY: &str = "architecture state";

/// One register (or pass-through) slot of an interval, in dump order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegSlot {
    /// ABI register name, `pc`, or a lowercased pass-through key.
    pub name: String,
    /// Captured value, carried verbatim into the generated `.dword`.
    pub value: String,
}

/// One parsed interval: its id and its ordered register slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Interval id from the `Interval <id>` header.
    pub id: u64,
    /// Register slots in the exact order they appeared in the dump.
    pub slots: Vec<RegSlot>,
}

/// Typed classification of a single dump line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpLine<'a> {
    /// A delimiter line (all `=`) separating interval blocks.
    Delimiter,
    /// An `Interval <id>` block header.
    IntervalHeader(u64),
    /// A `key: value` line (both sides trimmed, key not yet lowercased).
    KeyValue(&'a str, &'a str),
    /// An empty or whitespace-only line.
    Blank,
    /// Anything else; skipped without aborting the parse.
    Unrecognized,
}

/// Classifies one line of an architectural-state dump.
pub fn classify(line: &str) -> DumpLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return DumpLine::Blank;
    }
    if trimmed.len() >= 8 && trimmed.bytes().all(|b| b == b'=') {
        return DumpLine::Delimiter;
    }
    let mut words = trimmed.split_whitespace();
    if words.next() == Some("Interval") {
        if let Some(id) = words.next().and_then(|w| w.parse().ok()) {
            return DumpLine::IntervalHeader(id);
        }
    }
    if let Some((key, value)) = trimmed.split_once(':') {
        return DumpLine::KeyValue(key.trim(), value.trim());
    }
    DumpLine::Unrecognized
}

/// Parses a whole architectural-state dump into ordered intervals.
///
/// Key handling within a block:
/// - keys are lowercased;
/// - the `architecture state` header key is dropped;
/// - keys starting with the CSR prefix are dropped (CSRs are never restored);
/// - `x<n>` / `f<n>` keys are rewritten to their ABI aliases;
/// - any other key passes through lowercased.
///
/// Lines outside a recognized grammar are skipped silently; key-value lines
/// before the first `Interval` header contribute nothing.
pub fn parse_state_dump(text: &str) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut current: Option<Interval> = None;

    for line in text.lines() {
        match classify(line) {
            DumpLine::Delimiter => {
                if let Some(done) = current.take() {
                    intervals.push(done);
                }
            }
            DumpLine::IntervalHeader(id) => {
                if let Some(done) = current.take() {
                    intervals.push(done);
                }
                current = Some(Interval {
                    id,
                    slots: Vec::new(),
                });
            }
            DumpLine::KeyValue(key, value) => {
                let Some(interval) = current.as_mut() else {
                    debug!(key, "key-value line outside any interval block");
                    continue;
                };
                let key = key.to_lowercase();
                if key == ARCH_STATE_KEY || key.starts_with(abi::CSR_KEY_PREFIX) {
                    continue;
                }
                let name = abi::alias(&key).map_or(key, str::to_string);
                interval.slots.push(RegSlot {
                    name,
                    value: value.to_string(),
                });
            }
            DumpLine::Blank => {}
            DumpLine::Unrecognized => {
                debug!(line, "skipping unrecognized dump line");
            }
        }
    }
    if let Some(done) = current.take() {
        intervals.push(done);
    }
    intervals
}

/// Re-serializes parsed intervals as the intermediate inspection format.
///
/// One `Interval <id>` header per block, one `name: value` line per slot,
/// blocks separated by a blank line. Parsing the output yields the same
/// intervals back.
pub fn write_intermediate(intervals: &[Interval]) -> String {
    let mut out = String::new();
    for interval in intervals {
        // Infallible: writing to a String cannot fail.
        let _ = writeln!(out, "Interval {}", interval.id);
        for slot in &interval.slots {
            let _ = writeln!(out, "{}: {}", slot.name, slot.value);
        }
        out.push('\n');
    }
    out
}
