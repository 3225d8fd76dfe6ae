//! # Memory Image Tests
//!
//! Verifies write-log parsing tolerance, direct image construction, the
//! instruction/data segment split, and both shapes of the safe-landing
//! fix-up, bit-for-bit against the fixed trailer encodings.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvckpt_core::config::FixupConfig;
use rvckpt_core::isa::encodings;
use rvckpt_core::mem::{self, WriteLogEntry};

fn entry(addr: u64, value: u64) -> WriteLogEntry {
    WriteLogEntry { addr, value }
}

/// Well-formed store lines parse into address/value pairs in input order.
#[test]
fn parse_matching_lines() {
    let text = "memory[0] <= 1182829300000297\nmemory[8] <= 0000009330529073\n";
    let entries = mem::parse_write_log(text);
    assert_eq!(
        entries,
        vec![
            entry(0, 0x1182_8293_0000_0297),
            entry(8, 0x0000_0093_3052_9073),
        ]
    );
}

/// Unmatched lines are skipped without aborting the rest of the log.
#[test]
fn parse_skips_unmatched_lines() {
    let text = "noise\nmemory[16] <= ff\nmemory[oops] <= 1\nmemory[24] <= 0\n";
    let entries = mem::parse_write_log(text);
    assert_eq!(entries, vec![entry(16, 0xff), entry(24, 0)]);
}

/// Hex values wider than 16 digits do not match the store grammar.
#[test]
fn parse_rejects_overwide_value() {
    let entries = mem::parse_write_log("memory[0] <= 11223344556677889900\n");
    assert!(entries.is_empty());
}

/// A log with no matching lines yields an empty entry vector, not an error.
#[test]
fn parse_empty_log() {
    assert!(mem::parse_write_log("just\nnoise\n").is_empty());
}

/// Entries at {0, 8, 16} produce a 24-byte image whose three windows hold the
/// little-endian encodings of the three values.
#[test]
fn direct_image_layout() {
    let entries = vec![entry(0, 0x1111), entry(8, 0x2222), entry(16, 0x3333)];
    let image = mem::build_image(&entries);
    assert_eq!(image.len(), 24);
    assert_eq!(image[0..8], 0x1111u64.to_le_bytes());
    assert_eq!(image[8..16], 0x2222u64.to_le_bytes());
    assert_eq!(image[16..24], 0x3333u64.to_le_bytes());
}

/// Gaps in the address space stay zero-filled.
#[test]
fn direct_image_zero_fills_gaps() {
    let image = mem::build_image(&[entry(0, u64::MAX), entry(32, 1)]);
    assert_eq!(image.len(), 40);
    assert!(image[8..32].iter().all(|&b| b == 0));
}

/// No entries means no image.
#[test]
fn direct_image_empty() {
    assert!(mem::build_image(&[]).is_empty());
}

/// Addresses [0, 8, 16, 40, 48] split into instructions [0, 8, 16] and data
/// [40, 48]: the first gap greater than 8 bytes is the boundary.
#[test]
fn segment_split_at_gap() {
    let entries: Vec<_> = [0u64, 8, 16, 40, 48].iter().map(|&a| entry(a, 0)).collect();
    assert_eq!(mem::split_segments(&entries, 8), 3);
}

/// A log with no oversized gap is all instruction segment.
#[test]
fn segment_split_contiguous() {
    let entries: Vec<_> = [0u64, 8, 16].iter().map(|&a| entry(a, 0)).collect();
    assert_eq!(mem::split_segments(&entries, 8), 3);
}

/// "Full" slot: nonzero upper 32 bits in the last instruction word appends
/// the two-word trailer at +8 and +16, the final word trapping in its low half.
#[test]
fn fixup_full_slot() {
    let cfg = FixupConfig::default();
    let fixed = mem::fix_up(vec![entry(0, 0x0000_0033_0000_0033)], &cfg);
    assert_eq!(
        fixed,
        vec![
            entry(0, 0x0000_0033_0000_0033),
            entry(
                8,
                (u64::from(encodings::LI_A7_93) << 32) | u64::from(encodings::LI_A0_0)
            ),
            entry(16, u64::from(encodings::ECALL)),
        ]
    );
    assert_eq!(fixed[2].value & 0xffff_ffff, 0x0000_0073);
}

/// "Partial" slot: zero upper 32 bits are overwritten with `li a0, 0` and
/// exactly one new word appears at +8 packing `li a7, 93` + `ecall`.
#[test]
fn fixup_partial_slot() {
    let cfg = FixupConfig::default();
    let fixed = mem::fix_up(vec![entry(0, 0x0000_0033)], &cfg);
    assert_eq!(
        fixed,
        vec![
            entry(0, (u64::from(encodings::LI_A0_0) << 32) | 0x0000_0033),
            entry(8, (u64::from(encodings::ECALL) << 32) | u64::from(encodings::LI_A7_93)),
        ]
    );
}

/// The data segment passes through the fix-up untouched and re-sorted after
/// the extended instruction segment.
#[test]
fn fixup_preserves_data_segment() {
    let cfg = FixupConfig::default();
    let fixed = mem::fix_up(
        vec![entry(100, 0xdead), entry(0, 0x1_0000_0001)],
        &cfg,
    );
    let addrs: Vec<u64> = fixed.iter().map(|e| e.addr).collect();
    assert_eq!(addrs, vec![0, 8, 16, 100]);
    assert_eq!(fixed[3], entry(100, 0xdead));
}

/// Input order does not matter: entries are sorted by address first.
#[test]
fn fixup_sorts_input() {
    let cfg = FixupConfig::default();
    let fixed = mem::fix_up(
        vec![entry(8, 0x1_0000_0000), entry(0, 0x2)],
        &cfg,
    );
    assert_eq!(fixed[0].addr, 0);
    assert_eq!(fixed.last().map(|e| e.addr), Some(24));
}

/// An empty log is returned unchanged.
#[test]
fn fixup_empty() {
    assert!(mem::fix_up(Vec::new(), &FixupConfig::default()).is_empty());
}

/// Fixed-up entries re-serialize in the exact store grammar and re-parse to
/// the same records.
#[rstest]
#[case(vec![entry(0, 0xff), entry(8, 0)])]
#[case(vec![entry(424, 0x1182_8293_0000_0297)])]
fn fix_log_round_trips(#[case] entries: Vec<WriteLogEntry>) {
    let text = mem::write_fix_log(&entries);
    for line in text.lines() {
        assert!(line.starts_with("memory["), "bad line: {line}");
    }
    assert_eq!(mem::parse_write_log(&text), entries);
}
