//! # Configuration Tests
//!
//! Verifies the default toolchain constants and partial JSON overrides.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use rvckpt_core::config::{FixupConfig, ToolConfig};
use rvckpt_core::isa::encodings;
use rvckpt_core::ToolError;

/// The defaults carry the paper's constants bit-for-bit.
#[test]
fn default_constants() {
    let cfg = ToolConfig::default();
    assert_eq!(cfg.fixup.gap_threshold, 8);
    assert_eq!(cfg.fixup.pad_low, encodings::LI_A0_0);
    assert_eq!(cfg.fixup.pad_high, encodings::LI_A7_93);
    assert_eq!(cfg.fixup.trap, encodings::ECALL);
    assert_eq!(cfg.dram_base, 0x1_0000_0000);
    assert_eq!(cfg.counter_symbol, "Init_counter");
}

/// The trailer encodings are the fixed literals, never re-derived.
#[test]
fn trailer_encodings_are_fixed() {
    let fixup = FixupConfig::default();
    assert_eq!(fixup.trap, 0x0000_0073);
    assert_eq!(fixup.pad_low, 0x0000_0513);
    assert_eq!(fixup.pad_high, 0x05d0_0893);
}

/// A partial JSON override keeps defaults for absent fields.
#[test]
fn partial_json_override() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"dram_base": 2147483648, "fixup": {"gap_threshold": 16}}"#)
        .unwrap();
    file.flush().unwrap();

    let cfg = ToolConfig::from_file(file.path()).unwrap();
    assert_eq!(cfg.dram_base, 0x8000_0000);
    assert_eq!(cfg.fixup.gap_threshold, 16);
    assert_eq!(cfg.fixup.trap, encodings::ECALL);
    assert_eq!(cfg.counter_symbol, "Init_counter");
}

/// Invalid JSON surfaces as a config error naming the file.
#[test]
fn invalid_json_fails() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{not json").unwrap();
    file.flush().unwrap();

    let err = ToolConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ToolError::Config { .. }));
}
