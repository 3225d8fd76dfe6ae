//! # Batch Ordering Tests
//!
//! Verifies that numbered batch files are discovered in ascending numeric
//! order of the embedded number, not lexicographic order, and that
//! non-matching names are ignored.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use rvckpt_core::ToolError;
use rvckpt_core::files;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"x").unwrap();
}

/// `write_log_10` sorts after `write_log_2`: numeric, not lexicographic.
#[test]
fn numeric_order_not_lexicographic() {
    let dir = TempDir::new().unwrap();
    for name in ["write_log_10.txt", "write_log_2.txt", "write_log_1.txt"] {
        touch(dir.path(), name);
    }
    let found = files::numbered_files(dir.path(), "write_log_", ".txt").unwrap();
    let numbers: Vec<u64> = found.iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![1, 2, 10]);
}

/// Names that miss the prefix, suffix, or a decimal number are ignored.
#[test]
fn ignores_non_matching_names() {
    let dir = TempDir::new().unwrap();
    for name in [
        "write_log_3.txt",
        "write_log_x.txt",
        "fix_log_1.txt",
        "write_log_2.bin",
        "notes.md",
    ] {
        touch(dir.path(), name);
    }
    let found = files::numbered_files(dir.path(), "write_log_", ".txt").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, 3);
}

/// The empty prefix matches names that are just `<number><suffix>`.
#[test]
fn empty_prefix_matches_bare_numbers() {
    let dir = TempDir::new().unwrap();
    for name in ["0_dumpmem.bin", "12_dumpmem.bin", "dumpmem.bin"] {
        touch(dir.path(), name);
    }
    let found = files::numbered_files(dir.path(), "", "_dumpmem.bin").unwrap();
    let numbers: Vec<u64> = found.iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![0, 12]);
}

/// An empty directory yields an empty batch, not an error.
#[test]
fn empty_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(files::numbered_files(dir.path(), "write_log_", ".txt")
        .unwrap()
        .is_empty());
}

/// A missing directory is a fatal read error.
#[test]
fn missing_directory_fails() {
    let err = files::numbered_files(Path::new("/nonexistent/batch"), "a_", ".txt").unwrap_err();
    assert!(matches!(err, ToolError::Read { .. }));
}
