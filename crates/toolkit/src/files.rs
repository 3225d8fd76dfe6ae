//! Numeric-ordered batch file discovery.
//!
//! Batch tools process directories of numbered files (`write_log_3.txt`,
//! `7_dumpmem.bin`, ...). Visiting order is positionally significant: the
//! generated compare table and the patched sequence numbers index intervals by
//! batch position, so files must be walked in ascending numeric order of the
//! number embedded in the name, not lexicographic order, which would put
//! `10` before `2`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::{Result, ToolError};

/// Lists files named `<prefix><decimal><suffix>` in ascending numeric order.
///
/// Non-matching entries are ignored. Returns `(number, path)` pairs; an empty
/// result is not an error (the caller reports it).
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn numbered_files(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<(u64, PathBuf)>> {
    let read_err = |source| ToolError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let number = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .and_then(|digits| digits.parse::<u64>().ok());
        if let Some(number) = number {
            found.push((number, entry.path()));
        }
    }
    found.sort_by_key(|(number, _)| *number);
    Ok(found)
}
