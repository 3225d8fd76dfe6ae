//! Toolchain error definitions.
//!
//! This module defines the fatal error taxonomy for checkpoint construction. It covers:
//! 1. **Resolution failures:** Missing ELF symbols or sections, which abort a whole batch.
//! 2. **Bounds failures:** Patch or cut positions outside the target buffer.
//! 3. **I/O failures:** File reads and writes, with the offending path attached.
//!
//! Tolerated conditions (malformed dump/log lines, empty inputs) are deliberately
//! absent: those are reported via `tracing` and skipped, never surfaced as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Fatal errors raised by the checkpoint toolchain.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A file could not be written.
    #[error("could not write '{}': {source}", path.display())]
    Write {
        /// Path of the unwritable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The ELF image failed to parse.
    #[error("failed to parse ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// A symbol required for counter patching is absent from the symbol table.
    #[error("symbol '{0}' not found in ELF symbol table")]
    SymbolNotFound(String),

    /// The ELF image has no `.data` section to anchor address adjustment.
    #[error("ELF image has no .data section")]
    NoDataSection,

    /// The adjusted counter address falls outside the patchable range.
    ///
    /// The target buffer is left byte-identical when this is raised.
    #[error("counter offset {offset:#x} outside patchable range of {len}-byte image")]
    PatchOutOfRange {
        /// Adjusted address (symbol address minus `.data` start).
        offset: i64,
        /// Length of the image that was to be patched.
        len: usize,
    },

    /// The cut position for image truncation is outside the buffer.
    #[error("cut position {pos:#x} outside image of {len} bytes")]
    CutOutOfRange {
        /// Requested cut position.
        pos: u64,
        /// Length of the image.
        len: usize,
    },

    /// A hex-text line did not decode to one 64-bit word.
    #[error("line {line}: expected 16 hex digits, got '{text}'")]
    MalformedHexLine {
        /// 1-based line number.
        line: usize,
        /// The offending line content.
        text: String,
    },

    /// A state dump yielded no intervals, so there is nothing to generate.
    #[error("state dump contained no intervals")]
    EmptyStateDump,

    /// The requested phase-context source interval does not exist.
    #[error("phase interval {index} out of range ({count} intervals parsed)")]
    PhaseOutOfRange {
        /// Requested interval index.
        index: usize,
        /// Number of intervals actually parsed.
        count: usize,
    },

    /// A configuration override file failed to parse.
    #[error("invalid config '{}': {source}", path.display())]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
