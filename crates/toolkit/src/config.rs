//! Configuration for the checkpoint toolchain.
//!
//! This module collects the paper-specific constants the transforms depend on:
//! 1. **Fix-up:** The instruction/data gap threshold and the trailer encodings.
//! 2. **Layout:** The canonical DRAM load base used to position memory dumps.
//! 3. **Naming:** The symbol of the persistent invocation counter.
//!
//! Defaults match the originating checkpoint convention; overrides are supplied
//! as JSON via [`ToolConfig::from_file`]. None of these values are derived at
//! runtime.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{Result, ToolError};
use crate::isa::encodings;

/// Default configuration constants for the toolchain.
mod defaults {
    /// Maximum byte gap between consecutive write-log addresses that still
    /// counts as the same (instruction) segment. One 64-bit word.
    pub const GAP_THRESHOLD: u64 = 8;

    /// Canonical base address where the simulator loads the workload image.
    ///
    /// The `.data` section start minus this base gives the cut position for
    /// memory-dump truncation.
    pub const DRAM_BASE: u64 = 0x1_0000_0000;

    /// Symbol of the persistent invocation counter owned by the generated
    /// program's data section.
    pub const COUNTER_SYMBOL: &str = "Init_counter";
}

/// Constants governing the instruction-segment safe-landing fix-up.
///
/// The three encodings spell `li a0, 0; li a7, 93; ecall`, a well-formed exit
/// syscall that terminates any replayed instruction window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FixupConfig {
    /// Address delta above which an entry starts the data segment.
    pub gap_threshold: u64,
    /// First trailer instruction (`li a0, 0`).
    pub pad_low: u32,
    /// Second trailer instruction (`li a7, 93`).
    pub pad_high: u32,
    /// Final trailer instruction (`ecall`).
    pub trap: u32,
}

impl Default for FixupConfig {
    fn default() -> Self {
        Self {
            gap_threshold: defaults::GAP_THRESHOLD,
            pad_low: encodings::LI_A0_0,
            pad_high: encodings::LI_A7_93,
            trap: encodings::ECALL,
        }
    }
}

/// Root toolchain configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Safe-landing fix-up constants.
    pub fixup: FixupConfig,
    /// Canonical DRAM load base address.
    pub dram_base: u64,
    /// Symbol name of the persistent invocation counter.
    pub counter_symbol: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            fixup: FixupConfig::default(),
            dram_base: defaults::DRAM_BASE,
            counter_symbol: defaults::COUNTER_SYMBOL.to_string(),
        }
    }
}

impl ToolConfig {
    /// Loads configuration overrides from a JSON file.
    ///
    /// Fields absent from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ToolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ToolError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
