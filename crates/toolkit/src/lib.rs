//! SimPoint checkpoint construction toolchain for RISC-V simulators.
//!
//! This crate turns the raw artifacts captured around a SimPoint boundary into
//! simulator-loadable checkpoint state. It provides:
//! 1. **State parsing:** Architectural-state dump text into ordered per-interval register maps.
//! 2. **Code generation:** A self-selecting restore routine (dispatch table, per-interval
//!    register reloads, trap-return control transfer) plus its backing data section.
//! 3. **Memory images:** Store write-logs into byte-exact little-endian memory images,
//!    with an optional safe-landing fix-up of the instruction segment.
//! 4. **ELF resolution:** Symbol and `.data` section addresses for counter patching.
//! 5. **Codecs & reduction:** Binary ⇄ hex-text transcoding and image truncation.
//!
//! Every transform is a bounded, single-pass, deterministic file-to-file operation;
//! re-running on unchanged inputs yields byte-identical outputs.

/// Shared error types for the toolchain.
pub mod common;
/// Toolchain configuration (fix-up constants, load base, counter symbol).
pub mod config;
/// Register alias tables and fix-up instruction encodings.
pub mod isa;
/// Architectural-state dump parsing.
pub mod state;
/// Typed assembly IR and the checkpoint restore-code generator.
pub mod asm;
/// Write-log parsing and memory image construction.
pub mod mem;
/// Binary ⇄ hex-text word codec.
pub mod codec;
/// ELF symbol/section address resolution and counter patching.
pub mod elf;
/// Memory dump truncation passes.
pub mod image;
/// Numeric-ordered batch file discovery.
pub mod files;

/// Toolchain error type; every fallible operation returns this.
pub use crate::common::error::{Result, ToolError};
/// Root configuration; use the defaults or load overrides from JSON.
pub use crate::config::ToolConfig;
