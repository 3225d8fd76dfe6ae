//! Common types shared across the toolchain.
//!
//! Currently this holds the error taxonomy; per-file parse tolerance is not an
//! error (malformed lines are logged and skipped), so only genuinely fatal
//! conditions appear here.

/// Error definitions for the checkpoint toolchain.
pub mod error;
