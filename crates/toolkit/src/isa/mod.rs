//! Target-ISA conventions baked into the checkpoint format.
//!
//! This module pins down the RISC-V specifics the toolchain depends on:
//! 1. **ABI aliases:** The dump keys (`x0`..`x31`, `f0`..`f31`) and the register
//!    names the generated assembly uses.
//! 2. **Encodings:** The literal instruction words used by the safe-landing fix-up.

/// ABI register name tables and dump-key aliasing.
pub mod abi;
/// Fixed instruction encodings for the safe-landing trailer.
pub mod encodings;
