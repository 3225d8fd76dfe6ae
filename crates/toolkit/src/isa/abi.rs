//! RISC-V ABI register names and dump-key aliasing.
//!
//! Architectural-state dumps identify registers by index (`x13`, `f2`); the
//! generated restore assembly must use ABI names (`a3`, `ft2`). The tables here
//! are the single source of that mapping, so the load instructions and the
//! data-section comments can never disagree.

/// ABI names for integer registers x0–x31.
pub const XREG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// ABI names for floating-point registers f0–f31.
pub const FREG_NAMES: [&str; 32] = [
    "ft0", "ft1", "ft2", "ft3", "ft4", "ft5", "ft6", "ft7", "fs0", "fs1", "fa0", "fa1", "fa2",
    "fa3", "fa4", "fa5", "fa6", "fa7", "fs2", "fs3", "fs4", "fs5", "fs6", "fs7", "fs8", "fs9",
    "fs10", "fs11", "ft8", "ft9", "ft10", "ft11",
];

/// The hard-wired zero register; parsed from dumps but never restored.
pub const ZERO: &str = "zero";

/// Scratch register holding the per-interval data block base address.
///
/// Every other register is loaded relative to this one, so the generator must
/// restore it strictly last.
pub const BASE_SCRATCH: &str = "t3";

/// Scratch register staging the PC value on its way into `mepc`.
pub const STAGE_SCRATCH: &str = "t4";

/// Scratch register holding the address of the invocation counter.
pub const COUNTER_PTR: &str = "t0";

/// Scratch register holding the post-increment counter value.
pub const COUNTER_VAL: &str = "t1";

/// Scratch register holding the compare constant in the dispatch table.
pub const COMPARE_SCRATCH: &str = "t2";

/// Dump key carrying the captured program counter.
pub const PC_KEY: &str = "pc";

/// Prefix identifying control/status register keys in dumps (`mstatus`,
/// `mepc`, ...). These are parsed but never restored.
pub const CSR_KEY_PREFIX: &str = "m";

/// Maps a raw dump key to its ABI register name.
///
/// Returns `None` for keys that are not `x<idx>` / `f<idx>` with an index in
/// 0..32; callers pass those through unchanged.
///
/// # Arguments
///
/// * `key` - Lowercased dump key, e.g. `"x13"` or `"f2"`.
pub fn alias(key: &str) -> Option<&'static str> {
    let table = match key.as_bytes().first()? {
        b'x' => &XREG_NAMES,
        b'f' => &FREG_NAMES,
        _ => return None,
    };
    let idx: usize = key[1..].parse().ok()?;
    table.get(idx).copied()
}

/// Returns `true` if `name` is a floating-point ABI register name.
///
/// Floating-point registers are restored with `fld` instead of `ld`.
pub fn is_fpr(name: &str) -> bool {
    FREG_NAMES.contains(&name)
}
