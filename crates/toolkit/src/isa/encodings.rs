//! Fixed RV64I instruction encodings used by the safe-landing fix-up.
//!
//! The replayed instruction window of a memory image must end in a decodable
//! trap rather than running off into data. The fix-up appends an exit-syscall
//! sequence built from these three words. They are literal constants tied to
//! the target ISA convention: preserve bit-for-bit, never re-derive.

/// Environment Call (ECALL). Traps to the simulator's handler.
pub const ECALL: u32 = 0x0000_0073;

/// `li a0, 0`: clears the syscall return/argument register.
pub const LI_A0_0: u32 = 0x0000_0513;

/// `li a7, 93`: loads the exit syscall number.
pub const LI_A7_93: u32 = 0x05d0_0893;
