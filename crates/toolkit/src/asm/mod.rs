//! Typed assembly intermediate representation.
//!
//! The restore routine is synthesized as an ordered instruction list plus an
//! ordered data-directive list, rendered to text by a single printer. Building
//! the program as typed items (instead of string concatenation) is what lets
//! the generator guarantee that load-instruction offsets and `.dword` emission
//! order can never drift apart.

use std::fmt;

/// Restore-code generation from parsed intervals.
pub mod codegen;

pub use codegen::generate;

/// One instruction of the generated restore routine.
///
/// This is the fixed vocabulary the external assembler consumes; registers are
/// ABI names carried as strings because pass-through dump keys flow into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// Load the address of `sym` into `rd`.
    La {
        /// Destination register.
        rd: String,
        /// Symbol whose address is taken.
        sym: String,
    },
    /// Load a 32-bit word from `off(base)`.
    Lw {
        /// Destination register.
        rd: String,
        /// Byte offset.
        off: i64,
        /// Base address register.
        base: String,
    },
    /// Store a 32-bit word to `off(base)`.
    Sw {
        /// Source register.
        rs: String,
        /// Byte offset.
        off: i64,
        /// Base address register.
        base: String,
    },
    /// Add an immediate.
    Addi {
        /// Destination register.
        rd: String,
        /// Source register.
        rs: String,
        /// Immediate addend.
        imm: i64,
    },
    /// Load an immediate.
    Li {
        /// Destination register.
        rd: String,
        /// Immediate value.
        imm: i64,
    },
    /// Branch to `target` if `rs1 == rs2`.
    Beq {
        /// First compared register.
        rs1: String,
        /// Second compared register.
        rs2: String,
        /// Branch target label.
        target: String,
    },
    /// Load a 64-bit doubleword from `off(base)`.
    Ld {
        /// Destination register.
        rd: String,
        /// Byte offset.
        off: i64,
        /// Base address register.
        base: String,
    },
    /// Store a 64-bit doubleword to `off(base)`.
    Sd {
        /// Source register.
        rs: String,
        /// Byte offset.
        off: i64,
        /// Base address register.
        base: String,
    },
    /// Load a 64-bit doubleword into a floating-point register.
    Fld {
        /// Destination FP register.
        rd: String,
        /// Byte offset.
        off: i64,
        /// Base address register.
        base: String,
    },
    /// Write a register into a control/status register.
    Csrw {
        /// Target CSR name.
        csr: String,
        /// Source register.
        rs: String,
    },
    /// Machine trap return; transfers control to the address in `mepc`.
    Mret,
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::La { rd, sym } => write!(f, "la {rd}, {sym}"),
            Self::Lw { rd, off, base } => write!(f, "lw {rd}, {off}({base})"),
            Self::Sw { rs, off, base } => write!(f, "sw {rs}, {off}({base})"),
            Self::Addi { rd, rs, imm } => write!(f, "addi {rd}, {rs}, {imm}"),
            Self::Li { rd, imm } => write!(f, "li {rd}, {imm}"),
            Self::Beq { rs1, rs2, target } => write!(f, "beq {rs1}, {rs2}, {target}"),
            Self::Ld { rd, off, base } => write!(f, "ld {rd}, {off}({base})"),
            Self::Sd { rs, off, base } => write!(f, "sd {rs}, {off}({base})"),
            Self::Fld { rd, off, base } => write!(f, "fld {rd}, {off}({base})"),
            Self::Csrw { csr, rs } => write!(f, "csrw {csr}, {rs}"),
            Self::Mret => write!(f, "mret"),
        }
    }
}

/// One item of the text (instruction) section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextItem {
    /// `.section <name>` directive.
    Section(String),
    /// `.globl <sym>` directive.
    Global(String),
    /// `<label>:` definition.
    Label(String),
    /// `.align <n>` directive (power-of-two exponent).
    Align(u32),
    /// A standalone `# comment` line.
    Comment(String),
    /// An instruction with an optional trailing comment.
    Inst {
        /// The instruction.
        inst: Inst,
        /// Optional trailing comment text.
        comment: Option<String>,
    },
}

/// One item of the data section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataItem {
    /// `.section <name>` directive.
    Section(String),
    /// `.align <n>` directive (power-of-two exponent).
    Align(u32),
    /// `<label>:` definition.
    Label(String),
    /// A 32-bit `.word` directive.
    Word(u32),
    /// A 64-bit `.dword` directive; value text is carried verbatim from the dump.
    Dword {
        /// Directive value, emitted exactly as captured.
        value: String,
        /// Optional trailing comment (the register name).
        comment: Option<String>,
    },
}

/// A complete generated program: instruction stream plus backing data section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Ordered instruction-section items.
    pub text: Vec<TextItem>,
    /// Ordered data-section items; `.dword` order mirrors the load offsets.
    pub data: Vec<DataItem>,
}

impl Program {
    /// Renders the program as assembler source text.
    ///
    /// The printer owns the emitted grammar: four-space instruction indent,
    /// directives flush left, trailing comments separated by two spaces.
    pub fn render(&self) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        for item in &self.text {
            // Infallible: writing to a String cannot fail.
            let _ = match item {
                TextItem::Section(name) => writeln!(out, ".section {name}"),
                TextItem::Global(sym) => writeln!(out, ".globl {sym}"),
                TextItem::Label(label) => writeln!(out, "{label}:"),
                TextItem::Align(n) => writeln!(out, ".align {n}"),
                TextItem::Comment(text) => writeln!(out, "# {text}"),
                TextItem::Inst { inst, comment } => match comment {
                    Some(c) => writeln!(out, "    {inst}  # {c}"),
                    None => writeln!(out, "    {inst}"),
                },
            };
        }
        for item in &self.data {
            let _ = match item {
                DataItem::Section(name) => writeln!(out, ".section {name}"),
                DataItem::Align(n) => writeln!(out, ".align {n}"),
                DataItem::Label(label) => writeln!(out, "{label}:"),
                DataItem::Word(w) => writeln!(out, "    .word {w}"),
                DataItem::Dword { value, comment } => match comment {
                    Some(c) => writeln!(out, "    .dword {value}  # {c}"),
                    None => writeln!(out, "    .dword {value}"),
                },
            };
        }
        out
    }
}
