//! Checkpoint restore-code generation.
//!
//! Synthesizes a self-selecting restore program from parsed intervals:
//! 1. **Dispatch:** A persistent counter (owned by the generated data section)
//!    is post-incremented and compared against 1-indexed constants to select
//!    the restore block for the current invocation.
//! 2. **Restore blocks:** One per interval, reloading every captured register
//!    from its 8-byte data slot, then transferring control to the captured PC
//!    via `mepc` + `mret`.
//! 3. **Phase context:** One generic block seeded from a caller-selected
//!    interval, reachable by label independent of the counter.
//!
//! The restore ordering is load-bearing: the base scratch register addresses
//! every other load, so its own captured value is reloaded strictly last, and
//! the PC staging register is saved to and restored from a fixed stack slot
//! around the `mepc` write.

use crate::asm::{DataItem, Inst, Program, TextItem};
use crate::common::error::{Result, ToolError};
use crate::isa::abi;
use crate::state::Interval;

/// Entry label of the generated dispatch routine.
pub const INIT_TABLE: &str = "Init_table";

/// Label of the generic phase-context restore block.
pub const PHASE_CONTEXT: &str = "Simpoint_Phase_Context";

/// Data label backing the phase-context block.
pub const PHASE_DATA: &str = "Simpoint_data";

/// Symbol of the persistent invocation counter slot.
pub const COUNTER_SYMBOL: &str = "Init_counter";

/// Section holding the generated instructions.
const TEXT_SECTION: &str = ".init";

/// Section holding the counter slot and register data blocks.
const DATA_SECTION: &str = ".interval,\"aw\",@progbits";

/// Stack offset (below sp) used to preserve the PC staging register.
const STAGE_SAVE_OFFSET: i64 = -80;

/// Alignment exponent for labels and the counter slot (8 bytes).
const WORD_ALIGN: u32 = 3;

/// Alignment exponent for per-interval data blocks (512 bytes).
const BLOCK_ALIGN: u32 = 9;

/// Returns the restore-block label for interval slot `i`.
fn interval_label(i: usize) -> String {
    format!("Init_interval_{i}")
}

/// Returns the data-block label for interval slot `i`.
fn data_label(i: usize) -> String {
    format!("Init_data_{i}")
}

/// Generates the complete restore program for a batch of intervals.
///
/// `phase_index` selects which interval seeds the generic phase-context
/// block; the trigger for entering that block is external, so the choice is
/// the caller's.
///
/// # Errors
///
/// Returns an error if `intervals` is empty or `phase_index` is out of range.
pub fn generate(intervals: &[Interval], phase_index: usize) -> Result<Program> {
    if intervals.is_empty() {
        return Err(ToolError::EmptyStateDump);
    }
    let phase_source = intervals
        .get(phase_index)
        .ok_or(ToolError::PhaseOutOfRange {
            index: phase_index,
            count: intervals.len(),
        })?;

    let mut prog = Program::default();

    prog.text.push(TextItem::Section(TEXT_SECTION.to_string()));
    prog.text.push(TextItem::Global(INIT_TABLE.to_string()));
    prog.text.push(TextItem::Global(PHASE_CONTEXT.to_string()));
    prog.text.push(TextItem::Label(INIT_TABLE.to_string()));

    // Post-increment the persistent counter.
    push(&mut prog, Inst::La {
        rd: abi::COUNTER_PTR.to_string(),
        sym: COUNTER_SYMBOL.to_string(),
    });
    push(&mut prog, Inst::Lw {
        rd: abi::COUNTER_VAL.to_string(),
        off: 0,
        base: abi::COUNTER_PTR.to_string(),
    });
    push(&mut prog, Inst::Addi {
        rd: abi::COUNTER_VAL.to_string(),
        rs: abi::COUNTER_VAL.to_string(),
        imm: 1,
    });
    push(&mut prog, Inst::Sw {
        rs: abi::COUNTER_VAL.to_string(),
        off: 0,
        base: abi::COUNTER_PTR.to_string(),
    });
    prog.text.push(TextItem::Comment(
        "dispatch on the post-increment counter value".to_string(),
    ));

    // 1-indexed compare table: invocation i lands in interval slot i-1.
    for i in 0..intervals.len() {
        push(&mut prog, Inst::Li {
            rd: abi::COMPARE_SCRATCH.to_string(),
            imm: i as i64 + 1,
        });
        push(&mut prog, Inst::Beq {
            rs1: abi::COUNTER_VAL.to_string(),
            rs2: abi::COMPARE_SCRATCH.to_string(),
            target: interval_label(i),
        });
    }

    // Counter slot plus scratch words, ahead of the aligned data blocks.
    prog.data.push(DataItem::Section(DATA_SECTION.to_string()));
    prog.data.push(DataItem::Align(WORD_ALIGN));
    prog.data.push(DataItem::Label(COUNTER_SYMBOL.to_string()));
    prog.data.push(DataItem::Word(0));
    prog.data.push(DataItem::Label("temp_data".to_string()));
    for _ in 0..3 {
        prog.data.push(DataItem::Word(0));
    }

    for (i, interval) in intervals.iter().enumerate() {
        prog.text
            .push(TextItem::Comment(format!("Interval {}", interval.id)));
        emit_restore_block(&mut prog, interval, &interval_label(i), &data_label(i));
    }

    prog.text
        .push(TextItem::Comment("Simpoint Phase".to_string()));
    emit_restore_block(&mut prog, phase_source, PHASE_CONTEXT, PHASE_DATA);

    Ok(prog)
}

/// Emits one restore block and its backing data block.
///
/// Every slot gets a data word at the next 8-byte offset; loads are emitted in
/// the same walk, so offsets and `.dword` order cannot disagree. The zero
/// register is skipped entirely. The base scratch register and the PC get data
/// words but deferred loads, handled by the epilogue.
fn emit_restore_block(prog: &mut Program, interval: &Interval, label: &str, data: &str) {
    prog.text.push(TextItem::Align(WORD_ALIGN));
    prog.text.push(TextItem::Label(label.to_string()));
    push(prog, Inst::La {
        rd: abi::BASE_SCRATCH.to_string(),
        sym: data.to_string(),
    });

    prog.data.push(DataItem::Align(BLOCK_ALIGN));
    prog.data.push(DataItem::Label(data.to_string()));

    let mut offset: i64 = 0;
    let mut base_offset = None;
    let mut pc_offset = None;

    for slot in &interval.slots {
        if slot.name == abi::ZERO {
            continue;
        }
        prog.data.push(DataItem::Dword {
            value: slot.value.clone(),
            comment: Some(slot.name.clone()),
        });
        if abi::is_fpr(&slot.name) {
            push_c(prog, Inst::Fld {
                rd: slot.name.clone(),
                off: 8 * offset,
                base: abi::BASE_SCRATCH.to_string(),
            }, format!("load {}", slot.name));
        } else if slot.name == abi::BASE_SCRATCH {
            base_offset = Some(8 * offset);
        } else if slot.name == abi::PC_KEY {
            pc_offset = Some(8 * offset);
        } else {
            push_c(prog, Inst::Ld {
                rd: slot.name.clone(),
                off: 8 * offset,
                base: abi::BASE_SCRATCH.to_string(),
            }, format!("load {}", slot.name));
        }
        offset += 1;
    }

    if let Some(pc_off) = pc_offset {
        push(prog, Inst::Sd {
            rs: abi::STAGE_SCRATCH.to_string(),
            off: STAGE_SAVE_OFFSET,
            base: "sp".to_string(),
        });
        push_c(prog, Inst::Ld {
            rd: abi::STAGE_SCRATCH.to_string(),
            off: pc_off,
            base: abi::BASE_SCRATCH.to_string(),
        }, "load pc".to_string());
        push(prog, Inst::Csrw {
            csr: "mepc".to_string(),
            rs: abi::STAGE_SCRATCH.to_string(),
        });
        push(prog, Inst::Ld {
            rd: abi::STAGE_SCRATCH.to_string(),
            off: STAGE_SAVE_OFFSET,
            base: "sp".to_string(),
        });
        if let Some(base_off) = base_offset {
            // The base register addresses every load above; reload it last.
            push_c(prog, Inst::Ld {
                rd: abi::BASE_SCRATCH.to_string(),
                off: base_off,
                base: abi::BASE_SCRATCH.to_string(),
            }, format!("restore {}", abi::BASE_SCRATCH));
        }
    }

    push(prog, Inst::Mret);
}

fn push(prog: &mut Program, inst: Inst) {
    prog.text.push(TextItem::Inst {
        inst,
        comment: None,
    });
}

fn push_c(prog: &mut Program, inst: Inst, comment: String) {
    prog.text.push(TextItem::Inst {
        inst,
        comment: Some(comment),
    });
}
