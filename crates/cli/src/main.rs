//! SimPoint checkpoint toolchain CLI.
//!
//! This binary provides one entry point per checkpoint-construction transform:
//! 1. **gen-init:** Architectural-state dump → restore-routine assembly.
//! 2. **build-mem:** Write-log directory → raw memory images (optionally fixed up).
//! 3. **bin2hex / hex2bin:** Raw image ⇄ simulator-loadable hex text.
//! 4. **patch-dumps:** Sequence-counter patching of captured dumps, via the ELF.
//! 5. **truncate:** Trailing-zero and pre-`.data` reduction of captured dumps.
//!
//! Every command is a bounded, deterministic file-to-file transform; batch
//! commands visit numbered files in ascending numeric order because positions
//! are significant across the whole batch.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rvckpt_core::elf::{self, ElfInfo};
use rvckpt_core::{asm, codec, files, image, mem, state, ToolConfig};

#[derive(Parser, Debug)]
#[command(
    name = "rvckpt",
    author,
    version,
    about = "SimPoint checkpoint construction toolchain for RISC-V simulators",
    long_about = "Build simulator-loadable checkpoint state from state dumps, write-logs, and the workload ELF.\n\nExamples:\n  rvckpt gen-init interval_out.txt Interval_init.S\n  rvckpt build-mem logs/ --fixup\n  rvckpt patch-dumps dumps/ hex/ workload.elf --symbol Init_counter\n  rvckpt truncate workload.elf dumps/"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the restore routine (assembly + data section) from a state dump.
    GenInit {
        /// Architectural-state dump (delimited `Interval` blocks).
        state_dump: PathBuf,

        /// Output assembly file.
        out_asm: PathBuf,

        /// Interval index seeding the generic phase-context block.
        #[arg(long, default_value_t = 0)]
        phase_interval: usize,

        /// Also write the parsed intervals as intermediate text.
        #[arg(long)]
        intermediate: Option<PathBuf>,
    },

    /// Build memory images from every write_log_<n>.txt in a directory.
    BuildMem {
        /// Directory containing write_log_<n>.txt files.
        log_dir: PathBuf,

        /// Terminate the instruction segment with the exit-syscall trailer
        /// (also writes fix_log_<n>.txt beside each image).
        #[arg(long)]
        fixup: bool,

        /// JSON config overriding the fix-up constants.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Encode a raw memory image as hex text (one 64-bit word per line).
    Bin2hex {
        /// Input binary image.
        input: PathBuf,

        /// Output hex-text file.
        output: PathBuf,
    },

    /// Decode a hex-text image back to raw bytes.
    Hex2bin {
        /// Input hex-text file.
        input: PathBuf,

        /// Output binary image.
        output: PathBuf,
    },

    /// Patch the sequence counter into every <n>_dumpmem.bin and emit hex text.
    PatchDumps {
        /// Directory containing <n>_dumpmem.bin files.
        input_dir: PathBuf,

        /// Directory receiving <n>_dumpmem.txt files.
        output_dir: PathBuf,

        /// Workload ELF providing the counter symbol and .data start.
        elf: PathBuf,

        /// Counter symbol to patch (default from config: Init_counter).
        #[arg(long)]
        symbol: Option<String>,

        /// JSON config overriding toolchain constants.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Trim every interval_<n>_dumpmem.bin in place (tail zeros, pre-.data head).
    Truncate {
        /// Workload ELF providing the .data section start.
        elf: PathBuf,

        /// Directory containing interval_<n>_dumpmem.bin files.
        bin_dir: PathBuf,

        /// JSON config overriding the DRAM load base.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match Cli::parse().command {
        Commands::GenInit {
            state_dump,
            out_asm,
            phase_interval,
            intermediate,
        } => cmd_gen_init(&state_dump, &out_asm, phase_interval, intermediate.as_deref()),
        Commands::BuildMem {
            log_dir,
            fixup,
            config,
        } => cmd_build_mem(&log_dir, fixup, config.as_deref()),
        Commands::Bin2hex { input, output } => cmd_bin2hex(&input, &output),
        Commands::Hex2bin { input, output } => cmd_hex2bin(&input, &output),
        Commands::PatchDumps {
            input_dir,
            output_dir,
            elf,
            symbol,
            config,
        } => cmd_patch_dumps(&input_dir, &output_dir, &elf, symbol, config.as_deref()),
        Commands::Truncate {
            elf,
            bin_dir,
            config,
        } => cmd_truncate(&elf, &bin_dir, config.as_deref()),
    }
}

/// Prints a fatal diagnostic and exits nonzero.
fn fatal(err: &dyn Display) -> ! {
    eprintln!("\n[!] FATAL: {err}");
    process::exit(1);
}

/// Loads the config override file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> ToolConfig {
    match path {
        Some(p) => ToolConfig::from_file(p).unwrap_or_else(|e| fatal(&e)),
        None => ToolConfig::default(),
    }
}

fn read_text(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fatal(&format!("could not read '{}': {e}", path.display())))
}

fn read_bytes(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| fatal(&format!("could not read '{}': {e}", path.display())))
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) {
    fs::write(path, contents)
        .unwrap_or_else(|e| fatal(&format!("could not write '{}': {e}", path.display())));
}

/// Parses a state dump and writes the generated restore assembly.
fn cmd_gen_init(state_dump: &Path, out_asm: &Path, phase_interval: usize, intermediate: Option<&Path>) {
    let text = read_text(state_dump);
    let intervals = state::parse_state_dump(&text);
    info!(count = intervals.len(), "parsed intervals");

    if let Some(path) = intermediate {
        write_file(path, state::write_intermediate(&intervals));
    }

    let program = asm::generate(&intervals, phase_interval).unwrap_or_else(|e| fatal(&e));
    write_file(out_asm, program.render());
    info!(out = %out_asm.display(), "wrote restore assembly");
}

/// Builds a memory image for every numbered write-log in a directory.
///
/// A log that fails to read or contains no matching records is reported and
/// skipped; the rest of the batch still runs.
fn cmd_build_mem(log_dir: &Path, fixup: bool, config: Option<&Path>) {
    let cfg = load_config(config);
    let logs = files::numbered_files(log_dir, "write_log_", ".txt").unwrap_or_else(|e| fatal(&e));
    if logs.is_empty() {
        warn!(dir = %log_dir.display(), "no write_log_<n>.txt files found");
        return;
    }

    for (n, path) in logs {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "unreadable log, skipping");
                continue;
            }
        };
        let mut entries = mem::parse_write_log(&text);
        if entries.is_empty() {
            warn!(file = %path.display(), "no matching records, skipping");
            continue;
        }
        if fixup {
            entries = mem::fix_up(entries, &cfg.fixup);
            let fix_path = log_dir.join(format!("fix_log_{n}.txt"));
            write_file(&fix_path, mem::write_fix_log(&entries));
        }
        let image = mem::build_image(&entries);
        let out_path = log_dir.join(format!("mem_image_{n}.bin"));
        write_file(&out_path, &image);
        info!(out = %out_path.display(), bytes = image.len(), "wrote memory image");
    }
}

/// Encodes one binary image as hex text.
fn cmd_bin2hex(input: &Path, output: &Path) {
    let data = read_bytes(input);
    let (text, padding) = codec::encode(&data);
    if padding > 0 {
        info!(padding, "padded to 8-byte boundary");
    }
    write_file(output, text);
    info!(out = %output.display(), "wrote hex image");
}

/// Decodes one hex-text image back to raw bytes.
fn cmd_hex2bin(input: &Path, output: &Path) {
    let text = read_text(input);
    let data = codec::decode(&text).unwrap_or_else(|e| fatal(&e));
    write_file(output, &data);
    info!(out = %output.display(), bytes = data.len(), "wrote binary image");
}

/// Patches the sequence counter into each dump and encodes it as hex text.
///
/// Counter resolution happens once; if it fails, the whole batch aborts. The
/// sequence number written into each dump is its position in the numeric
/// batch order, matching the generated dispatch table.
fn cmd_patch_dumps(
    input_dir: &Path,
    output_dir: &Path,
    elf_path: &Path,
    symbol: Option<String>,
    config: Option<&Path>,
) {
    let cfg = load_config(config);
    let symbol = symbol.unwrap_or(cfg.counter_symbol);

    let elf = ElfInfo::load(elf_path).unwrap_or_else(|e| fatal(&e));
    let offset = elf.counter_offset(&symbol).unwrap_or_else(|e| fatal(&e));
    info!(symbol = %symbol, offset, "resolved counter offset");

    fs::create_dir_all(output_dir)
        .unwrap_or_else(|e| fatal(&format!("could not create '{}': {e}", output_dir.display())));

    let dumps = files::numbered_files(input_dir, "", "_dumpmem.bin").unwrap_or_else(|e| fatal(&e));
    if dumps.is_empty() {
        warn!(dir = %input_dir.display(), "no <n>_dumpmem.bin files found");
        return;
    }

    for (seq, (n, path)) in dumps.into_iter().enumerate() {
        let mut data = read_bytes(&path);
        if let Err(e) = elf::patch_counter(&mut data, offset, seq as u64) {
            warn!(file = %path.display(), error = %e, "patch failed, skipping");
            continue;
        }
        let (text, _) = codec::encode(&data);
        let out_path = output_dir.join(format!("{n}_dumpmem.txt"));
        write_file(&out_path, text);
        info!(out = %out_path.display(), seq, "wrote patched hex dump");
    }
}

/// Truncates each captured dump in place: tail zeros, then pre-`.data` head.
fn cmd_truncate(elf_path: &Path, bin_dir: &Path, config: Option<&Path>) {
    let cfg = load_config(config);

    let elf = ElfInfo::load(elf_path).unwrap_or_else(|e| fatal(&e));
    let data_start = elf.data_section_start().unwrap_or_else(|e| fatal(&e));
    let Some(cut) = data_start.checked_sub(cfg.dram_base) else {
        fatal(&format!(
            ".data start {data_start:#x} below DRAM base {:#x}",
            cfg.dram_base
        ));
    };
    info!(data_start, cut, "resolved cut position");

    let dumps =
        files::numbered_files(bin_dir, "interval_", "_dumpmem.bin").unwrap_or_else(|e| fatal(&e));
    if dumps.is_empty() {
        warn!(dir = %bin_dir.display(), "no interval_<n>_dumpmem.bin files found");
        return;
    }

    for (_, path) in dumps {
        let mut data = read_bytes(&path);
        let removed = image::trim_trailing_zeros(&mut data);
        if let Err(e) = image::cut_before(&mut data, cut) {
            warn!(file = %path.display(), error = %e, "cut failed, skipping");
            continue;
        }
        write_file(&path, &data);
        info!(file = %path.display(), trimmed = removed, kept = data.len(), "truncated dump");
    }
}
