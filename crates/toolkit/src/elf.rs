//! ELF symbol and section address resolution.
//!
//! The generated program owns a persistent invocation counter in its data
//! section; captured memory dumps must have that slot patched to the dump's
//! sequence number before replay. This module resolves the counter's position:
//! the symbol's virtual address minus the `.data` section start gives the
//! byte offset of the counter inside a `.data`-anchored dump.
//!
//! Resolution failures are fatal for the whole request: every subsequent patch
//! depends on the same addresses, so nothing is retried or approximated.

use std::fs;
use std::path::Path;

use object::{Object, ObjectSection, ObjectSymbol};

use crate::common::error::{Result, ToolError};

/// A loaded ELF image; only the symbol table and section headers are read.
#[derive(Debug)]
pub struct ElfInfo {
    data: Vec<u8>,
}

impl ElfInfo {
    /// Reads an ELF image from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| ToolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { data })
    }

    fn parse(&self) -> Result<object::File<'_>> {
        Ok(object::File::parse(&*self.data)?)
    }

    /// Returns the virtual address of a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the image fails to parse or the symbol is absent.
    pub fn symbol_address(&self, name: &str) -> Result<u64> {
        self.parse()?
            .symbols()
            .find(|sym| sym.name().is_ok_and(|n| n == name))
            .map(|sym| sym.address())
            .ok_or_else(|| ToolError::SymbolNotFound(name.to_string()))
    }

    /// Returns the starting virtual address of the `.data` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the image fails to parse or has no `.data` section.
    pub fn data_section_start(&self) -> Result<u64> {
        self.parse()?
            .section_by_name(".data")
            .map(|section| section.address())
            .ok_or(ToolError::NoDataSection)
    }

    /// Computes the counter's byte offset inside a `.data`-anchored dump.
    ///
    /// This is `symbol_address − data_section_start`; negative when the symbol
    /// sits outside `.data`, which [`patch_counter`] then rejects.
    ///
    /// # Errors
    ///
    /// Returns an error if either address cannot be resolved.
    pub fn counter_offset(&self, symbol: &str) -> Result<i64> {
        let sym = self.symbol_address(symbol)?;
        let data = self.data_section_start()?;
        Ok(sym as i64 - data as i64)
    }
}

/// Patches a sequence number into a memory dump at the counter offset.
///
/// Writes `seq` as a fixed-width little-endian 8-byte value. The offset must
/// lie in `[0, len − 8)`; otherwise the buffer is left byte-identical.
///
/// # Errors
///
/// Returns an error if `offset` is outside the patchable range.
pub fn patch_counter(buf: &mut [u8], offset: i64, seq: u64) -> Result<()> {
    if offset < 0 || offset as usize + 8 >= buf.len() {
        return Err(ToolError::PatchOutOfRange {
            offset,
            len: buf.len(),
        });
    }
    let start = offset as usize;
    buf[start..start + 8].copy_from_slice(&seq.to_le_bytes());
    Ok(())
}
