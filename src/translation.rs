use std::fmt;

use log::debug;

use crate::bits::{offset, offset_bits};
use crate::error::{Result, VmError};
use crate::memory::{PageTable, PageTableEntry};

/// Represents the decomposed components of a Virtual Address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub raw: u64,
    pub vpn: u64,
    pub offset: u64,
}

impl VirtualAddress {
    /// Split a raw VA into page number (high bits) and offset (low `offset_bits`)
    pub fn decompose(raw: u64, offset_bits: u32) -> Self {
        let vpn = raw.checked_shr(offset_bits).unwrap_or(0);
        let offset = offset(raw, offset_bits);

        VirtualAddress {
            raw,
            vpn,
            offset,
        }
    }

    /// Reassemble the raw address from its parts
    #[inline]
    pub fn compose(&self, offset_bits: u32) -> u64 {
        self.vpn.checked_shl(offset_bits).unwrap_or(0) | self.offset
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VA({}) = (vpn={}, offset={})",
            self.raw, self.vpn, self.offset
        )
    }
}

/// Outcome of a successful lookup: the entry found for the page plus the
/// untouched offset. The entry may still be `NotResident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub vpn: u64,
    pub entry: PageTableEntry,
    pub offset: u64,
}

impl Translation {
    #[inline]
    pub fn is_resident(&self) -> bool {
        self.entry.is_resident()
    }

    /// Physical address for a resident page: frame number above the offset
    pub fn physical_address(&self, offset_bits: u32) -> Option<u64> {
        self.entry
            .frame()
            .map(|frame| (frame << offset_bits) | self.offset)
    }
}

/// `<frame-or--1>|<offset>`
impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.entry, self.offset)
    }
}

/// Translate a virtual address through a single-level page table.
///
/// Pure lookup: the table is never modified and a non-resident page is
/// reported, not faulted in. Fails with `VirtualPageOutOfRange` when the page
/// number falls past the end of the table, or `InvalidConfiguration` when
/// `page_size` is not a power of two.
pub fn translate(virtual_address: u64, page_table: &PageTable, page_size: u64) -> Result<Translation> {
    let va = VirtualAddress::decompose(virtual_address, offset_bits(page_size)?);
    debug!("lower offset: {}", va.offset);
    debug!("vpn: {}", va.vpn);

    let entry = page_table
        .get(va.vpn)
        .ok_or(VmError::VirtualPageOutOfRange {
            vpn: va.vpn,
            table_len: page_table.len(),
        })?;

    Ok(Translation {
        vpn: va.vpn,
        entry,
        offset: va.offset,
    })
}

/// Translate a batch of virtual addresses; each failure is reported in place
pub fn translate_batch(
    addresses: &[u64],
    page_table: &PageTable,
    page_size: u64,
) -> Vec<Result<Translation>> {
    addresses
        .iter()
        .map(|&va| translate(va, page_table, page_size))
        .collect()
}
