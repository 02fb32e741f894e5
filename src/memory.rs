use std::collections::HashSet;
use std::fmt;

use log::{debug, info, trace, warn};

use crate::config::AddressSpaceConfig;
use crate::constants::NOT_RESIDENT;
use crate::error::Result;
use crate::rng::FrameSource;

/// Tracks which physical frames have been handed out during one build.
///
/// Only claimed frames are stored, so memory follows the table length and
/// not the width of the physical address space.
pub(crate) struct FramePool {
    size: usize,
    in_use: HashSet<usize>,
}

impl FramePool {
    /// Create a pool of `size` frames, all free
    pub(crate) fn new(size: usize) -> Self {
        FramePool {
            size,
            in_use: HashSet::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn free_count(&self) -> usize {
        self.size - self.in_use.len()
    }

    /// True once every frame is in use
    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.in_use.len() >= self.size
    }

    #[inline]
    pub(crate) fn is_free(&self, frame: usize) -> bool {
        !self.in_use.contains(&frame)
    }

    /// Mark a frame in use. Returns false if it already was.
    pub(crate) fn claim(&mut self, frame: usize) -> bool {
        debug_assert!(frame < self.size);
        self.in_use.insert(frame)
    }

    /// Draw candidates from `source` until one is free, then claim it.
    ///
    /// Candidates are reduced modulo the pool size. Must not be called on an
    /// exhausted pool.
    fn claim_random(&mut self, source: &mut impl FrameSource) -> usize {
        debug_assert!(!self.is_exhausted());
        let mut frame = source.next_frame(self.size) % self.size;
        while !self.is_free(frame) {
            frame = source.next_frame(self.size) % self.size;
        }
        self.claim(frame);
        frame
    }
}

/// One slot of the page table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageTableEntry {
    Resident(u64),
    /// Page lives on backing store only
    #[default]
    NotResident,
}

impl PageTableEntry {
    /// Integer form: the frame index, or -1 when not resident
    pub fn raw(&self) -> i64 {
        match self {
            PageTableEntry::Resident(frame) => *frame as i64,
            PageTableEntry::NotResident => NOT_RESIDENT,
        }
    }

    #[inline]
    pub fn frame(&self) -> Option<u64> {
        match self {
            PageTableEntry::Resident(frame) => Some(*frame),
            PageTableEntry::NotResident => None,
        }
    }

    #[inline]
    pub fn is_resident(&self) -> bool {
        matches!(self, PageTableEntry::Resident(_))
    }
}

impl fmt::Display for PageTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// Single-level page table indexed by VPN. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Build a table for `config`, pulling candidate frames from `source`.
    ///
    /// Entries are filled in VPN order until the table is full or the frame
    /// pool runs dry; anything left over stays `NotResident`.
    pub fn build(config: &AddressSpaceConfig, source: &mut impl FrameSource) -> Result<Self> {
        config.validate_layout()?;

        let table_size = config.table_size();
        let mut pool = FramePool::new(config.pool_size());
        let mut entries = vec![PageTableEntry::NotResident; table_size];

        debug!(
            "building page table for {}: {} entries, {} frames, {} offset bits",
            config,
            table_size,
            pool.len(),
            config.offset_bits()
        );

        for (vpn, entry) in entries.iter_mut().enumerate() {
            if pool.is_exhausted() {
                warn!(
                    "frame pool exhausted at vpn {}: {} pages left on backing store",
                    vpn,
                    table_size - vpn
                );
                break;
            }
            let frame = pool.claim_random(source);
            trace!("vpn {} -> frame {}", vpn, frame);
            *entry = PageTableEntry::Resident(frame as u64);
        }

        let table = PageTable { entries };
        info!(
            "page table ready: {} resident, {} not resident",
            table.resident_count(),
            table.not_resident_count()
        );
        Ok(table)
    }

    /// Hand-built table for tests. Panics if a frame appears twice.
    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<PageTableEntry>) -> Self {
        let mut seen = HashSet::new();
        for frame in entries.iter().filter_map(PageTableEntry::frame) {
            assert!(seen.insert(frame), "frame {} assigned twice", frame);
        }
        PageTable { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn get(&self, vpn: u64) -> Option<PageTableEntry> {
        usize::try_from(vpn)
            .ok()
            .and_then(|i| self.entries.get(i))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageTableEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }

    /// Frame indices in VPN order, skipping non-resident pages
    pub fn frames(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().filter_map(PageTableEntry::frame)
    }

    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_resident()).count()
    }

    pub fn not_resident_count(&self) -> usize {
        self.len() - self.resident_count()
    }
}

/// Validate the four raw parameters and build a page table.
///
/// Fails with `VirtualAddressSpaceTooSmall` when the program needs more bits
/// than `virtual_address_bits`, with `PageTooLargeForPhysicalSpace` when the
/// page offset is wider than `physical_address_bits`, and with
/// `InvalidConfiguration` for zero fields or a non power-of-two page size.
pub fn init_page_table(
    program_size: u64,
    virtual_address_bits: u32,
    physical_address_bits: u32,
    page_size: u64,
    source: &mut impl FrameSource,
) -> Result<PageTable> {
    let config = AddressSpaceConfig::new(
        program_size,
        virtual_address_bits,
        physical_address_bits,
        page_size,
    )?;
    PageTable::build(&config, source)
}
