//! Address-space configuration: fixed at startup, never mutated.

use std::fmt;

use crate::bits::{bits_required, offset_bits};
use crate::constants::{MAX_ADDRESS_BITS, MAX_TABLE_ENTRIES};
use crate::error::{Result, VmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSpaceConfig {
    program_size: u64,
    virtual_address_bits: u32,
    physical_address_bits: u32,
    page_size: u64,
}

impl AddressSpaceConfig {
    /// Check field-level invariants and build the record.
    ///
    /// Every field must be positive, `page_size` must be a power of two and
    /// neither address width may exceed [`MAX_ADDRESS_BITS`]. Whether the
    /// program and page actually fit the address widths is checked by
    /// [`AddressSpaceConfig::validate_layout`].
    pub fn new(
        program_size: u64,
        virtual_address_bits: u32,
        physical_address_bits: u32,
        page_size: u64,
    ) -> Result<Self> {
        let config = Self::new_unchecked(
            program_size,
            virtual_address_bits,
            physical_address_bits,
            page_size,
        );
        config.check_fields()?;
        Ok(config)
    }

    /// Build without checking. Only for constants known to be valid.
    pub(crate) const fn new_unchecked(
        program_size: u64,
        virtual_address_bits: u32,
        physical_address_bits: u32,
        page_size: u64,
    ) -> Self {
        AddressSpaceConfig {
            program_size,
            virtual_address_bits,
            physical_address_bits,
            page_size,
        }
    }

    fn check_fields(&self) -> Result<()> {
        if self.program_size == 0 {
            return Err(VmError::InvalidConfiguration("program size must be positive".into()));
        }
        if self.virtual_address_bits == 0 || self.physical_address_bits == 0 {
            return Err(VmError::InvalidConfiguration(
                "address widths must be positive".into(),
            ));
        }
        if self.virtual_address_bits > MAX_ADDRESS_BITS
            || self.physical_address_bits > MAX_ADDRESS_BITS
        {
            return Err(VmError::InvalidConfiguration(format!(
                "address widths ({}, {}) exceed {} bits",
                self.virtual_address_bits, self.physical_address_bits, MAX_ADDRESS_BITS
            )));
        }
        offset_bits(self.page_size)?;
        Ok(())
    }

    /// Preconditions of a page table build, in the order they are reported.
    ///
    /// Field invariants are re-checked first, then the program and page are
    /// fitted to the address widths, then the table length is bounded by
    /// [`MAX_TABLE_ENTRIES`].
    pub fn validate_layout(&self) -> Result<()> {
        self.check_fields()?;

        let required_bits = self.program_bits();
        if required_bits > self.virtual_address_bits {
            return Err(VmError::VirtualAddressSpaceTooSmall {
                required_bits,
                virtual_address_bits: self.virtual_address_bits,
            });
        }

        let offset_bits = self.offset_bits();
        if offset_bits > self.physical_address_bits {
            return Err(VmError::PageTooLargeForPhysicalSpace {
                offset_bits,
                physical_address_bits: self.physical_address_bits,
            });
        }

        if self.table_size() > MAX_TABLE_ENTRIES {
            return Err(VmError::InvalidConfiguration(format!(
                "page table of {} entries exceeds the {} entry limit",
                self.table_size(),
                MAX_TABLE_ENTRIES
            )));
        }
        Ok(())
    }

    pub fn program_size(&self) -> u64 {
        self.program_size
    }

    pub fn virtual_address_bits(&self) -> u32 {
        self.virtual_address_bits
    }

    pub fn physical_address_bits(&self) -> u32 {
        self.physical_address_bits
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    #[inline]
    pub fn offset_bits(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    /// Bits needed to address every byte of the program.
    #[inline]
    pub fn program_bits(&self) -> u32 {
        bits_required(self.program_size)
    }

    /// Width of the VPN. A page larger than the program still needs one entry.
    #[inline]
    pub fn vpn_bits(&self) -> u32 {
        self.program_bits().saturating_sub(self.offset_bits())
    }

    #[inline]
    pub fn frame_bits(&self) -> u32 {
        self.physical_address_bits.saturating_sub(self.offset_bits())
    }

    /// Page table length. Saturates at `usize::MAX` for widths past the word size.
    pub fn table_size(&self) -> usize {
        1usize.checked_shl(self.vpn_bits()).unwrap_or(usize::MAX)
    }

    /// Number of physical frames. Saturates like `table_size`.
    pub fn pool_size(&self) -> usize {
        1usize.checked_shl(self.frame_bits()).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for AddressSpaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "program={}B va_bits={} pa_bits={} page={}B",
            self.program_size, self.virtual_address_bits, self.physical_address_bits, self.page_size
        )
    }
}
