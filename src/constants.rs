use crate::config::AddressSpaceConfig;

pub const fn kb(n: u64) -> u64 {
    n * 1024
}

pub const fn mb(n: u64) -> u64 {
    n * 1024 * 1024
}

/// Raw value of a page table entry whose page lives on backing store.
pub const NOT_RESIDENT: i64 = -1;

/// Widest address the simulator accepts, so every mask and shift fits a u64.
pub const MAX_ADDRESS_BITS: u32 = 63;

/// Largest page table a build will allocate.
pub const MAX_TABLE_ENTRIES: usize = 1 << 24;

// 5 MB program on an 18-bit machine: needs a 23-bit virtual space.
pub const DEMO_PROGRAM_SIZE: u64 = mb(5);
pub const DEMO_VIRTUAL_ADDRESS_BITS: u32 = 23;
pub const DEMO_PHYSICAL_ADDRESS_BITS: u32 = 18;
pub const DEMO_PAGE_SIZE: u64 = kb(2);

pub const DEMO_CONFIG: AddressSpaceConfig = AddressSpaceConfig::new_unchecked(
    DEMO_PROGRAM_SIZE,
    DEMO_VIRTUAL_ADDRESS_BITS,
    DEMO_PHYSICAL_ADDRESS_BITS,
    DEMO_PAGE_SIZE,
);

pub const DEMO_ADDRESS: u64 = (1 << 18) + (1 << 10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_helpers() {
        assert_eq!(kb(2), 2048);
        assert_eq!(mb(5), 5_242_880);
    }

    #[test]
    fn test_demo_config_is_valid() {
        let checked = AddressSpaceConfig::new(
            DEMO_PROGRAM_SIZE,
            DEMO_VIRTUAL_ADDRESS_BITS,
            DEMO_PHYSICAL_ADDRESS_BITS,
            DEMO_PAGE_SIZE,
        );
        assert_eq!(checked.ok(), Some(DEMO_CONFIG));
    }

    #[test]
    fn test_demo_address() {
        assert_eq!(DEMO_ADDRESS, 263_168);
    }
}
