//! Bit-width arithmetic shared by the page table builder and the translator.

use crate::error::{Result, VmError};

/// Minimum number of bits needed to hold every value in `[0, n]`.
///
/// Equal to `floor(log2(n)) + 1` for `n >= 1`. Callers must not pass 0;
/// it yields 0 here.
#[inline]
pub fn bits_required(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

/// Number of low-order address bits consumed by the in-page offset.
///
/// Fails with [`VmError::InvalidConfiguration`] unless `page_size` is an exact
/// power of two.
pub fn offset_bits(page_size: u64) -> Result<u32> {
    if !page_size.is_power_of_two() {
        return Err(VmError::InvalidConfiguration(format!(
            "page size {} is not a power of two",
            page_size
        )));
    }
    Ok(page_size.trailing_zeros())
}

/// Low `k` bits of `address`, i.e. `address mod 2^k`.
#[inline]
pub fn offset(address: u64, k: u32) -> u64 {
    address & mask(k)
}

/// Mask with the low `k` bits set. Saturates at all-ones for `k >= 64`.
#[inline]
fn mask(k: u32) -> u64 {
    1u64.checked_shl(k).map_or(u64::MAX, |bit| bit - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{kb, mb};
    use claim::{assert_matches, assert_ok_eq};

    #[test]
    fn test_bits_required() {
        assert_eq!(bits_required(1), 1);
        assert_eq!(bits_required(2), 2);
        assert_eq!(bits_required(3), 2);
        assert_eq!(bits_required(4), 3);
        assert_eq!(bits_required(255), 8);
        assert_eq!(bits_required(256), 9);
        assert_eq!(bits_required(u64::MAX), 64);
    }

    #[test]
    fn test_bits_required_program_sizes() {
        // 5 MB sits between 2^22 and 2^23
        assert_eq!(bits_required(mb(5)), 23);
        assert_eq!(bits_required(kb(256)), 19);
    }

    #[test]
    fn test_offset_bits() {
        assert_ok_eq!(offset_bits(1), 0);
        assert_ok_eq!(offset_bits(kb(2)), 11);
        assert_ok_eq!(offset_bits(kb(4)), 12);
        assert_ok_eq!(offset_bits(1 << 63), 63);
    }

    #[test]
    fn test_offset_bits_rejects_non_power_of_two() {
        assert_matches!(offset_bits(0), Err(VmError::InvalidConfiguration(_)));
        assert_matches!(offset_bits(3000), Err(VmError::InvalidConfiguration(_)));
        assert_matches!(offset_bits(kb(2) + 1), Err(VmError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_offset_matches_modulo() {
        for &page_size in &[1u64, 2, 512, kb(2), kb(4), mb(1)] {
            let k = offset_bits(page_size).unwrap();
            for &a in &[0u64, 1, 511, 2047, 2048, 263_168, 5_242_879, u64::MAX] {
                assert_eq!(offset(a, k), a % page_size, "a={} page_size={}", a, page_size);
            }
        }
    }

    #[test]
    fn test_offset_edge_widths() {
        assert_eq!(offset(u64::MAX, 0), 0);
        assert_eq!(offset(u64::MAX, 63), u64::MAX >> 1);
        assert_eq!(offset(u64::MAX, 64), u64::MAX);
        assert_eq!(mask(11), 0x7FF);
    }
}
