//! Uniform errors and results for page table construction and translation.

use std::fmt;

/// Configuration and precondition failures. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Program does not fit in the configured virtual address width.
    VirtualAddressSpaceTooSmall {
        required_bits: u32,
        virtual_address_bits: u32,
    },
    /// The page offset alone needs more bits than the physical address has.
    PageTooLargeForPhysicalSpace {
        offset_bits: u32,
        physical_address_bits: u32,
    },
    /// Address names a page beyond the table's coverage.
    VirtualPageOutOfRange { vpn: u64, table_len: usize },
    /// Zero-sized field, non power-of-two page size, or oversized width.
    InvalidConfiguration(String),
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::VirtualAddressSpaceTooSmall {
                required_bits,
                virtual_address_bits,
            } => write!(
                f,
                "virtual address space too small: program needs {} bits, only {} configured",
                required_bits, virtual_address_bits
            ),
            VmError::PageTooLargeForPhysicalSpace {
                offset_bits,
                physical_address_bits,
            } => write!(
                f,
                "page too large: offset needs {} bits, physical address has {}",
                offset_bits, physical_address_bits
            ),
            VmError::VirtualPageOutOfRange { vpn, table_len } => write!(
                f,
                "virtual page {} out of range: table covers {} pages",
                vpn, table_len
            ),
            VmError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for VmError {}

/// Default result type for the simulator.
pub type Result<T> = core::result::Result<T, VmError>;

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok_eq};

    #[test]
    fn test_display_messages() {
        let e = VmError::VirtualAddressSpaceTooSmall {
            required_bits: 23,
            virtual_address_bits: 20,
        };
        assert_eq!(
            e.to_string(),
            "virtual address space too small: program needs 23 bits, only 20 configured"
        );

        let e = VmError::VirtualPageOutOfRange {
            vpn: 4096,
            table_len: 4096,
        };
        assert!(e.to_string().contains("4096"));

        let e = VmError::InvalidConfiguration("page size 3 is not a power of two".into());
        assert!(e.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn fn_ok() -> Result<u32> {
            Ok(11)
        }

        fn fn_error() -> Result<u32> {
            Err(VmError::InvalidConfiguration("zero".into()))
        }

        fn fn_qmark() -> Result<u32> {
            fn_error()?;
            Ok(0)
        }

        assert_ok_eq!(fn_ok(), 11);
        assert_err!(fn_error());
        assert_err!(fn_qmark());
    }

    #[test]
    fn test_boxes_as_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(VmError::PageTooLargeForPhysicalSpace {
            offset_bits: 20,
            physical_address_bits: 18,
        });
        assert!(boxed.to_string().contains("20 bits"));
    }
}
