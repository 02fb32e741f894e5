//! Reference scenario: 5 MB program, 23-bit virtual and 18-bit physical
//! addresses, 2 KB pages.

use std::collections::HashSet;

use claim::{assert_matches, assert_ok};
use page_table_sim::bits::{bits_required, offset, offset_bits};
use page_table_sim::logger;
use page_table_sim::{
    init_page_table, kb, mb, translate, PageTableEntry, RandomFrames, ScriptedFrames, VmError,
    VmManager, DEMO_ADDRESS, DEMO_CONFIG, DEMO_PAGE_SIZE,
};

#[test]
fn boundary_scenario_sizes() {
    logger::setup();
    assert_eq!(bits_required(mb(5)), 23);
    assert_eq!(offset_bits(kb(2)), Ok(11));

    let table = init_page_table(mb(5), 23, 18, kb(2), &mut RandomFrames::from_entropy()).unwrap();
    assert_eq!(table.len(), 4096);
    assert_eq!(table.resident_count(), 128);
    assert_eq!(table.not_resident_count(), 3968);

    let frames: HashSet<u64> = table.frames().collect();
    assert_eq!(frames.len(), 128);
    assert!(frames.iter().all(|&f| f < 128));
}

#[test]
fn translation_scenario_with_pinned_frames() {
    // Frames handed out in reverse: vpn 0 -> 127, vpn 127 -> 0
    let script: Vec<usize> = (0..128).rev().collect();
    let table = init_page_table(mb(5), 23, 18, kb(2), &mut ScriptedFrames::new(script)).unwrap();

    assert_eq!(offset(DEMO_ADDRESS, 11), 1024);
    assert_ok!(translate(DEMO_ADDRESS, &table, DEMO_PAGE_SIZE));
    let t = translate(DEMO_ADDRESS, &table, DEMO_PAGE_SIZE).unwrap();
    assert_eq!(t.to_string(), "-1|1024");

    let t = translate(2048 + 1, &table, DEMO_PAGE_SIZE).unwrap();
    assert_eq!(t.entry, PageTableEntry::Resident(126));
    assert_eq!(t.physical_address(11), Some(126 * 2048 + 1));
}

#[test]
fn round_trip_through_vpn_and_offset() {
    let bits = offset_bits(DEMO_PAGE_SIZE).unwrap();
    for a in (0..(1u64 << 23)).step_by(4099) {
        let vpn = a >> bits;
        assert_eq!(vpn, a / DEMO_PAGE_SIZE);
        assert_eq!((vpn << bits) | offset(a, bits), a);
    }
}

#[test]
fn precondition_enforcement() {
    let mut source = ScriptedFrames::sequential();
    assert_matches!(
        init_page_table(mb(5), 22, 18, kb(2), &mut source),
        Err(VmError::VirtualAddressSpaceTooSmall { .. })
    );
    assert_matches!(
        init_page_table(mb(5), 23, 10, kb(2), &mut source),
        Err(VmError::PageTooLargeForPhysicalSpace { .. })
    );
    assert_matches!(
        init_page_table(mb(5), 23, 18, kb(3), &mut source),
        Err(VmError::InvalidConfiguration(_))
    );
}

#[test]
fn out_of_range_scenario() {
    let vm = VmManager::new(DEMO_CONFIG, &mut RandomFrames::seeded(5)).unwrap();
    let err = vm.translate(4096 * 2048).unwrap_err();
    assert_eq!(
        err,
        VmError::VirtualPageOutOfRange {
            vpn: 4096,
            table_len: 4096
        }
    );
    assert!(err.to_string().contains("out of range"));
}
