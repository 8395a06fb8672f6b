/*!
 * Shared helpers for region tests
 */

use region_allocator::{Block, RegionAllocator};

/// Assert the block sequence is sorted, contiguous and covers `[0, total)` exactly
pub fn assert_layout(region: &RegionAllocator) {
    let blocks = region.blocks();
    let mut expected_start = 0;
    for (idx, block) in blocks.iter().enumerate() {
        assert_eq!(
            block.start_address, expected_start,
            "block {} starts at {} instead of {}",
            idx, block.start_address, expected_start
        );
        assert!(block.size > 0, "block {} has zero size", idx);
        expected_start += block.size;
    }
    assert_eq!(expected_start, region.total_size(), "blocks do not cover the region");
}

/// Assert no two neighbouring blocks are both free
pub fn assert_coalesced(region: &RegionAllocator) {
    for pair in region.blocks().windows(2) {
        assert!(
            !(pair[0].is_free() && pair[1].is_free()),
            "adjacent free blocks at {} and {}",
            pair[0].start_address,
            pair[1].start_address
        );
    }
}

pub fn free_total(region: &RegionAllocator) -> u64 {
    region
        .blocks()
        .iter()
        .filter(|b| b.is_free())
        .map(|b| b.size)
        .sum()
}

/// (start, size, owner) triples for compact assertions
pub fn layout(region: &RegionAllocator) -> Vec<(u64, u64, Option<&str>)> {
    region
        .blocks()
        .iter()
        .map(|b: &Block| (b.start_address, b.size, b.owner.as_deref()))
        .collect()
}
