/*!
 * Coalescing Tests
 * Adjacent free blocks merge on every deallocation
 */

use super::common::{assert_coalesced, assert_layout, layout};
use pretty_assertions::assert_eq;
use region_allocator::{FitStrategy, RegionAllocator};

#[test]
fn test_free_merges_with_left_neighbour() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("A", 40, FitStrategy::First).unwrap();
    region.allocate("B", 60, FitStrategy::First).unwrap();
    region.allocate("C", 900, FitStrategy::First).unwrap();

    region.deallocate("A").unwrap();
    region.deallocate("B").unwrap();

    assert_eq!(layout(&region), vec![(0, 100, None), (100, 900, Some("C"))]);
    assert_eq!(region.next_fit_cursor(), 0);
}

#[test]
fn test_free_merges_with_right_neighbour() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("A", 100, FitStrategy::First).unwrap();
    region.allocate("B", 100, FitStrategy::First).unwrap();

    region.deallocate("B").unwrap();

    assert_eq!(layout(&region), vec![(0, 100, Some("A")), (100, 900, None)]);
}

#[test]
fn test_free_between_two_holes_merges_all_three() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("A", 100, FitStrategy::First).unwrap();
    region.allocate("B", 100, FitStrategy::First).unwrap();
    region.allocate("C", 800, FitStrategy::First).unwrap();

    region.deallocate("A").unwrap();
    region.deallocate("C").unwrap();
    assert_eq!(
        layout(&region),
        vec![(0, 100, None), (100, 100, Some("B")), (200, 800, None)]
    );

    region.deallocate("B").unwrap();
    assert_eq!(layout(&region), vec![(0, 1000, None)]);
    assert_eq!(region.next_fit_cursor(), 0);
}

#[test]
fn test_cursor_tracks_merged_tail() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("A", 100, FitStrategy::First).unwrap();
    region.allocate("B", 100, FitStrategy::First).unwrap();
    region.allocate("C", 100, FitStrategy::First).unwrap();
    assert_eq!(region.next_fit_cursor(), 3);

    region.deallocate("B").unwrap();
    assert_eq!(region.next_fit_cursor(), 3);

    region.deallocate("C").unwrap();
    assert_eq!(layout(&region), vec![(0, 100, Some("A")), (100, 900, None)]);
    assert_eq!(region.next_fit_cursor(), 1);

    // Next fit still lands in the merged hole
    assert_eq!(region.allocate("D", 50, FitStrategy::Next), Ok(100));
}

#[test]
fn test_free_between_allocations_leaves_hole() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("A", 100, FitStrategy::First).unwrap();
    region.allocate("B", 100, FitStrategy::First).unwrap();
    region.allocate("C", 100, FitStrategy::First).unwrap();

    region.deallocate("B").unwrap();

    assert_eq!(region.blocks().len(), 4);
    assert!(region.blocks()[1].is_free());
    assert_coalesced(&region);
    assert_layout(&region);
}

#[test]
fn test_freeing_everything_restores_single_block() {
    let mut region = RegionAllocator::with_capacity(1000);
    let owners = ["A", "B", "C", "D", "E"];
    for (n, owner) in owners.iter().enumerate() {
        region
            .allocate(owner, 50 * (n as u64 + 1), FitStrategy::First)
            .unwrap();
    }

    for owner in ["C", "A", "E", "B", "D"] {
        region.deallocate(owner).unwrap();
        assert_coalesced(&region);
        assert_layout(&region);
    }

    assert_eq!(layout(&region), vec![(0, 1000, None)]);
}
