/*!
 * Placement Strategy Tests
 */

use super::common::{assert_coalesced, assert_layout, layout};
use pretty_assertions::assert_eq;
use region_allocator::{FitStrategy, MemoryError, RegionAllocator};

/// Free holes of 40 @100, 120 @340 and 240 @760
fn holey_region() -> RegionAllocator {
    let mut region = RegionAllocator::with_capacity(1000);
    for (owner, size) in [("A", 100), ("B", 40), ("C", 200), ("D", 120), ("E", 300)] {
        region.allocate(owner, size, FitStrategy::First).unwrap();
    }
    region.deallocate("B").unwrap();
    region.deallocate("D").unwrap();
    region
}

#[test]
fn test_holey_region_layout() {
    let region = holey_region();
    assert_eq!(
        layout(&region),
        vec![
            (0, 100, Some("A")),
            (100, 40, None),
            (140, 200, Some("C")),
            (340, 120, None),
            (460, 300, Some("E")),
            (760, 240, None),
        ]
    );
    assert_eq!(region.next_fit_cursor(), 5);
}

#[test]
fn test_first_fit_picks_lowest_address() {
    let mut region = holey_region();
    assert_eq!(region.allocate("X", 30, FitStrategy::First), Ok(100));
    assert_eq!(region.allocate("Y", 100, FitStrategy::First), Ok(340));
    assert_layout(&region);
}

#[test]
fn test_best_fit_picks_smallest_fitting_hole() {
    let mut region = holey_region();
    assert_eq!(region.allocate("X", 100, FitStrategy::Best), Ok(340));
    // Holes are now 40 @100, 20 @440 and 240 @760
    assert_eq!(region.allocate("Y", 30, FitStrategy::Best), Ok(100));
    assert_eq!(region.allocate("W", 20, FitStrategy::Best), Ok(440));
    assert_eq!(region.allocate("Z", 200, FitStrategy::Best), Ok(760));
}

#[test]
fn test_best_fit_skips_holes_that_are_too_small() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("P1", 300, FitStrategy::First).unwrap();
    region.allocate("X", 50, FitStrategy::First).unwrap();
    region.allocate("Y", 100, FitStrategy::First).unwrap();
    region.deallocate("X").unwrap();
    // P1 | free 50 @300 | Y | free 550 @450

    assert_eq!(region.allocate("P2", 200, FitStrategy::Best), Ok(450));
    assert_eq!(region.allocate("P3", 50, FitStrategy::Best), Ok(300));
}

#[test]
fn test_worst_fit_picks_largest_hole() {
    let mut region = holey_region();
    assert_eq!(region.allocate("X", 30, FitStrategy::Worst), Ok(760));
    // 240 - 30 = 210 is still the largest
    assert_eq!(region.allocate("Y", 30, FitStrategy::Worst), Ok(790));
}

#[test]
fn test_ties_go_to_lowest_address() {
    let mut region = RegionAllocator::with_capacity(300);
    region.allocate("A", 100, FitStrategy::First).unwrap();
    region.allocate("B", 100, FitStrategy::First).unwrap();
    region.allocate("C", 100, FitStrategy::First).unwrap();
    region.deallocate("A").unwrap();
    region.deallocate("C").unwrap();

    let mut best = region.clone();
    assert_eq!(best.allocate("X", 50, FitStrategy::Best), Ok(0));
    assert_eq!(region.allocate("X", 50, FitStrategy::Worst), Ok(0));
}

#[test]
fn test_next_fit_resumes_after_last_allocation() {
    let mut region = holey_region();

    // Cursor sits on the 240 tail, so the 40 hole at 100 is skipped
    assert_eq!(region.allocate("X", 30, FitStrategy::Next), Ok(760));
    assert_eq!(region.next_fit_cursor(), 6);
    assert_eq!(region.allocate("Y", 30, FitStrategy::Next), Ok(790));
}

#[test]
fn test_next_fit_wraps_around() {
    let mut region = RegionAllocator::with_capacity(1000);
    region.allocate("A", 100, FitStrategy::First).unwrap();
    region.allocate("B", 850, FitStrategy::First).unwrap();
    region.deallocate("A").unwrap();
    // free 100 | B | free 50, cursor on the tail
    assert_eq!(region.next_fit_cursor(), 2);

    assert_eq!(region.allocate("C", 80, FitStrategy::Next), Ok(0));
    assert_eq!(region.next_fit_cursor(), 1);
}

#[test]
fn test_next_fit_fails_only_when_nothing_fits() {
    let mut region = holey_region();
    let before = region.blocks().to_vec();

    assert!(matches!(
        region.allocate("X", 241, FitStrategy::Next),
        Err(MemoryError::NoFit {
            requested: 241,
            largest_free: 240,
            ..
        })
    ));
    assert_eq!(region.blocks(), before.as_slice());
}

#[test]
fn test_every_strategy_keeps_layout_valid() {
    for strategy in FitStrategy::ALL {
        let mut region = holey_region();
        region.allocate("X", 40, strategy).unwrap();
        region.allocate("Y", 120, strategy).unwrap();
        assert_layout(&region);
        assert_coalesced(&region);
        assert!(region.next_fit_cursor() < region.blocks().len());
    }
}
