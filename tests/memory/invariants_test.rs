/*!
 * Region Invariant Property Tests
 * Random operation sequences must never break the block layout
 */

use super::common::{assert_coalesced, assert_layout};
use proptest::prelude::*;
use region_allocator::{FitStrategy, RegionAllocator};
use std::collections::HashSet;

const OWNERS: [&str; 6] = ["P1", "P2", "P3", "P4", "P5", "P6"];

#[derive(Debug, Clone)]
enum Op {
    Alloc {
        owner: usize,
        size: u64,
        strategy: FitStrategy,
    },
    Free {
        owner: usize,
    },
    Compact {
        threshold: u64,
    },
}

fn fit_strategy() -> impl Strategy<Value = FitStrategy> {
    prop_oneof![
        Just(FitStrategy::First),
        Just(FitStrategy::Next),
        Just(FitStrategy::Best),
        Just(FitStrategy::Worst),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..OWNERS.len(), 1u64..400, fit_strategy())
            .prop_map(|(owner, size, strategy)| Op::Alloc { owner, size, strategy }),
        3 => (0..OWNERS.len()).prop_map(|owner| Op::Free { owner }),
        1 => (1u64..80).prop_map(|threshold| Op::Compact { threshold }),
    ]
}

fn check_region(region: &RegionAllocator) -> Result<(), TestCaseError> {
    assert_layout(region);
    assert_coalesced(region);
    prop_assert!(region.next_fit_cursor() < region.blocks().len());

    let mut seen = HashSet::new();
    for owner in region.blocks().iter().filter_map(|b| b.owner.as_deref()) {
        prop_assert!(seen.insert(owner), "owner {} appears twice", owner);
    }

    let stats = region.stats();
    prop_assert_eq!(stats.used + stats.free, region.total_size());
    Ok(())
}

proptest! {
    #[test]
    fn prop_operations_preserve_layout(ops in prop::collection::vec(op(), 1..60)) {
        let mut region = RegionAllocator::with_capacity(1000);

        for op in ops {
            let before = region.blocks().to_vec();
            let failed = match op {
                Op::Alloc { owner, size, strategy } => {
                    region.allocate(OWNERS[owner], size, strategy).is_err()
                }
                Op::Free { owner } => region.deallocate(OWNERS[owner]).is_err(),
                Op::Compact { threshold } => region.compact(threshold).is_err(),
            };

            if failed {
                prop_assert_eq!(region.blocks(), before.as_slice());
            }
            check_region(&region)?;
        }
    }

    #[test]
    fn prop_allocation_lands_inside_a_former_free_block(
        sizes in prop::collection::vec(1u64..200, 1..8),
        request in 1u64..300,
        strategy in fit_strategy(),
    ) {
        let mut region = RegionAllocator::with_capacity(1000);
        for (n, size) in sizes.iter().enumerate() {
            region.allocate(OWNERS[n % OWNERS.len()], *size, FitStrategy::First).ok();
        }
        // Punch holes at every other owner
        for owner in OWNERS.iter().step_by(2) {
            region.deallocate(owner).ok();
        }

        let holes: Vec<(u64, u64)> = region
            .blocks()
            .iter()
            .filter(|b| b.is_free())
            .map(|b| (b.start_address, b.size))
            .collect();

        if let Ok(address) = region.allocate("probe", request, strategy) {
            prop_assert!(holes
                .iter()
                .any(|&(start, size)| start == address && size >= request));
        } else {
            prop_assert!(holes.iter().all(|&(_, size)| size < request));
        }
        check_region(&region)?;
    }
}
