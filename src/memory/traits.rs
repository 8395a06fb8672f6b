/*!
 * Memory Traits
 * Region management abstractions
 */

use super::types::*;
use crate::core::types::{Address, BlockIndex, ColorToken, Size};

/// Placement interface
pub trait Allocator {
    /// Reset the region to a single free block of `total_size` units
    fn initialize(&mut self, total_size: Size);

    /// Place `size` units for `owner` using `strategy`, returning the start address
    fn allocate(&mut self, owner: &str, size: Size, strategy: FitStrategy) -> MemoryResult<Address>;

    /// Release the allocation held by `owner`, returning its size
    fn deallocate(&mut self, owner: &str) -> MemoryResult<Size>;
}

/// Read-only view of the region
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Count free blocks smaller than `threshold`
    fn small_fragment_survey(&self, threshold: Size) -> FragmentSurvey;

    /// Ordered block sequence covering the whole region
    fn blocks(&self) -> &[Block];

    fn total_size(&self) -> Size;

    /// Block index where the next next-fit search resumes
    fn next_fit_cursor(&self) -> BlockIndex;

    /// Color assigned to an owner on its first allocation
    fn color_of(&self, owner: &str) -> Option<ColorToken>;

    /// Whether the region has been initialized with at least one block
    fn is_initialized(&self) -> bool {
        !self.blocks().is_empty()
    }

    /// Owners currently holding a block, in address order
    fn active_owners(&self) -> Vec<&str> {
        self.blocks()
            .iter()
            .filter_map(|block| block.owner.as_deref())
            .collect()
    }
}

/// Defragmentation interface
pub trait Compactor {
    /// Repack allocations to the front when a fragment below `threshold` exists
    fn compact(&mut self, threshold: Size) -> MemoryResult<CompactionReport>;
}

/// Region manager trait combining all interfaces
pub trait RegionManager: Allocator + MemoryInfo + Compactor {}

/// Implement RegionManager for types that implement all required traits
impl<T> RegionManager for T where T: Allocator + MemoryInfo + Compactor {}
