/*!
 * Region Management
 *
 * Contiguous-region allocator over a flat, abstract address space.
 *
 * ## Layout
 *
 * The region is an ordered `Vec<Block>` sorted by start address, contiguous and
 * covering `[0, total_size)` with no gaps or overlaps. Blocks are value types;
 * their only identity is their position, so every split and merge is plain
 * index arithmetic on the vector.
 *
 * ## Features
 *
 * - **Placement strategies**: first, next, best and worst fit
 * - **Block splitting**: the unused tail of a chosen block becomes a new free block
 * - **Coalescing**: adjacent free blocks are merged after every deallocation
 * - **Compaction**: allocations are repacked to the front, free space collapses
 *   into a single trailing block
 * - **Next-fit cursor**: resumes after the most recent allocation, whichever
 *   strategy placed it
 */

mod allocator;
mod coalesce;
mod compaction;
mod palette;
mod placement;
mod stats;

use super::traits::{Allocator, Compactor, MemoryInfo};
use super::types::{Block, CompactionReport, FitStrategy, FragmentSurvey, MemoryResult, MemoryStats};
use crate::core::types::{Address, BlockIndex, ColorToken, Size};
use log::info;
use palette::OwnerPalette;

/// Region allocator
///
/// Exclusively owned by its caller; every operation runs to completion before
/// the next one starts.
#[derive(Debug, Clone, Default)]
pub struct RegionAllocator {
    pub(super) blocks: Vec<Block>,
    pub(super) total_size: Size,
    // Where the next next-fit scan starts; always < blocks.len(), or 0 when empty
    pub(super) next_fit_cursor: BlockIndex,
    pub(super) palette: OwnerPalette,
}

impl RegionAllocator {
    /// Create an empty, uninitialized region
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region already initialized to `total_size` units
    pub fn with_capacity(total_size: Size) -> Self {
        let mut region = Self::new();
        region.initialize(total_size);
        region
    }

    /// Reset to one free block spanning the whole space
    ///
    /// Prior allocations are discarded. Owner colors survive so an owner keeps
    /// its color across re-initialization.
    pub fn initialize(&mut self, total_size: Size) {
        self.blocks = vec![Block::free(0, total_size)];
        self.total_size = total_size;
        self.next_fit_cursor = 0;
        info!("Region initialized with {} units", total_size);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    pub fn next_fit_cursor(&self) -> BlockIndex {
        self.next_fit_cursor
    }

    pub fn color_of(&self, owner: &str) -> Option<ColorToken> {
        self.palette.get(owner)
    }

    pub fn is_initialized(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Index of the block currently held by `owner`
    pub fn find_owner(&self, owner: &str) -> Option<BlockIndex> {
        self.blocks.iter().position(|block| block.is_owned_by(owner))
    }
}

// Implement trait interfaces
impl Allocator for RegionAllocator {
    fn initialize(&mut self, total_size: Size) {
        RegionAllocator::initialize(self, total_size)
    }

    fn allocate(&mut self, owner: &str, size: Size, strategy: FitStrategy) -> MemoryResult<Address> {
        RegionAllocator::allocate(self, owner, size, strategy)
    }

    fn deallocate(&mut self, owner: &str) -> MemoryResult<Size> {
        RegionAllocator::deallocate(self, owner)
    }
}

impl MemoryInfo for RegionAllocator {
    fn stats(&self) -> MemoryStats {
        RegionAllocator::stats(self)
    }

    fn small_fragment_survey(&self, threshold: Size) -> FragmentSurvey {
        RegionAllocator::small_fragment_survey(self, threshold)
    }

    fn blocks(&self) -> &[Block] {
        RegionAllocator::blocks(self)
    }

    fn total_size(&self) -> Size {
        RegionAllocator::total_size(self)
    }

    fn next_fit_cursor(&self) -> BlockIndex {
        RegionAllocator::next_fit_cursor(self)
    }

    fn color_of(&self, owner: &str) -> Option<ColorToken> {
        RegionAllocator::color_of(self, owner)
    }
}

impl Compactor for RegionAllocator {
    fn compact(&mut self, threshold: Size) -> MemoryResult<CompactionReport> {
        RegionAllocator::compact(self, threshold)
    }
}
