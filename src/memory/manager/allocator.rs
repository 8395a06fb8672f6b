/*!
 * Region Allocator Implementation
 * Allocation and deallocation logic
 */

use super::super::types::{Block, FitStrategy, MemoryError, MemoryResult};
use super::placement::{find_candidate, largest_free};
use super::RegionAllocator;
use crate::core::types::{Address, Size};
use log::{debug, info, warn};

impl RegionAllocator {
    /// Allocate `size` units for `owner`, splitting the chosen free block
    ///
    /// All rejections are decided before the block sequence is touched.
    pub fn allocate(&mut self, owner: &str, size: Size, strategy: FitStrategy) -> MemoryResult<Address> {
        if size == 0 {
            warn!("Rejected allocation for {:?}: size must be positive", owner);
            return Err(MemoryError::InvalidSize { requested: size });
        }

        if owner.trim().is_empty() {
            warn!("Rejected allocation of {} units: blank owner", size);
            return Err(MemoryError::InvalidOwner);
        }

        // One active allocation per owner
        if self.find_owner(owner).is_some() {
            warn!("Rejected allocation for {}: owner already holds a block", owner);
            return Err(MemoryError::DuplicateOwner(owner.to_string()));
        }

        let idx = match find_candidate(&self.blocks, size, strategy, self.next_fit_cursor) {
            Some(idx) => idx,
            None => {
                let largest = largest_free(&self.blocks);
                warn!(
                    "No {} fit for {} ({} units requested, largest free block {} units)",
                    strategy, owner, size, largest
                );
                return Err(MemoryError::NoFit {
                    requested: size,
                    strategy,
                    largest_free: largest,
                });
            }
        };

        self.palette.assign(owner);

        let start = self.blocks[idx].start_address;
        let available = self.blocks[idx].size;

        // Split off the unused tail as a new free block right after the chosen one
        if available > size {
            let remainder = Block::free(start + size, available - size);
            debug!(
                "Split block {} at 0x{:x}: keeping {} units, {} units free at 0x{:x}",
                idx, start, size, remainder.size, remainder.start_address
            );
            self.blocks[idx].size = size;
            self.blocks.insert(idx + 1, remainder);
        }

        self.blocks[idx].owner = Some(owner.to_string());

        // Resume next-fit after this allocation, whichever strategy placed it
        self.next_fit_cursor = (idx + 1) % self.blocks.len();

        info!(
            "Allocated {} units at 0x{:x} for {} using {} fit (next-fit cursor -> {})",
            size, start, owner, strategy, self.next_fit_cursor
        );

        Ok(start)
    }

    /// Free the block held by `owner` and merge it with free neighbours
    pub fn deallocate(&mut self, owner: &str) -> MemoryResult<Size> {
        let Some(idx) = self.find_owner(owner) else {
            warn!("Attempted to deallocate unknown owner {:?}", owner);
            return Err(MemoryError::NotFound(owner.to_string()));
        };

        let block = &mut self.blocks[idx];
        let size = block.size;
        let start = block.start_address;
        block.release();

        let merges = self.coalesce();

        info!(
            "Deallocated {} units at 0x{:x} from {} ({} merges, {} blocks remain)",
            size,
            start,
            owner,
            merges,
            self.blocks.len()
        );

        Ok(size)
    }
}
