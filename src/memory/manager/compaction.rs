/*!
 * Region Compaction
 * Full defragmentation, gated by the small-fragment survey
 */

use super::super::types::{Block, CompactionReport, MemoryError, MemoryResult};
use super::RegionAllocator;
use crate::core::types::Size;
use log::{info, warn};

impl RegionAllocator {
    /// Repack every allocation to the front and collapse all free space into one block
    ///
    /// `threshold` only decides whether compaction runs: it requires at least one
    /// free fragment smaller than it. Once running, every allocation moves and all
    /// free space (not just the small fragments) is merged.
    pub fn compact(&mut self, threshold: Size) -> MemoryResult<CompactionReport> {
        let survey = self.small_fragment_survey(threshold);
        if survey.is_empty() {
            warn!("Compaction skipped: no free fragment below {} units", threshold);
            return Err(MemoryError::NothingToCompact { threshold });
        }

        let old_blocks = std::mem::take(&mut self.blocks);
        let mut free_size: Size = 0;
        let mut next_address = 0;

        for block in old_blocks {
            match block.owner {
                Some(owner) => {
                    let relocated = Block::allocated(next_address, block.size, owner);
                    next_address = relocated.next_address();
                    self.blocks.push(relocated);
                }
                None => free_size += block.size,
            }
        }

        let relocated_blocks = self.blocks.len();
        if free_size > 0 {
            self.blocks.push(Block::free(next_address, free_size));
        }

        // Point next-fit at the trailing free block
        self.next_fit_cursor = if relocated_blocks < self.blocks.len() {
            relocated_blocks
        } else {
            0
        };

        info!(
            "Compacted region: {} fragments ({} units) below {} triggered, {} allocations repacked, {} units free at 0x{:x}",
            survey.fragment_count,
            survey.total_size,
            threshold,
            relocated_blocks,
            free_size,
            next_address
        );

        Ok(CompactionReport {
            survey,
            relocated_blocks,
            free_size,
        })
    }
}
