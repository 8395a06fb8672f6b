/*!
 * Free Block Coalescing
 */

use super::RegionAllocator;
use log::debug;

impl RegionAllocator {
    /// Merge every pair of address-adjacent free blocks, returning the merge count
    ///
    /// A merge keeps the left block's start address and re-examines the same
    /// position, so runs of any length collapse in one pass. The next-fit cursor
    /// moves back by one for every removed block at or before it, which keeps it
    /// on the same logical block.
    pub(super) fn coalesce(&mut self) -> usize {
        let mut merges = 0;
        let mut i = 0;

        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let right = self.blocks.remove(i + 1);
                self.blocks[i].size += right.size;
                merges += 1;

                if self.next_fit_cursor > i {
                    self.next_fit_cursor -= 1;
                }

                debug!(
                    "Coalesced free block at 0x{:x} into block {} (now {} units)",
                    right.start_address, i, self.blocks[i].size
                );
                continue;
            }
            i += 1;
        }

        merges
    }
}
