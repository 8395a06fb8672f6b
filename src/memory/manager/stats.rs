/*!
 * Region Statistics
 */

use super::super::types::{round1, FragmentSurvey, MemoryStats};
use super::RegionAllocator;
use crate::core::types::Size;

impl RegionAllocator {
    /// Aggregate usage and fragmentation over the current blocks
    ///
    /// Fragmentation is `(free_blocks - 1) / free_blocks * 100`: it grows with the
    /// number of pieces the free space is split into, independent of their sizes.
    pub fn stats(&self) -> MemoryStats {
        let mut used: Size = 0;
        let mut free: Size = 0;
        let mut free_blocks = 0usize;
        let mut allocated_blocks = 0usize;

        for block in &self.blocks {
            if block.is_free() {
                free += block.size;
                free_blocks += 1;
            } else {
                used += block.size;
                allocated_blocks += 1;
            }
        }

        let percent_of_total = |value: Size| {
            if self.total_size > 0 {
                round1(value as f64 * 100.0 / self.total_size as f64)
            } else {
                0.0
            }
        };

        let fragmentation_percent = if free > 0 && free_blocks > 1 {
            round1((free_blocks - 1) as f64 * 100.0 / free_blocks as f64)
        } else {
            0.0
        };

        MemoryStats {
            total: self.total_size,
            used,
            used_percent: percent_of_total(used),
            free,
            free_percent: percent_of_total(free),
            fragmentation_percent,
            free_blocks,
            allocated_blocks,
        }
    }

    /// Count and total size of free blocks strictly smaller than `threshold`
    pub fn small_fragment_survey(&self, threshold: Size) -> FragmentSurvey {
        self.blocks
            .iter()
            .filter(|block| block.is_free() && block.size < threshold)
            .fold(
                FragmentSurvey {
                    threshold,
                    ..FragmentSurvey::default()
                },
                |mut survey, block| {
                    survey.fragment_count += 1;
                    survey.total_size += block.size;
                    survey
                },
            )
    }
}
