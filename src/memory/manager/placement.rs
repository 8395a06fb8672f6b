/*!
 * Placement Strategies
 * Candidate selection over the ordered block sequence
 */

use super::super::types::{Block, FitStrategy};
use crate::core::types::{BlockIndex, Size};

fn fits(block: &Block, size: Size) -> bool {
    block.is_free() && block.size >= size
}

/// Pick the block index `strategy` would allocate from, if any
pub(super) fn find_candidate(
    blocks: &[Block],
    size: Size,
    strategy: FitStrategy,
    cursor: BlockIndex,
) -> Option<BlockIndex> {
    match strategy {
        FitStrategy::First => first_fit(blocks, size),
        FitStrategy::Next => next_fit(blocks, size, cursor),
        FitStrategy::Best => best_fit(blocks, size),
        FitStrategy::Worst => worst_fit(blocks, size),
    }
}

/// Lowest-address free block that fits
fn first_fit(blocks: &[Block], size: Size) -> Option<BlockIndex> {
    blocks.iter().position(|block| fits(block, size))
}

/// First fit scanning circularly from `cursor`, visiting every block once
fn next_fit(blocks: &[Block], size: Size, cursor: BlockIndex) -> Option<BlockIndex> {
    let len = blocks.len();
    (0..len)
        .map(|offset| (cursor + offset) % len)
        .find(|&idx| fits(&blocks[idx], size))
}

/// Smallest fitting block; the lowest address wins ties
fn best_fit(blocks: &[Block], size: Size) -> Option<BlockIndex> {
    let mut best: Option<(BlockIndex, Size)> = None;
    for (idx, block) in blocks.iter().enumerate() {
        if fits(block, size) && best.map_or(true, |(_, s)| block.size < s) {
            best = Some((idx, block.size));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Largest fitting block; the lowest address wins ties
fn worst_fit(blocks: &[Block], size: Size) -> Option<BlockIndex> {
    let mut worst: Option<(BlockIndex, Size)> = None;
    for (idx, block) in blocks.iter().enumerate() {
        if fits(block, size) && worst.map_or(true, |(_, s)| block.size > s) {
            worst = Some((idx, block.size));
        }
    }
    worst.map(|(idx, _)| idx)
}

/// Size of the largest free block (0 when none)
pub(super) fn largest_free(blocks: &[Block]) -> Size {
    blocks
        .iter()
        .filter(|block| block.is_free())
        .map(|block| block.size)
        .max()
        .unwrap_or(0)
}
