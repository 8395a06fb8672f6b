/*!
 * Region Views
 * Table, proportional bar and statistics renderings of a region
 */

use crate::core::types::{Address, BlockIndex, ColorToken, Size};
use crate::memory::{MemoryInfo, MemoryStats};
use serde::Serialize;
use std::fmt::Write;

/// One row of the block table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRow {
    pub index: BlockIndex,
    pub start: Address,
    /// Inclusive end address
    pub end: Address,
    pub size: Size,
    pub free: bool,
    pub owner: Option<String>,
    pub color: Option<ColorToken>,
}

/// Placement of one block on the proportional bar, in percent of the region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSegment {
    pub index: BlockIndex,
    pub left_percent: f64,
    pub width_percent: f64,
    pub label: String,
    pub color: Option<ColorToken>,
}

// A zero-sized region still renders, as if it were one unit wide
fn scale<M: MemoryInfo + ?Sized>(region: &M) -> f64 {
    region.total_size().max(1) as f64
}

pub fn block_rows<M: MemoryInfo + ?Sized>(region: &M) -> Vec<BlockRow> {
    region
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| BlockRow {
            index,
            start: block.start_address,
            end: block.end_address(),
            size: block.size,
            free: block.is_free(),
            owner: block.owner.clone(),
            color: block.owner.as_deref().and_then(|owner| region.color_of(owner)),
        })
        .collect()
}

pub fn bar_segments<M: MemoryInfo + ?Sized>(region: &M) -> Vec<BarSegment> {
    let total = scale(region);
    region
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| BarSegment {
            index,
            left_percent: block.start_address as f64 * 100.0 / total,
            width_percent: block.size as f64 * 100.0 / total,
            label: match &block.owner {
                Some(owner) => format!("{}: {}", owner, block.size),
                None => format!("Free: {}", block.size),
            },
            color: block.owner.as_deref().and_then(|owner| region.color_of(owner)),
        })
        .collect()
}

/// Position of the next-fit marker: middle of the cursor block, in percent
pub fn cursor_marker_percent<M: MemoryInfo + ?Sized>(region: &M) -> Option<f64> {
    let blocks = region.blocks();
    if blocks.is_empty() {
        return None;
    }

    let cursor = region.next_fit_cursor();
    let mut position: f64 = blocks.iter().take(cursor).map(|b| b.size as f64).sum();
    if let Some(block) = blocks.get(cursor) {
        position += block.size as f64 / 2.0;
    }

    Some(position * 100.0 / scale(region))
}

pub fn render_table<M: MemoryInfo + ?Sized>(region: &M) -> String {
    let cursor = region.next_fit_cursor();
    let mut out = format!(
        "{:>3} {:>8} {:>8} {:>8}  {:<9}  {:<12}  {}\n",
        "#", "Start", "End", "Size", "Status", "Owner", "Color"
    );
    for row in block_rows(region) {
        let _ = writeln!(
            out,
            "{:>3} {:>8} {:>8} {:>8}  {:<9}  {:<12}  {}{}",
            row.index,
            row.start,
            row.end,
            row.size,
            if row.free { "Free" } else { "Allocated" },
            row.owner.as_deref().unwrap_or("None"),
            row.color.unwrap_or("-"),
            if row.index == cursor { "  <- next fit" } else { "" },
        );
    }
    out.trim_end().to_string()
}

/// Fixed-width ASCII bar with the next-fit marker underneath
///
/// Free cells render as `.`, allocated cells as the owner's first character.
pub fn render_bar<M: MemoryInfo + ?Sized>(region: &M, width: usize) -> String {
    let width = width.max(1);
    let mut cells = vec![' '; width];
    let total = scale(region);

    for block in region.blocks() {
        let from = (block.start_address as f64 * width as f64 / total).floor() as usize;
        let to = (block.next_address() as f64 * width as f64 / total).floor() as usize;
        let glyph = match &block.owner {
            Some(owner) => owner.chars().next().unwrap_or('#'),
            None => '.',
        };
        for cell in cells.iter_mut().take(to.min(width)).skip(from) {
            *cell = glyph;
        }
    }

    let mut out = format!("|{}|", cells.iter().collect::<String>());
    if let Some(percent) = cursor_marker_percent(region) {
        let column = ((percent * width as f64 / 100.0) as usize).min(width - 1);
        let _ = write!(out, "\n {}^ next fit", " ".repeat(column));
    }
    out
}

pub fn render_stats(stats: &MemoryStats) -> String {
    format!(
        "Total: {} | Used: {} ({}%) | Free: {} ({}%) | Fragmentation: {}% | Blocks: {} allocated, {} free | Pressure: {}",
        stats.total,
        stats.used,
        stats.used_percent,
        stats.free,
        stats.free_percent,
        stats.fragmentation_percent,
        stats.allocated_blocks,
        stats.free_blocks,
        stats.memory_pressure()
    )
}
