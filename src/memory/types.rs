/*!
 * Memory Types
 * Common types for region management
 */

use crate::core::limits::{PRESSURE_CRITICAL, PRESSURE_HIGH, PRESSURE_MEDIUM};
use crate::core::types::{Address, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is produced before the allocator is touched, so a failed call
/// leaves the region exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid allocation size: {requested}")]
    #[diagnostic(
        code(memory::invalid_size),
        help("Allocation sizes must be greater than zero.")
    )]
    InvalidSize { requested: Size },

    #[error("Owner identifier cannot be empty")]
    #[diagnostic(code(memory::invalid_owner))]
    InvalidOwner,

    #[error("Owner \"{0}\" already holds an allocation")]
    #[diagnostic(
        code(memory::duplicate_owner),
        help("Free the existing allocation first or pick another owner identifier.")
    )]
    DuplicateOwner(String),

    #[error("No free block of at least {requested} units for {strategy} fit (largest free block: {largest_free})")]
    #[diagnostic(
        code(memory::no_fit),
        help("Free some allocations or compact the region to merge scattered free space.")
    )]
    NoFit {
        requested: Size,
        strategy: FitStrategy,
        largest_free: Size,
    },

    #[error("Owner \"{0}\" has no active allocation")]
    #[diagnostic(code(memory::not_found))]
    NotFound(String),

    #[error("No free fragment smaller than {threshold} units, nothing to compact")]
    #[diagnostic(code(memory::nothing_to_compact))]
    NothingToCompact { threshold: Size },

    #[error("Unknown placement strategy: {0}")]
    #[diagnostic(
        code(memory::unknown_strategy),
        help("Use one of: first, next, best, worst.")
    )]
    UnknownStrategy(String),
}

/// Contiguous extent of the address space, either free or owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start_address: Address,
    pub size: Size,
    /// Present iff the block is allocated
    pub owner: Option<String>,
}

impl Block {
    pub fn free(start_address: Address, size: Size) -> Self {
        Self {
            start_address,
            size,
            owner: None,
        }
    }

    pub fn allocated(start_address: Address, size: Size, owner: impl Into<String>) -> Self {
        Self {
            start_address,
            size,
            owner: Some(owner.into()),
        }
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner.as_deref() == Some(owner)
    }

    /// Last address covered by the block (inclusive)
    pub fn end_address(&self) -> Address {
        (self.start_address + self.size).saturating_sub(1)
    }

    /// First address past the block
    pub fn next_address(&self) -> Address {
        self.start_address + self.size
    }

    pub fn release(&mut self) {
        self.owner = None;
    }
}

/// Placement strategy used to pick a free block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitStrategy {
    First,
    Next,
    Best,
    Worst,
}

impl FitStrategy {
    pub const ALL: [FitStrategy; 4] = [
        FitStrategy::First,
        FitStrategy::Next,
        FitStrategy::Best,
        FitStrategy::Worst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitStrategy::First => "first",
            FitStrategy::Next => "next",
            FitStrategy::Best => "best",
            FitStrategy::Worst => "worst",
        }
    }
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitStrategy {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(FitStrategy::First),
            "next" => Ok(FitStrategy::Next),
            "best" => Ok(FitStrategy::Best),
            "worst" => Ok(FitStrategy::Worst),
            _ => Err(MemoryError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: Size,
    pub used: Size,
    pub used_percent: f64,
    pub free: Size,
    pub free_percent: f64,
    pub fragmentation_percent: f64,
    pub free_blocks: usize,
    pub allocated_blocks: usize,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        let ratio = self.used_percent / 100.0;
        if ratio >= PRESSURE_CRITICAL {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Free blocks below a size threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSurvey {
    pub threshold: Size,
    pub fragment_count: usize,
    pub total_size: Size,
}

impl FragmentSurvey {
    pub fn is_empty(&self) -> bool {
        self.fragment_count == 0
    }
}

/// Outcome of a successful compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionReport {
    /// Small fragments that triggered the compaction
    pub survey: FragmentSurvey,
    /// Allocated blocks repacked at the front of the region
    pub relocated_blocks: usize,
    /// Size of the single trailing free block (0 when none was appended)
    pub free_size: Size,
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
