/*!
 * Region Allocator Simulator Library
 * Contiguous-memory placement, coalescing and compaction over an abstract address space
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod session;

// Re-exports
pub use crate::core::{SimulatorConfig, Address, BlockIndex, ColorToken, Size};
pub use memory::{
    Allocator, Block, CompactionReport, Compactor, FitStrategy, FragmentSurvey, MemoryError,
    MemoryInfo, MemoryPressure, MemoryResult, MemoryStats, RegionAllocator, RegionManager,
};
pub use monitoring::init_tracing;
pub use session::{Command, CommandError, Session, SessionError, SessionResult, Snapshot};
