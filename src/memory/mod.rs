/*!
 * Memory Module
 * Contiguous region management and placement strategies
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::RegionAllocator;
pub use traits::*;
pub use types::*;
