/*!
 * Core Types
 * Common types used across the simulator
 */

/// Address type for the simulated address space
pub type Address = u64;

/// Size type for block lengths, in address units
pub type Size = u64;

/// Index of a block within the ordered block sequence
pub type BlockIndex = usize;

/// Cosmetic color token handed out per owner (CSS hex string)
pub type ColorToken = &'static str;
