/*!
 * Simulator Limits and Constants
 *
 * Centralized location for defaults, thresholds and magic numbers.
 * Organized by domain so the presentation layer and the allocator agree on them.
 */

use super::types::{ColorToken, Size};

// =============================================================================
// ADDRESS SPACE
// =============================================================================

/// Address space size used when the driver auto-initializes
pub const DEFAULT_TOTAL_SIZE: Size = 1000;

// =============================================================================
// COMPACTION
// =============================================================================

/// Fragment threshold used by `compact` callers that do not pick one
pub const DEFAULT_COMPACTION_THRESHOLD: Size = 4;

/// Fragment threshold the interactive session starts with
pub const SESSION_COMPACTION_THRESHOLD: Size = 4000;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as medium
pub const PRESSURE_MEDIUM: f64 = 0.60;

/// Usage ratio at which pressure is reported as high
pub const PRESSURE_HIGH: f64 = 0.80;

/// Usage ratio at which pressure is reported as critical
pub const PRESSURE_CRITICAL: f64 = 0.95;

// =============================================================================
// PRESENTATION
// =============================================================================

/// Owner colors, handed out round-robin in first-allocation order
pub const OWNER_PALETTE: [ColorToken; 15] = [
    "#e74c3c", "#e67e22", "#9b59b6", "#8e44ad", "#16a085", "#27ae60", "#f1c40f", "#f39c12",
    "#d35400", "#c0392b", "#1abc9c", "#2980b9", "#e84393", "#6c5ce7", "#fd79a8",
];

/// Character cells used by the ASCII bar rendering
pub const BAR_WIDTH: usize = 60;

/// Initial operation log line
pub const STARTUP_LOG_MESSAGE: &str = "System started. Initialize memory to begin.";
