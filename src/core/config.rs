/*!
 * Simulator Configuration
 *
 * Defaults come from `core::limits`; the driver may override them via environment:
 * - REGIONSIM_TOTAL_SIZE: address space size used by auto-initialization
 * - REGIONSIM_COMPACTION_THRESHOLD: fragment size below which compaction is offered
 * - REGIONSIM_AUTO_INIT: initialize the address space before the first command
 */

use super::limits::{DEFAULT_TOTAL_SIZE, SESSION_COMPACTION_THRESHOLD};
use super::types::Size;
use log::warn;

pub const ENV_TOTAL_SIZE: &str = "REGIONSIM_TOTAL_SIZE";
pub const ENV_COMPACTION_THRESHOLD: &str = "REGIONSIM_COMPACTION_THRESHOLD";
pub const ENV_AUTO_INIT: &str = "REGIONSIM_AUTO_INIT";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Size used when the session initializes on its own (default: 1000)
    pub total_size: Size,

    /// Fragment threshold for compaction offers (default: 4000)
    pub compaction_threshold: Size,

    /// Initialize the address space before the first command
    pub auto_init: bool,
}

impl SimulatorConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            total_size: DEFAULT_TOTAL_SIZE,
            compaction_threshold: SESSION_COMPACTION_THRESHOLD,
            auto_init: false,
        }
    }

    /// Configuration that starts with an initialized address space
    pub fn auto_initialized(total_size: Size) -> Self {
        Self {
            total_size,
            auto_init: true,
            ..Self::new()
        }
    }

    pub fn with_compaction_threshold(mut self, threshold: Size) -> Self {
        self.compaction_threshold = threshold;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();

        let total_size = parse_positive(&lookup, ENV_TOTAL_SIZE).unwrap_or(defaults.total_size);
        let compaction_threshold = parse_positive(&lookup, ENV_COMPACTION_THRESHOLD)
            .unwrap_or(defaults.compaction_threshold);
        let auto_init = lookup(ENV_AUTO_INIT)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.auto_init);

        Self {
            total_size,
            compaction_threshold,
            auto_init,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_positive<F>(lookup: &F, key: &str) -> Option<Size>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<Size>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("Ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
    }
}
