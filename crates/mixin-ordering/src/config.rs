//! Configuration for mixin ordering

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Ordering configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Maximum mixins per target type (anti-DoS)
    pub max_units: usize,
    /// Maximum resolved dependency edges per target type (anti-DoS)
    pub max_dependency_edges: usize,
    /// Re-check ordering invariants on every produced order
    pub verify_invariants: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_units: 4096,
            max_dependency_edges: 65_536,
            verify_invariants: false,
        }
    }
}

impl OrderingConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MIXIN_MAX_UNITS`: Maximum mixins (default: 4096)
    /// - `MIXIN_MAX_DEPENDENCY_EDGES`: Maximum dependency edges (default: 65536)
    /// - `MIXIN_VERIFY_INVARIANTS`: Verify invariants after ordering (default: false)
    ///
    /// Absent or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_units: env::var("MIXIN_MAX_UNITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_units),

            max_dependency_edges: env::var("MIXIN_MAX_DEPENDENCY_EDGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_dependency_edges),

            verify_invariants: env::var("MIXIN_VERIFY_INVARIANTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.verify_invariants),
        }
    }

    /// Validate limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_units == 0 {
            return Err(ConfigError::ZeroLimit("max_units"));
        }

        if self.max_dependency_edges == 0 {
            return Err(ConfigError::ZeroLimit("max_dependency_edges"));
        }

        Ok(())
    }
}
