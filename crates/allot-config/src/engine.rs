//! Allocation engine settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hard cap on operations in one atomic store batch.
pub const MAX_BATCH_SIZE: usize = 500;

const fn default_quota() -> u32 {
    5
}

fn default_institution_prefix() -> String {
    "UP".to_string()
}

fn default_affirmative() -> String {
    "Yes".to_string()
}

const fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Per-role capacity for staff with neither a quota record nor a seeded quota.
    #[serde(default = "default_quota")]
    pub default_quota: u32,

    /// Prefix stripped from (and re-attached to) self-reported student IDs.
    #[serde(default = "default_institution_prefix")]
    pub institution_prefix: String,

    /// Literal agreement value a self-report row must carry to be processed.
    #[serde(default = "default_affirmative")]
    pub affirmative: String,

    /// Operations per batch for bulk imports and deletes.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_quota: default_quota(),
            institution_prefix: default_institution_prefix(),
            affirmative: default_affirmative(),
            batch_size: default_batch_size(),
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero default quota or a batch
    /// size outside `1..=500`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_quota == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.default_quota".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "engine.batch_size".into(),
                reason: format!("must be between 1 and {MAX_BATCH_SIZE}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = EngineConfig::default();
        assert_eq!(config.default_quota, 5);
        assert_eq!(config.institution_prefix, "UP");
        assert_eq!(config.affirmative, "Yes");
        assert_eq!(config.batch_size, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_quota_is_rejected() {
        let config = EngineConfig {
            default_quota: 0,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("engine.default_quota"));
    }

    #[test]
    fn oversized_batch_is_rejected() {
        for batch_size in [0, 501] {
            let config = EngineConfig {
                batch_size,
                ..EngineConfig::default()
            };
            assert!(config.validate().is_err(), "batch_size {batch_size}");
        }
    }
}
