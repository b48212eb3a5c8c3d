use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::error::RecallError;

#[derive(Debug, Deserialize, Clone)]
pub struct RecallConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub retrieval: RetrieverConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Hop limit for any single path.
    pub max_depth: usize,
    /// Strict lower bound for retained transfer energy.
    pub min_activation: f64,
    /// Baseline tag similarity when edge tags miss the query tags entirely.
    pub tag_sim_floor: f64,
    /// Per-parent, per-depth fan-out cap.
    pub max_branches: usize,
    /// Retries per graph-store call on transient failures.
    pub max_retries: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            min_activation: 0.005,
            tag_sim_floor: 0.15,
            max_branches: 3,
            max_retries: 2,
        }
    }
}

impl RetrieverConfig {
    /// Precondition check run before any exploration starts.
    pub fn validate(&self) -> Result<(), RecallError> {
        if self.max_depth < 1 {
            return Err(RecallError::Precondition(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if !self.min_activation.is_finite() || self.min_activation <= 0.0 {
            return Err(RecallError::Precondition(format!(
                "min_activation must be a positive finite number, got {}",
                self.min_activation
            )));
        }
        if !(0.0..=1.0).contains(&self.tag_sim_floor) {
            return Err(RecallError::Precondition(format!(
                "tag_sim_floor must be within [0, 1], got {}",
                self.tag_sim_floor
            )));
        }
        if self.max_branches < 1 {
            return Err(RecallError::Precondition(
                "max_branches must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl RecallConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetrieverConfig::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.min_activation, 0.005);
        assert_eq!(config.tag_sim_floor, 0.15);
        assert_eq!(config.max_branches, 3);
        assert_eq!(config.max_retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RetrieverConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = RetrieverConfig {
            min_activation: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = RetrieverConfig {
            tag_sim_floor: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = RetrieverConfig {
            max_branches: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
