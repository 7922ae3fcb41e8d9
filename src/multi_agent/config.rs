//! Coordinator configuration
//!
//! Controls replay capacity, batch size, and how often agents learn. Defaults
//! match the reference MADDPG setup (100k transitions, batches of 256, one
//! learning pass on every step).

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Configuration for [`MultiAgentCoordinator`](super::MultiAgentCoordinator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaddpgConfig {
    /// Replay buffer capacity (transitions)
    pub buffer_size: usize,

    /// Transitions per sampled batch, also the warm-up threshold
    ///
    /// Must be smaller than `buffer_size`: learning starts only once more
    /// than `batch_size` transitions are stored.
    pub batch_size: usize,

    /// Learning passes per eligible timestep
    pub learn_updates_per_cycle: usize,

    /// Learn only on timesteps divisible by this value
    pub update_every_n_steps: usize,
}

impl Default for MaddpgConfig {
    fn default() -> Self {
        Self {
            buffer_size: 100_000,
            batch_size: 256,
            learn_updates_per_cycle: 1,
            update_every_n_steps: 1,
        }
    }
}

impl MaddpgConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid MADDPG config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(anyhow!("buffer_size must be positive"));
        }
        if self.batch_size == 0 {
            return Err(anyhow!("batch_size must be positive"));
        }
        if self.batch_size >= self.buffer_size {
            return Err(anyhow!(
                "batch_size ({}) must be smaller than buffer_size ({}) \
                 so the warm-up gate can open",
                self.batch_size,
                self.buffer_size
            ));
        }
        if self.learn_updates_per_cycle == 0 {
            return Err(anyhow!("learn_updates_per_cycle must be positive"));
        }
        if self.update_every_n_steps == 0 {
            return Err(anyhow!("update_every_n_steps must be positive"));
        }
        Ok(())
    }

    /// Set replay buffer capacity
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set batch size
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set learning passes per cycle
    pub fn learn_updates_per_cycle(mut self, updates: usize) -> Self {
        self.learn_updates_per_cycle = updates;
        self
    }

    /// Set update cadence
    pub fn update_every_n_steps(mut self, steps: usize) -> Self {
        self.update_every_n_steps = steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MaddpgConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.buffer_size, 100_000);
        assert_eq!(config.batch_size, 256);
        assert_eq!(config.learn_updates_per_cycle, 1);
        assert_eq!(config.update_every_n_steps, 1);
    }

    #[test]
    fn test_config_validation() {
        assert!(MaddpgConfig::new().buffer_size(0).validate().is_err());
        assert!(MaddpgConfig::new().batch_size(0).validate().is_err());
        assert!(MaddpgConfig::new().learn_updates_per_cycle(0).validate().is_err());
        assert!(MaddpgConfig::new().update_every_n_steps(0).validate().is_err());

        // Learning needs more than batch_size stored transitions
        let config = MaddpgConfig::new().buffer_size(10).batch_size(11);
        assert!(config.validate().is_err());

        let config = MaddpgConfig::new().buffer_size(10).batch_size(10);
        assert!(config.validate().is_err());

        let config = MaddpgConfig::new().buffer_size(10).batch_size(9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = MaddpgConfig::new().buffer_size(5).batch_size(2).update_every_n_steps(4);

        assert_eq!(config.buffer_size, 5);
        assert_eq!(config.batch_size, 2);
        assert_eq!(config.update_every_n_steps, 4);

        // Other values should remain default
        assert_eq!(config.learn_updates_per_cycle, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MaddpgConfig::from_json_str(r#"{ "batch_size": 64 }"#).unwrap();

        assert_eq!(config.batch_size, 64);
        assert_eq!(config.buffer_size, 100_000);
        assert_eq!(config.update_every_n_steps, 1);
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        assert!(MaddpgConfig::from_json_str(r#"{ "batch_size": 0 }"#).is_err());
        assert!(MaddpgConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let config = MaddpgConfig::new().buffer_size(1_000).learn_updates_per_cycle(3);
        let path = std::env::temp_dir().join(format!("maddpg_config_{}.json", std::process::id()));

        fs::write(&path, config.to_json_string().unwrap()).unwrap();
        let loaded = MaddpgConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
