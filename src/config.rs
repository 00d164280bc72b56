use std::path::Path;

use crate::ai::{ReplayConfig, TdConfig};
use crate::error::ConfigError;
use crate::training::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub td: TdConfig,
    pub replay: ReplayConfig,
    pub training: TrainerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            td: TdConfig::default(),
            replay: ReplayConfig::default(),
            training: TrainerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.td.epsilon) {
            return Err(ConfigError::Validation(
                "td.epsilon must be in [0, 1]".into(),
            ));
        }
        if self.td.alpha <= 0.0 {
            return Err(ConfigError::Validation("td.alpha must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.replay.epsilon) {
            return Err(ConfigError::Validation(
                "replay.epsilon must be in [0, 1]".into(),
            ));
        }
        if self.replay.alpha <= 0.0 {
            return Err(ConfigError::Validation("replay.alpha must be > 0".into()));
        }
        if self.replay.capacity == 0 {
            return Err(ConfigError::Validation(
                "replay.capacity must be > 0".into(),
            ));
        }
        if self.replay.episode_size == 0 {
            return Err(ConfigError::Validation(
                "replay.episode_size must be > 0".into(),
            ));
        }
        if self.replay.learn_interval == 0 {
            return Err(ConfigError::Validation(
                "replay.learn_interval must be > 0".into(),
            ));
        }
        if self.training.num_matches == 0 {
            return Err(ConfigError::Validation(
                "training.num_matches must be > 0".into(),
            ));
        }
        Ok(())
    }
}
