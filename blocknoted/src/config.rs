//! # Daemon Configuration
//!
//! JSON configuration file. Every field is optional:
//!
//! ```text
//! {
//!     "parallel_threshold": 1000,
//!     "workers": 4,
//!     "log_level": "debug",
//!     "max_steps": 0
//! }
//! ```

use rich_text::MergeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Run count at which normalization goes parallel
    pub parallel_threshold: usize,
    /// Worker count for parallel normalization
    pub workers: usize,
    /// Log filter, e.g. `info` or `services_blocknote=debug`
    pub log_level: Option<String>,
    /// Maximum requests to replay (0 = unlimited)
    pub max_steps: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        let merge = MergeConfig::default();
        Self {
            parallel_threshold: merge.parallel_threshold,
            workers: merge.workers,
            log_level: None,
            max_steps: 0,
        }
    }
}

impl DaemonConfig {
    /// Loads a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses a config from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalizer tuning handed to the text drivers
    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig::new(self.parallel_threshold, self.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_matches_merge_defaults() {
        let config = DaemonConfig::default();
        assert_eq!(config.merge_config(), MergeConfig::default());
        assert_eq!(config.log_level, None);
        assert_eq!(config.max_steps, 0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = DaemonConfig::from_json(r#"{"workers": 2}"#).unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(
            config.parallel_threshold,
            DaemonConfig::default().parallel_threshold
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"parallel_threshold": 16, "workers": 3, "log_level": "debug"}}"#
        )
        .unwrap();

        let config = DaemonConfig::load(file.path()).unwrap();
        assert_eq!(config.merge_config(), MergeConfig::new(16, 3));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_files() {
        assert!(matches!(
            DaemonConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DaemonConfig::from_json(r#"{"workers": 0}"#),
            Err(ConfigError::InvalidValue(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DaemonConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
