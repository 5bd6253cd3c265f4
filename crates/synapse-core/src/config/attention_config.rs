use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{ConfigError, SynapseResult};

/// Runtime updater configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    /// Master switch for the neural path. When false the updater always
    /// runs the Hebbian rule.
    pub enabled: bool,
    /// Where the trained model artifact lives.
    pub model_path: Option<PathBuf>,
    /// Fall back to the Hebbian rule when the model cannot be loaded.
    /// Should always be true in production.
    pub fallback_to_heuristic: bool,
    /// Allow scheduled training runs.
    pub auto_train: bool,
    /// Minimum examples before any training run proceeds.
    pub min_training_examples: usize,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_path: None,
            fallback_to_heuristic: true,
            auto_train: false,
            min_training_examples: constants::MIN_TRAINING_EXAMPLES,
        }
    }
}

impl AttentionConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> SynapseResult<Self> {
        toml::from_str(text).map_err(|e| {
            ConfigError::ParseFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> SynapseResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_production_safe() {
        let cfg = AttentionConfig::default();
        assert!(cfg.fallback_to_heuristic);
        assert_eq!(cfg.min_training_examples, 50);
        assert!(cfg.model_path.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = AttentionConfig::from_toml_str(
            r#"
            enabled = false
            model_path = "/var/lib/synapse/model.json"
            "#,
        )
        .unwrap();
        assert!(!cfg.enabled);
        assert_eq!(
            cfg.model_path.as_deref(),
            Some(Path::new("/var/lib/synapse/model.json"))
        );
        // Unspecified fields keep their defaults.
        assert!(cfg.fallback_to_heuristic);
    }
}
