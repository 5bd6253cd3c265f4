use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::constants;
use crate::errors::{ModelError, SynapseResult};

/// Structural configuration of the link-strength predictor.
///
/// Serialized into the model artifact; an artifact can only be loaded into
/// a predictor built from the same structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Dimensionality of each concept embedding.
    pub concept_dim: usize,
    /// Dimensionality of the context embedding.
    pub context_dim: usize,
    /// Number of self-attention heads. Must divide the concatenated
    /// input width (`2 * concept_dim + context_dim`).
    pub head_count: usize,
    /// Width of the first feed-forward layer; the second is half of it.
    pub hidden_dim: usize,
    /// Dropout rate applied between feed-forward layers during training.
    pub dropout: f32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            concept_dim: constants::CONCEPT_DIM,
            context_dim: constants::CONTEXT_DIM,
            head_count: defaults::DEFAULT_HEAD_COUNT,
            hidden_dim: defaults::DEFAULT_HIDDEN_DIM,
            dropout: defaults::DEFAULT_DROPOUT,
        }
    }
}

impl PredictorConfig {
    /// Width of the concatenated input vector.
    pub fn input_dim(&self) -> usize {
        2 * self.concept_dim + self.context_dim
    }

    /// Per-head slice width.
    pub fn head_dim(&self) -> usize {
        self.input_dim() / self.head_count
    }

    /// Width of the second feed-forward layer.
    pub fn reduced_dim(&self) -> usize {
        (self.hidden_dim / 2).max(1)
    }

    /// Reject structurally invalid configurations.
    pub fn validate(&self) -> SynapseResult<()> {
        if self.head_count == 0 || self.input_dim() % self.head_count != 0 {
            return Err(ModelError::IncompatibleConfig {
                reason: format!(
                    "head_count {} does not divide input width {}",
                    self.head_count,
                    self.input_dim()
                ),
            }
            .into());
        }
        if self.hidden_dim == 0 {
            return Err(ModelError::IncompatibleConfig {
                reason: "hidden_dim must be nonzero".to_string(),
            }
            .into());
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(ModelError::IncompatibleConfig {
                reason: format!("dropout {} outside [0, 1)", self.dropout),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = PredictorConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.input_dim(), 160);
        assert_eq!(cfg.head_dim(), 40);
        assert_eq!(cfg.reduced_dim(), 32);
    }

    #[test]
    fn rejects_nondividing_head_count() {
        let cfg = PredictorConfig {
            head_count: 3,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unit_dropout() {
        let cfg = PredictorConfig {
            dropout: 1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
