use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Trainer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    /// Consecutive non-improving epochs tolerated before stopping early.
    pub patience: usize,
    /// Fraction of examples held out for validation.
    pub validation_ratio: f64,
    /// Seed for splits, shuffles, weight init, and dropout.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: defaults::DEFAULT_EPOCHS,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            patience: defaults::DEFAULT_PATIENCE,
            validation_ratio: defaults::DEFAULT_VALIDATION_RATIO,
            seed: defaults::DEFAULT_SEED,
        }
    }
}

impl TrainingConfig {
    /// Abbreviated copy used for hyperparameter-search trials.
    pub fn abbreviated(&self, epochs: usize, patience: usize) -> Self {
        Self {
            epochs,
            patience,
            ..self.clone()
        }
    }
}
