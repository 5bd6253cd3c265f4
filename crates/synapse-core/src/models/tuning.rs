use serde::{Deserialize, Serialize};

/// One sampled hyperparameter combination and its outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrialResult {
    pub learning_rate: f32,
    pub batch_size: usize,
    pub head_count: usize,
    pub hidden_dim: usize,
    pub validation_loss: f32,
}

/// Summary of a hyperparameter search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningReport {
    /// Best configuration seen across all successful trials.
    pub best: TrialResult,
    pub trials_run: usize,
    pub trials_failed: usize,
}
