use serde::{Deserialize, Serialize};

/// Outcome of the training readiness gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingReadiness {
    /// Whether enough examples exist to train.
    pub ready: bool,
    /// Examples currently available.
    pub example_count: usize,
    /// Examples required before training may proceed.
    pub required: usize,
}
