use serde::{Deserialize, Serialize};

/// Audit of a persisted model against freshly harvested data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean squared error over the fresh validation split.
    pub validation_loss: f32,
    pub parameter_count: usize,
    /// Examples in the validation split the model was scored on.
    pub example_count: usize,
}
