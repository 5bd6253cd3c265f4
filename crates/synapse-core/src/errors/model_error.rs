/// Predictor and model-artifact errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact missing at {path}")]
    ArtifactMissing { path: String },

    #[error("model artifact corrupt: {reason}")]
    ArtifactCorrupt { reason: String },

    #[error("incompatible model config: {reason}")]
    IncompatibleConfig { reason: String },

    #[error("parameter budget exceeded: {actual} trainable parameters, budget is {budget}")]
    ParameterBudgetExceeded { actual: usize, budget: usize },

    #[error("input dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("prediction failed: {reason}")]
    PredictionFailed { reason: String },
}
