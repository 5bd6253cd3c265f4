/// Trainer and hyperparameter-search errors.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("insufficient training data: found {found} examples, {required} required")]
    InsufficientData { found: usize, required: usize },

    #[error("hyperparameter trial failed: {reason}")]
    TrialFailed { reason: String },

    #[error("no viable configuration found after {trials} trials")]
    NoViableConfiguration { trials: usize },

    #[error("empty {split} split: cannot train on zero examples")]
    EmptySplit { split: String },
}
