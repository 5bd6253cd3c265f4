use serde::{Deserialize, Serialize};

/// Summary of one completed training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Epochs actually executed (≤ configured epochs when stopped early).
    pub epochs_run: usize,
    /// Best validation loss observed across all epochs.
    pub best_validation_loss: f32,
    /// Final training loss at the epoch training stopped.
    pub final_train_loss: f32,
    /// Whether early stopping fired before the epoch budget ran out.
    pub stopped_early: bool,
    /// Examples the run trained on (train + validation).
    pub example_count: usize,
    /// Trainable parameters in the saved model.
    pub parameter_count: usize,
}
