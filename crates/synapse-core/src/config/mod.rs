//! Per-subsystem configuration, loadable from TOML.

pub mod defaults;

mod attention_config;
mod predictor_config;
mod training_config;

pub use attention_config::AttentionConfig;
pub use predictor_config::PredictorConfig;
pub use training_config::TrainingConfig;
