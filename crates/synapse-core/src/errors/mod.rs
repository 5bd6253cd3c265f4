//! Error taxonomy for the Synapse workspace.
//!
//! One enum per subsystem; `SynapseError` is the workspace-wide union.

mod config_error;
mod embedding_error;
mod model_error;
mod storage_error;
mod training_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use model_error::ModelError;
pub use storage_error::StorageError;
pub use training_error::TrainingError;

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum SynapseError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Workspace-wide result alias.
pub type SynapseResult<T> = Result<T, SynapseError>;
