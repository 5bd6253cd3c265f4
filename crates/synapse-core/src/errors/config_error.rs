/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },
}
