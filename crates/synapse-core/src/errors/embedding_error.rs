/// Embedding and vocabulary errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("empty vocabulary: cannot encode without a built vocabulary")]
    EmptyVocabulary,
}
