//! # synapse-embeddings
//!
//! Turns persisted concept text and link history into fixed-width numeric
//! vectors and supervised training examples. Everything here is local and
//! deterministic: the same corpus always yields the same vocabulary, and
//! the same text plus the same vocabulary always yields bit-identical
//! vectors.

pub mod cache;
pub mod encoder;
pub mod pipeline;
pub mod vocabulary;

pub use cache::EmbeddingCache;
pub use encoder::Encoder;
pub use pipeline::{
    extract_training_data, extract_with_vocabulary, train_test_split, ExtractedData,
};
pub use vocabulary::Vocabulary;
