//! # synapse-storage
//!
//! SQLite persistence for concepts and attention links. Implements
//! `IAttentionStore` from synapse-core. Upsert atomicity for the canonical
//! `(concept_a, concept_b, tenant_id)` key comes from the table's primary
//! key plus `ON CONFLICT DO UPDATE`.

pub mod engine;
pub mod migrations;
pub mod queries;

pub use engine::AttentionStore;

use synapse_core::errors::{StorageError, SynapseError};

/// Wrap a SQLite failure message in the workspace error type.
pub(crate) fn to_storage_err(message: String) -> SynapseError {
    StorageError::SqliteError { message }.into()
}
