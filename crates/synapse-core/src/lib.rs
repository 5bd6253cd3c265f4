//! # synapse-core
//!
//! Foundation crate for the Synapse attention graph engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod link;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{AttentionConfig, PredictorConfig, TrainingConfig};
pub use errors::{SynapseError, SynapseResult};
pub use link::{AttentionLink, Concept, LinkType};
