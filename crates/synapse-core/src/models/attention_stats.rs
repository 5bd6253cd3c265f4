use serde::{Deserialize, Serialize};

use crate::link::LinkType;

/// Aggregates for one link type within a tenant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinkTypeStats {
    pub link_type: LinkType,
    pub count: usize,
    pub avg_strength: f32,
    pub max_strength: f32,
}

/// Diagnostic snapshot of a tenant's attention graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionStats {
    pub by_type: Vec<LinkTypeStats>,
    /// Whether the updater is currently in neural mode.
    pub using_neural: bool,
    /// Whether a model artifact was loaded at construction.
    pub model_loaded: bool,
}
