use serde::{Deserialize, Serialize};

/// What one learning event did to the graph.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UpdateSummary {
    /// Distinct concept pairs upserted.
    pub pairs_updated: usize,
    /// Pairs scored by the predictor.
    pub neural_updates: usize,
    /// Pairs scored by the Hebbian rule.
    pub heuristic_updates: usize,
    /// Pairs that fell back from neural to Hebbian mid-event.
    pub fallbacks: usize,
}
