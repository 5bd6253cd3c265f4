use crate::errors::SynapseResult;

/// A trained link-strength predictor.
///
/// Deterministic for a fixed parameter set and side-effect-free, so a
/// loaded instance may serve concurrent read-only inference.
pub trait ILinkPredictor: Send + Sync {
    /// Predict the strength of the link between two concepts, in `[0, 1]`.
    fn predict_strength(
        &self,
        concept_a_embedding: &[f32],
        concept_b_embedding: &[f32],
        context_embedding: &[f32],
    ) -> SynapseResult<f32>;

    /// Total trainable parameter count.
    fn count_parameters(&self) -> usize;
}
