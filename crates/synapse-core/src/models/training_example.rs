use serde::{Deserialize, Serialize};

/// One supervised example harvested from the link history.
///
/// Ephemeral: recomputed fresh on every pipeline invocation, never
/// persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    pub concept_a_embedding: Vec<f32>,
    pub concept_b_embedding: Vec<f32>,
    pub context_embedding: Vec<f32>,
    /// The observed link strength this example should reproduce.
    pub target_strength: f32,
}

impl TrainingExample {
    /// Concatenate the three input vectors into the predictor's input.
    pub fn input_vector(&self) -> Vec<f32> {
        let mut x = Vec::with_capacity(
            self.concept_a_embedding.len()
                + self.concept_b_embedding.len()
                + self.context_embedding.len(),
        );
        x.extend_from_slice(&self.concept_a_embedding);
        x.extend_from_slice(&self.concept_b_embedding);
        x.extend_from_slice(&self.context_embedding);
        x
    }
}
