//! The learned strategy: frozen vocabulary encoding + predictor inference.

use synapse_core::errors::SynapseResult;
use synapse_core::link::{AttentionLink, Concept, LinkType};
use synapse_core::traits::{ILinkPredictor, ILinkStrategy, LinkDecision};
use synapse_embeddings::{Encoder, Vocabulary};

/// Concept embeddings cached across learning events.
const EMBEDDING_CACHE_ENTRIES: u64 = 4096;

/// Scores pairs with an injected predictor.
///
/// The encoder carries the vocabulary the model was trained with, so
/// inference-time encoding matches training-time encoding exactly.
pub struct NeuralStrategy {
    predictor: Box<dyn ILinkPredictor>,
    encoder: Encoder,
}

impl NeuralStrategy {
    pub fn new(predictor: Box<dyn ILinkPredictor>, vocabulary: Vocabulary) -> Self {
        Self {
            predictor,
            encoder: Encoder::new(vocabulary).with_cache(EMBEDDING_CACHE_ENTRIES),
        }
    }
}

impl ILinkStrategy for NeuralStrategy {
    fn update_link(
        &self,
        concept_a: &Concept,
        concept_b: &Concept,
        existing: Option<&AttentionLink>,
    ) -> SynapseResult<LinkDecision> {
        let a_embedding = self.encoder.encode_concept(concept_a);
        let b_embedding = self.encoder.encode_concept(concept_b);
        let context =
            self.encoder
                .encode_context(concept_a, concept_b, existing.map(|l| l.link_type));
        let strength = self
            .predictor
            .predict_strength(&a_embedding, &b_embedding, &context)?;
        Ok(LinkDecision {
            strength,
            link_type: LinkType::Neural,
        })
    }
}
