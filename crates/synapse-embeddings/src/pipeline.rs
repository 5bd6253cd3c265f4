//! Training-data pipeline: link history → supervised examples.
//!
//! Examples are recomputed fresh on every invocation. Every link above the
//! strength floor yields exactly one example; concepts without descriptions
//! contribute zero vectors rather than being skipped.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

use synapse_core::constants::STRENGTH_FLOOR;
use synapse_core::errors::SynapseResult;
use synapse_core::link::{AttentionLink, Concept};
use synapse_core::models::TrainingExample;
use synapse_core::traits::IAttentionStore;

use crate::encoder::Encoder;
use crate::vocabulary::Vocabulary;

/// Pipeline output: the examples plus the vocabulary they were encoded
/// with. The vocabulary travels with the model artifact from here on.
#[derive(Debug, Clone)]
pub struct ExtractedData {
    pub examples: Vec<TrainingExample>,
    pub vocabulary: Vocabulary,
}

/// Harvest training examples for a tenant.
///
/// First pass builds the vocabulary over all retrieved descriptions;
/// second pass encodes each link into one example.
pub fn extract_training_data<S>(store: &S, tenant_id: &str) -> SynapseResult<ExtractedData>
where
    S: IAttentionStore + ?Sized,
{
    let resolved = resolve_links(store, tenant_id)?;

    let vocabulary = Vocabulary::build(
        resolved
            .iter()
            .flat_map(|(_, a, b)| [a.description_text(), b.description_text()]),
    );

    let encoder = Encoder::new(vocabulary.clone());
    let examples = encode_resolved(&resolved, &encoder);

    info!(
        tenant_id = %tenant_id,
        examples = examples.len(),
        vocabulary_terms = vocabulary.len(),
        "training data extracted"
    );

    Ok(ExtractedData {
        examples,
        vocabulary,
    })
}

/// Re-encode a tenant's current links with a frozen vocabulary.
///
/// Used when auditing a persisted model: encoding must match what the
/// model saw at training time, not a vocabulary rebuilt from today's data.
pub fn extract_with_vocabulary<S>(
    store: &S,
    tenant_id: &str,
    vocabulary: &Vocabulary,
) -> SynapseResult<Vec<TrainingExample>>
where
    S: IAttentionStore + ?Sized,
{
    let resolved = resolve_links(store, tenant_id)?;
    let encoder = Encoder::new(vocabulary.clone());
    Ok(encode_resolved(&resolved, &encoder))
}

/// Deterministically partition examples into (train, validation).
///
/// Same seed, same input order ⇒ same split.
pub fn train_test_split(
    mut examples: Vec<TrainingExample>,
    ratio: f64,
    seed: u64,
) -> (Vec<TrainingExample>, Vec<TrainingExample>) {
    let mut rng = StdRng::seed_from_u64(seed);
    examples.shuffle(&mut rng);
    let test_len = ((examples.len() as f64) * ratio).round() as usize;
    let split_at = examples.len() - test_len;
    let test = examples.split_off(split_at);
    (examples, test)
}

fn resolve_links<S>(
    store: &S,
    tenant_id: &str,
) -> SynapseResult<Vec<(AttentionLink, Concept, Concept)>>
where
    S: IAttentionStore + ?Sized,
{
    let links = store.get_links(tenant_id, STRENGTH_FLOOR)?;
    let mut resolved = Vec::with_capacity(links.len());
    for link in links {
        let a = store
            .get_concept(tenant_id, &link.concept_a)?
            .unwrap_or_else(|| Concept::new(link.concept_a.clone(), None));
        let b = store
            .get_concept(tenant_id, &link.concept_b)?
            .unwrap_or_else(|| Concept::new(link.concept_b.clone(), None));
        resolved.push((link, a, b));
    }
    Ok(resolved)
}

fn encode_resolved(
    resolved: &[(AttentionLink, Concept, Concept)],
    encoder: &Encoder,
) -> Vec<TrainingExample> {
    resolved
        .par_iter()
        .map(|(link, a, b)| TrainingExample {
            concept_a_embedding: encoder.encode_concept(a),
            concept_b_embedding: encoder.encode_concept(b),
            context_embedding: encoder.encode_context(a, b, Some(link.link_type)),
            target_strength: link.strength,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::models::TrainingExample;

    fn example(target: f32) -> TrainingExample {
        TrainingExample {
            concept_a_embedding: vec![target; 4],
            concept_b_embedding: vec![target; 4],
            context_embedding: vec![target; 2],
            target_strength: target,
        }
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let examples: Vec<_> = (0..20).map(|i| example(i as f32 / 20.0)).collect();
        let (train_a, test_a) = train_test_split(examples.clone(), 0.2, 7);
        let (train_b, test_b) = train_test_split(examples, 0.2, 7);
        assert_eq!(
            train_a.iter().map(|e| e.target_strength).collect::<Vec<_>>(),
            train_b.iter().map(|e| e.target_strength).collect::<Vec<_>>()
        );
        assert_eq!(test_a.len(), test_b.len());
        assert_eq!(test_a.len(), 4);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let examples: Vec<_> = (0..20).map(|i| example(i as f32 / 20.0)).collect();
        let (train_a, _) = train_test_split(examples.clone(), 0.2, 1);
        let (train_b, _) = train_test_split(examples, 0.2, 2);
        let a: Vec<_> = train_a.iter().map(|e| e.target_strength).collect();
        let b: Vec<_> = train_b.iter().map(|e| e.target_strength).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn split_of_empty_is_empty() {
        let (train, test) = train_test_split(Vec::new(), 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
