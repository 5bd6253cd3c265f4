//! Deterministic text → vector encoders.
//!
//! Concept descriptions encode into `concept_dim` buckets of L2-normalized
//! term frequency; the context vector combines both descriptions into the
//! leading buckets and reserves the trailing two dimensions for a one-hot
//! of the prior link's type.

use synapse_core::constants::{CONCEPT_DIM, CONTEXT_DIM, LINK_TYPE_DIMS};
use synapse_core::link::{Concept, LinkType};

use crate::cache::EmbeddingCache;
use crate::vocabulary::{tokenize, Vocabulary};

/// Encoder over a frozen vocabulary.
pub struct Encoder {
    vocabulary: Vocabulary,
    concept_dim: usize,
    context_dim: usize,
    cache: Option<EmbeddingCache>,
}

impl Encoder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            concept_dim: CONCEPT_DIM,
            context_dim: CONTEXT_DIM,
            cache: None,
        }
    }

    /// Attach a cache for hot-path concept encoding.
    pub fn with_cache(mut self, max_entries: u64) -> Self {
        self.cache = Some(EmbeddingCache::new(max_entries));
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn concept_dim(&self) -> usize {
        self.concept_dim
    }

    pub fn context_dim(&self) -> usize {
        self.context_dim
    }

    /// Encode a concept's description. Missing or empty descriptions map
    /// to the zero vector.
    pub fn encode_concept(&self, concept: &Concept) -> Vec<f32> {
        let text = concept.description_text();
        if let Some(cache) = &self.cache {
            let key = EmbeddingCache::key_for(text);
            if let Some(hit) = cache.get(&key) {
                return hit;
            }
            let vec = self.encode_text(text, self.concept_dim);
            cache.insert(key, vec.clone());
            return vec;
        }
        self.encode_text(text, self.concept_dim)
    }

    /// Encode the relationship context for a pair: both descriptions
    /// reduced into the leading buckets, prior link type one-hot in the
    /// trailing two dimensions (zeroes when the pair has no prior link).
    pub fn encode_context(
        &self,
        concept_a: &Concept,
        concept_b: &Concept,
        prior_link_type: Option<LinkType>,
    ) -> Vec<f32> {
        let text_dims = self.context_dim - LINK_TYPE_DIMS;
        let combined = format!(
            "{} {}",
            concept_a.description_text(),
            concept_b.description_text()
        );
        let mut vec = self.encode_text(&combined, text_dims);
        vec.resize(self.context_dim, 0.0);
        match prior_link_type {
            Some(LinkType::Hebbian) => vec[text_dims] = 1.0,
            Some(LinkType::Neural) => vec[text_dims + 1] = 1.0,
            None => {}
        }
        vec
    }

    /// Core term-frequency encoding into `dims` buckets, L2-normalized.
    fn encode_text(&self, text: &str, dims: usize) -> Vec<f32> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; dims];
        }

        let total = tokens.len() as f32;
        let mut vec = vec![0.0f32; dims];
        for token in &tokens {
            let bucket = self.vocabulary.bucket(token, dims);
            vec[bucket] += 1.0 / total;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder_for(corpus: &[&str]) -> Encoder {
        Encoder::new(Vocabulary::build(corpus.iter().copied()))
    }

    #[test]
    fn missing_description_encodes_to_zero_vector() {
        let enc = encoder_for(&["some corpus text"]);
        let vec = enc.encode_concept(&Concept::new("bare", None));
        assert_eq!(vec.len(), 64);
        assert!(vec.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn encoding_is_deterministic() {
        let enc = encoder_for(&["rust ownership borrowing"]);
        let concept = Concept::new("rust", Some("rust ownership borrowing".to_string()));
        assert_eq!(enc.encode_concept(&concept), enc.encode_concept(&concept));
    }

    #[test]
    fn concept_vector_is_unit_norm() {
        let enc = encoder_for(&["rust ownership borrowing model"]);
        let concept = Concept::new("rust", Some("ownership borrowing model".to_string()));
        let vec = enc.encode_concept(&concept);
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn cached_and_uncached_encodings_match() {
        let vocab = Vocabulary::build(["shared corpus text"]);
        let plain = Encoder::new(vocab.clone());
        let cached = Encoder::new(vocab).with_cache(16);
        let concept = Concept::new("c", Some("shared corpus".to_string()));
        assert_eq!(plain.encode_concept(&concept), cached.encode_concept(&concept));
        // Second read comes from the cache and must be identical.
        assert_eq!(plain.encode_concept(&concept), cached.encode_concept(&concept));
    }

    #[test]
    fn context_one_hot_tracks_prior_link_type() {
        let enc = encoder_for(&["alpha beta"]);
        let a = Concept::new("a", Some("alpha".to_string()));
        let b = Concept::new("b", Some("beta".to_string()));

        let none = enc.encode_context(&a, &b, None);
        let hebbian = enc.encode_context(&a, &b, Some(LinkType::Hebbian));
        let neural = enc.encode_context(&a, &b, Some(LinkType::Neural));

        assert_eq!(none.len(), 32);
        assert_eq!(&none[30..], &[0.0, 0.0]);
        assert_eq!(&hebbian[30..], &[1.0, 0.0]);
        assert_eq!(&neural[30..], &[0.0, 1.0]);
        // The text portion is unaffected by the tag.
        assert_eq!(&none[..30], &hebbian[..30]);
    }
}
