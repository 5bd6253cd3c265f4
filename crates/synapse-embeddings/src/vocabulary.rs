//! Term-frequency vocabulary built once per pipeline run.
//!
//! Terms are ranked by corpus frequency (ties broken lexicographically) and
//! mapped to buckets by rank. Terms unseen at build time hash into buckets
//! with FNV-1a, so inference-time text never fails to encode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A frozen term ranking. Persisted inside the model artifact so
/// inference-time encoding matches training-time encoding exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    ranks: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a corpus of description texts.
    pub fn build<'a, I>(corpus: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for text in corpus {
            for term in tokenize(text) {
                *counts.entry(term).or_default() += 1;
            }
        }

        // Rank by descending frequency, lexicographic tiebreak, so the
        // same corpus always produces the same ranking.
        let mut terms: Vec<(String, u64)> = counts.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let ranks = terms
            .into_iter()
            .enumerate()
            .map(|(rank, (term, _))| (term, rank))
            .collect();
        Self { ranks }
    }

    /// Bucket index for a term at the given dimensionality.
    pub fn bucket(&self, term: &str, dims: usize) -> usize {
        match self.ranks.get(term) {
            Some(rank) => rank % dims,
            None => hash_term(term, dims),
        }
    }

    /// Number of known terms.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Tokenize text into lowercase alphanumeric terms.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() >= 2)
        .map(|s| s.to_lowercase())
        .collect()
}

/// Hash a term into a bucket index using FNV-1a.
fn hash_term(term: &str, dims: usize) -> usize {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in term.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    (h as usize) % dims
}
