//! Shared fixtures for Synapse tests: a HashMap-backed store and
//! deterministic synthetic graph builders.

use std::collections::HashMap;
use std::sync::Mutex;

use synapse_core::errors::SynapseResult;
use synapse_core::link::{canonical_pair, AttentionLink, Concept, LinkType};
use synapse_core::models::LinkTypeStats;
use synapse_core::traits::IAttentionStore;

/// In-memory `IAttentionStore` for unit tests.
#[derive(Default)]
pub struct MemoryStore {
    concepts: Mutex<HashMap<(String, String), Concept>>,
    links: Mutex<HashMap<(String, String, String), AttentionLink>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total links across all tenants.
    pub fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

impl IAttentionStore for MemoryStore {
    fn put_concept(&self, tenant_id: &str, concept: &Concept) -> SynapseResult<()> {
        self.concepts
            .lock()
            .unwrap()
            .insert((concept.name.clone(), tenant_id.to_string()), concept.clone());
        Ok(())
    }

    fn get_concept(&self, tenant_id: &str, name: &str) -> SynapseResult<Option<Concept>> {
        Ok(self
            .concepts
            .lock()
            .unwrap()
            .get(&(name.to_string(), tenant_id.to_string()))
            .cloned())
    }

    fn get_link(&self, tenant_id: &str, a: &str, b: &str) -> SynapseResult<Option<AttentionLink>> {
        let (a, b) = canonical_pair(a.to_string(), b.to_string());
        Ok(self
            .links
            .lock()
            .unwrap()
            .get(&(a, b, tenant_id.to_string()))
            .cloned())
    }

    fn get_links(&self, tenant_id: &str, min_strength: f32) -> SynapseResult<Vec<AttentionLink>> {
        let mut links: Vec<AttentionLink> = self
            .links
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.tenant_id == tenant_id && l.strength > min_strength)
            .cloned()
            .collect();
        links.sort_by(|x, y| x.key().cmp(&y.key()));
        Ok(links)
    }

    fn upsert_link(&self, link: &AttentionLink) -> SynapseResult<()> {
        self.links.lock().unwrap().insert(
            (
                link.concept_a.clone(),
                link.concept_b.clone(),
                link.tenant_id.clone(),
            ),
            link.clone(),
        );
        Ok(())
    }

    fn apply_updates(&self, links: &[AttentionLink]) -> SynapseResult<()> {
        for link in links {
            self.upsert_link(link)?;
        }
        Ok(())
    }

    fn link_type_stats(&self, tenant_id: &str) -> SynapseResult<Vec<LinkTypeStats>> {
        let links = self.links.lock().unwrap();
        let mut stats: Vec<LinkTypeStats> = Vec::new();
        for link_type in [LinkType::Hebbian, LinkType::Neural] {
            let strengths: Vec<f32> = links
                .values()
                .filter(|l| l.tenant_id == tenant_id && l.link_type == link_type)
                .map(|l| l.strength)
                .collect();
            if strengths.is_empty() {
                continue;
            }
            stats.push(LinkTypeStats {
                link_type,
                count: strengths.len(),
                avg_strength: strengths.iter().sum::<f32>() / strengths.len() as f32,
                max_strength: strengths.iter().cloned().fold(0.0, f32::max),
            });
        }
        Ok(stats)
    }
}

/// Word pool used to give synthetic concepts realistic descriptions.
const WORDS: &[&str] = &[
    "memory", "graph", "ownership", "borrow", "async", "channel", "lifetime", "trait", "macro",
    "cursor", "index", "schema", "vector", "tensor", "kernel", "socket", "buffer", "stream",
    "parser", "lexer",
];

/// Build a concept with a small deterministic description.
pub fn synthetic_concept(i: usize) -> Concept {
    let description = format!(
        "{} {} {}",
        WORDS[i % WORDS.len()],
        WORDS[(i * 3 + 1) % WORDS.len()],
        WORDS[(i * 7 + 2) % WORDS.len()],
    );
    Concept::new(format!("concept-{i:03}"), Some(description))
}

/// Seed `n` links between distinct concept pairs with strengths spread
/// evenly over `(0.1, 1.0]`, all above the training floor.
pub fn seed_synthetic_links<S: IAttentionStore>(
    store: &S,
    tenant_id: &str,
    n: usize,
) -> SynapseResult<()> {
    for i in 0..n {
        let a = synthetic_concept(2 * i);
        let b = synthetic_concept(2 * i + 1);
        store.put_concept(tenant_id, &a)?;
        store.put_concept(tenant_id, &b)?;

        let strength = 0.1 + 0.9 * ((i + 1) as f32 / n as f32);
        let link_type = if i % 2 == 0 {
            LinkType::Hebbian
        } else {
            LinkType::Neural
        };
        store.upsert_link(&AttentionLink::new(
            a.name, b.name, tenant_id, strength, link_type,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_links_all_clear_the_floor() {
        let store = MemoryStore::new();
        seed_synthetic_links(&store, "t1", 60).unwrap();
        assert_eq!(store.get_links("t1", 0.1).unwrap().len(), 60);
    }

    #[test]
    fn seeded_pairs_are_distinct() {
        let store = MemoryStore::new();
        seed_synthetic_links(&store, "t1", 10).unwrap();
        assert_eq!(store.link_count(), 10);
    }
}
