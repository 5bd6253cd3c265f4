use crate::errors::SynapseResult;
use crate::link::{AttentionLink, Concept};
use crate::models::LinkTypeStats;

/// Concept reads + link reads/writes against the persistent store.
///
/// The store guarantees upsert atomicity for the canonical
/// `(concept_a, concept_b, tenant_id)` key; this subsystem relies on that
/// but does not implement it.
pub trait IAttentionStore: Send + Sync {
    // --- Concepts ---
    fn put_concept(&self, tenant_id: &str, concept: &Concept) -> SynapseResult<()>;
    fn get_concept(&self, tenant_id: &str, name: &str) -> SynapseResult<Option<Concept>>;

    // --- Links ---
    /// Fetch one link by its (order-insensitive) endpoint pair.
    fn get_link(&self, tenant_id: &str, a: &str, b: &str) -> SynapseResult<Option<AttentionLink>>;
    /// All links for a tenant with `strength > min_strength`.
    fn get_links(&self, tenant_id: &str, min_strength: f32) -> SynapseResult<Vec<AttentionLink>>;
    fn upsert_link(&self, link: &AttentionLink) -> SynapseResult<()>;
    /// Upsert a batch of links in a single all-or-nothing transaction.
    fn apply_updates(&self, links: &[AttentionLink]) -> SynapseResult<()>;

    // --- Aggregation ---
    fn link_type_stats(&self, tenant_id: &str) -> SynapseResult<Vec<LinkTypeStats>>;
}

macro_rules! delegate_attention_store {
    ($ty:ty) => {
        impl<T: IAttentionStore + ?Sized> IAttentionStore for $ty {
            fn put_concept(&self, tenant_id: &str, concept: &Concept) -> SynapseResult<()> {
                (**self).put_concept(tenant_id, concept)
            }
            fn get_concept(&self, tenant_id: &str, name: &str) -> SynapseResult<Option<Concept>> {
                (**self).get_concept(tenant_id, name)
            }
            fn get_link(
                &self,
                tenant_id: &str,
                a: &str,
                b: &str,
            ) -> SynapseResult<Option<AttentionLink>> {
                (**self).get_link(tenant_id, a, b)
            }
            fn get_links(
                &self,
                tenant_id: &str,
                min_strength: f32,
            ) -> SynapseResult<Vec<AttentionLink>> {
                (**self).get_links(tenant_id, min_strength)
            }
            fn upsert_link(&self, link: &AttentionLink) -> SynapseResult<()> {
                (**self).upsert_link(link)
            }
            fn apply_updates(&self, links: &[AttentionLink]) -> SynapseResult<()> {
                (**self).apply_updates(links)
            }
            fn link_type_stats(&self, tenant_id: &str) -> SynapseResult<Vec<LinkTypeStats>> {
                (**self).link_type_stats(tenant_id)
            }
        }
    };
}

delegate_attention_store!(&T);
delegate_attention_store!(std::sync::Arc<T>);
