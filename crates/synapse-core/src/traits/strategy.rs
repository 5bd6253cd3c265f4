use crate::errors::SynapseResult;
use crate::link::{AttentionLink, Concept, LinkType};

/// The strength and tag a strategy decided for one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkDecision {
    pub strength: f32,
    pub link_type: LinkType,
}

/// One way of scoring a co-occurring concept pair.
///
/// Two implementations exist: the neural strategy (learned predictor) and
/// the Hebbian strategy (fixed increment). The updater selects one at
/// construction and swaps to the Hebbian rule per call on failure.
pub trait ILinkStrategy: Send + Sync {
    fn update_link(
        &self,
        concept_a: &Concept,
        concept_b: &Concept,
        existing: Option<&AttentionLink>,
    ) -> SynapseResult<LinkDecision>;
}
