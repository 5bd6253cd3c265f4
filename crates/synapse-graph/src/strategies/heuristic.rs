//! The fixed-increment Hebbian fallback.

use synapse_core::constants::HEBBIAN_INCREMENT;
use synapse_core::errors::SynapseResult;
use synapse_core::link::{AttentionLink, Concept, LinkType};
use synapse_core::traits::{ILinkStrategy, LinkDecision};

/// Each co-occurrence adds a fixed increment, saturating at 1.0.
/// Always available; cannot fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicStrategy;

impl ILinkStrategy for HeuristicStrategy {
    fn update_link(
        &self,
        _concept_a: &Concept,
        _concept_b: &Concept,
        existing: Option<&AttentionLink>,
    ) -> SynapseResult<LinkDecision> {
        let strength = match existing {
            Some(link) => (link.strength + HEBBIAN_INCREMENT).min(1.0),
            None => HEBBIAN_INCREMENT,
        };
        Ok(LinkDecision {
            strength,
            link_type: LinkType::Hebbian,
        })
    }
}
