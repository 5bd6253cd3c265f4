//! AttentionGraphUpdater — the per-learning-event entry point.

use std::collections::HashSet;

use tracing::{info, warn};

use synapse_core::config::AttentionConfig;
use synapse_core::errors::SynapseResult;
use synapse_core::link::{canonical_pair, AttentionLink, Concept};
use synapse_core::models::{AttentionStats, UpdateSummary};
use synapse_core::traits::{IAttentionStore, ILinkPredictor, ILinkStrategy};
use synapse_embeddings::Vocabulary;
use synapse_model::load_artifact;

use crate::strategies::{HeuristicStrategy, NeuralStrategy};

/// Updates the attention graph once per learning event.
///
/// The neural/Hebbian choice is made once, at construction: a model that
/// fails to load (with fallback enabled) leaves the updater in Hebbian
/// mode for its whole lifetime. Recovering requires constructing a new
/// updater against a fresh artifact. A failing prediction falls back to
/// the Hebbian rule for that one pair only.
pub struct AttentionGraphUpdater<S: IAttentionStore> {
    store: S,
    neural: Option<NeuralStrategy>,
    heuristic: HeuristicStrategy,
    model_loaded: bool,
    enabled: bool,
}

impl<S: IAttentionStore> AttentionGraphUpdater<S> {
    /// Build an updater, loading the model artifact named by the config.
    ///
    /// Load failures disable the neural path when
    /// `fallback_to_heuristic` is set (the production default) and are
    /// surfaced as errors otherwise.
    pub fn new(store: S, config: AttentionConfig) -> SynapseResult<Self> {
        let neural = match config.model_path.as_deref().filter(|_| config.enabled) {
            Some(path) => match load_artifact(path) {
                Ok((model, vocabulary)) => {
                    info!(
                        path = %path.display(),
                        parameters = model.count_parameters(),
                        "model loaded, updater in neural mode"
                    );
                    Some(NeuralStrategy::new(Box::new(model), vocabulary))
                }
                Err(error) if config.fallback_to_heuristic => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "model load failed, updater in hebbian mode"
                    );
                    None
                }
                Err(error) => return Err(error),
            },
            None => None,
        };

        let model_loaded = neural.is_some();
        Ok(Self {
            store,
            neural,
            heuristic: HeuristicStrategy,
            model_loaded,
            enabled: config.enabled,
        })
    }

    /// Build an updater around an already-loaded predictor.
    pub fn with_predictor(
        store: S,
        predictor: Box<dyn ILinkPredictor>,
        vocabulary: Vocabulary,
    ) -> Self {
        Self {
            store,
            neural: Some(NeuralStrategy::new(predictor, vocabulary)),
            heuristic: HeuristicStrategy,
            model_loaded: true,
            enabled: true,
        }
    }

    /// Build a Hebbian-only updater.
    pub fn heuristic_only(store: S) -> Self {
        Self {
            store,
            neural: None,
            heuristic: HeuristicStrategy,
            model_loaded: false,
            enabled: true,
        }
    }

    /// Whether the neural path is active.
    pub fn using_neural(&self) -> bool {
        self.enabled && self.neural.is_some()
    }

    /// Strengthen the links between a newly learned concept and its
    /// co-occurring context concepts. All upserts for the event commit as
    /// one unit; the event is processed only once that commit succeeds.
    pub fn update_attention_graph(
        &self,
        tenant_id: &str,
        concept: &str,
        context_concepts: &[String],
    ) -> SynapseResult<UpdateSummary> {
        let mut summary = UpdateSummary::default();
        let mut updates: Vec<AttentionLink> = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        let learned = self.resolve_concept(tenant_id, concept)?;

        for context_name in context_concepts {
            if context_name == concept {
                continue;
            }
            let key = canonical_pair(concept.to_string(), context_name.clone());
            if !seen.insert(key) {
                continue;
            }

            let context = self.resolve_concept(tenant_id, context_name)?;
            let existing = self.store.get_link(tenant_id, concept, context_name)?;

            let decision = match &self.neural {
                Some(neural) => {
                    match neural.update_link(&learned, &context, existing.as_ref()) {
                        Ok(decision) => {
                            summary.neural_updates += 1;
                            decision
                        }
                        Err(error) => {
                            // This pair only; the event and its remaining
                            // pairs stay on the fast path.
                            warn!(
                                concept_a = %concept,
                                concept_b = %context_name,
                                error = %error,
                                "prediction failed, hebbian fallback for this pair"
                            );
                            summary.fallbacks += 1;
                            summary.heuristic_updates += 1;
                            self.heuristic
                                .update_link(&learned, &context, existing.as_ref())?
                        }
                    }
                }
                None => {
                    summary.heuristic_updates += 1;
                    self.heuristic
                        .update_link(&learned, &context, existing.as_ref())?
                }
            };

            updates.push(AttentionLink::new(
                concept,
                context_name.as_str(),
                tenant_id,
                decision.strength,
                decision.link_type,
            ));
        }

        self.store.apply_updates(&updates)?;
        summary.pairs_updated = updates.len();
        Ok(summary)
    }

    /// Per-link-type aggregates plus the updater's mode flags.
    pub fn get_attention_stats(&self, tenant_id: &str) -> SynapseResult<AttentionStats> {
        Ok(AttentionStats {
            by_type: self.store.link_type_stats(tenant_id)?,
            using_neural: self.using_neural(),
            model_loaded: self.model_loaded,
        })
    }

    fn resolve_concept(&self, tenant_id: &str, name: &str) -> SynapseResult<Concept> {
        Ok(self
            .store
            .get_concept(tenant_id, name)?
            .unwrap_or_else(|| Concept::new(name, None)))
    }
}
