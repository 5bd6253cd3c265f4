//! Trainer — readiness gate, epoch loop with early stopping, artifact
//! persistence, and audit of deployed models.

use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use synapse_core::config::{AttentionConfig, PredictorConfig, TrainingConfig};
use synapse_core::constants::MAX_PARAMETERS;
use synapse_core::errors::{ModelError, SynapseResult, TrainingError};
use synapse_core::models::{EvaluationReport, TrainingExample, TrainingReadiness, TrainingReport};
use synapse_core::traits::IAttentionStore;
use synapse_embeddings::{extract_training_data, extract_with_vocabulary, train_test_split};
use synapse_model::{load_artifact, save_artifact, Gradients, LinkPredictor};

use crate::optimizer::Adam;

/// Orchestrates training runs over a tenant's link history.
pub struct Trainer {
    store: Arc<dyn IAttentionStore>,
    attention: AttentionConfig,
    training: TrainingConfig,
    predictor: PredictorConfig,
}

impl Trainer {
    pub fn new(store: Arc<dyn IAttentionStore>) -> Self {
        Self {
            store,
            attention: AttentionConfig::default(),
            training: TrainingConfig::default(),
            predictor: PredictorConfig::default(),
        }
    }

    pub fn with_configs(
        store: Arc<dyn IAttentionStore>,
        attention: AttentionConfig,
        training: TrainingConfig,
    ) -> Self {
        Self {
            store,
            attention,
            training,
            predictor: PredictorConfig::default(),
        }
    }

    /// Override the predictor structure (e.g. with a tuned configuration).
    pub fn with_predictor_config(mut self, predictor: PredictorConfig) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn store(&self) -> &Arc<dyn IAttentionStore> {
        &self.store
    }

    pub(crate) fn training_config(&self) -> &TrainingConfig {
        &self.training
    }

    pub(crate) fn predictor_config(&self) -> PredictorConfig {
        self.predictor
    }

    pub(crate) fn min_training_examples(&self) -> usize {
        self.attention.min_training_examples
    }

    /// Readiness gate: run the pipeline and report whether enough
    /// examples exist to train.
    pub fn check_training_readiness(&self, tenant_id: &str) -> SynapseResult<TrainingReadiness> {
        let data = extract_training_data(self.store.as_ref(), tenant_id)?;
        let example_count = data.examples.len();
        let required = self.attention.min_training_examples;
        Ok(TrainingReadiness {
            ready: example_count >= required,
            example_count,
            required,
        })
    }

    /// Train a model for the tenant and persist the winning artifact.
    ///
    /// Refuses with `InsufficientData` when the readiness gate fails.
    pub fn train(&self, tenant_id: &str, model_path: &Path) -> SynapseResult<TrainingReport> {
        let data = extract_training_data(self.store.as_ref(), tenant_id)?;
        let example_count = data.examples.len();
        let required = self.attention.min_training_examples;
        if example_count < required {
            return Err(TrainingError::InsufficientData {
                found: example_count,
                required,
            }
            .into());
        }
        let (train, validation) = train_test_split(
            data.examples,
            self.training.validation_ratio,
            self.training.seed,
        );

        let mut model = LinkPredictor::new(self.predictor, self.training.seed)?;
        enforce_parameter_budget(&model)?;

        info!(
            tenant_id = %tenant_id,
            examples = example_count,
            train = train.len(),
            validation = validation.len(),
            parameters = model.count_parameters(),
            "training run starting"
        );

        let outcome = fit(&mut model, &train, &validation, &self.training)?;
        save_artifact(model_path, &model, &data.vocabulary)?;

        Ok(TrainingReport {
            epochs_run: outcome.epochs_run,
            best_validation_loss: outcome.best_validation_loss,
            final_train_loss: outcome.final_train_loss,
            stopped_early: outcome.stopped_early,
            example_count,
            parameter_count: model.count_parameters(),
        })
    }

    /// Scheduled training entry point.
    ///
    /// Quietly declines (with a logged reason) when auto-training is
    /// disabled or the readiness gate fails; a scheduler polling an
    /// under-populated tenant is not an error.
    pub fn auto_train(
        &self,
        tenant_id: &str,
        model_path: &Path,
    ) -> SynapseResult<Option<TrainingReport>> {
        if !self.attention.auto_train {
            info!(tenant_id = %tenant_id, "auto-training disabled, skipping");
            return Ok(None);
        }
        let readiness = self.check_training_readiness(tenant_id)?;
        if !readiness.ready {
            warn!(
                tenant_id = %tenant_id,
                found = readiness.example_count,
                required = readiness.required,
                "auto-training skipped: not enough examples"
            );
            return Ok(None);
        }
        self.train(tenant_id, model_path).map(Some)
    }

    /// Audit a persisted model: load it, re-encode the tenant's current
    /// links with the artifact's own vocabulary, and score the
    /// validation split. No retraining.
    pub fn evaluate(&self, tenant_id: &str, model_path: &Path) -> SynapseResult<EvaluationReport> {
        let (model, vocabulary) = load_artifact(model_path)?;
        let examples = extract_with_vocabulary(self.store.as_ref(), tenant_id, &vocabulary)?;
        let (_, validation) = train_test_split(
            examples,
            self.training.validation_ratio,
            self.training.seed,
        );
        if validation.is_empty() {
            return Err(TrainingError::EmptySplit {
                split: "validation".to_string(),
            }
            .into());
        }

        let validation_loss = mean_squared_error(&model, &validation)?;
        info!(
            tenant_id = %tenant_id,
            validation_loss,
            parameters = model.count_parameters(),
            "model evaluated"
        );
        Ok(EvaluationReport {
            validation_loss,
            parameter_count: model.count_parameters(),
            example_count: validation.len(),
        })
    }
}

/// Outcome of one fit run, before the artifact is written.
pub(crate) struct FitOutcome {
    pub epochs_run: usize,
    pub best_validation_loss: f32,
    pub final_train_loss: f32,
    pub stopped_early: bool,
}

/// Fail when a model exceeds the trainable-parameter budget.
pub(crate) fn enforce_parameter_budget(model: &LinkPredictor) -> SynapseResult<()> {
    let actual = model.count_parameters();
    if actual > MAX_PARAMETERS {
        return Err(ModelError::ParameterBudgetExceeded {
            actual,
            budget: MAX_PARAMETERS,
        }
        .into());
    }
    Ok(())
}

/// The core training loop: shuffled mini-batches, per-epoch validation
/// with updates disabled, early stopping on stalled validation loss.
/// The model is left holding the best-validation parameters seen.
pub(crate) fn fit(
    model: &mut LinkPredictor,
    train: &[TrainingExample],
    validation: &[TrainingExample],
    config: &TrainingConfig,
) -> SynapseResult<FitOutcome> {
    if train.is_empty() {
        return Err(TrainingError::EmptySplit {
            split: "train".to_string(),
        }
        .into());
    }
    if validation.is_empty() {
        return Err(TrainingError::EmptySplit {
            split: "validation".to_string(),
        }
        .into());
    }

    let train_inputs: Vec<(Vec<f32>, f32)> = train
        .iter()
        .map(|e| (e.input_vector(), e.target_strength))
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut adam = Adam::new(model, config.learning_rate);
    let mut grads = Gradients::zeros_like(model);
    let mut indices: Vec<usize> = (0..train_inputs.len()).collect();

    let mut best_validation_loss = f32::INFINITY;
    let mut best_model = model.clone();
    let mut epochs_without_improvement = 0usize;
    let mut final_train_loss = f32::INFINITY;
    let mut epochs_run = 0usize;
    let mut stopped_early = false;

    for epoch in 1..=config.epochs {
        epochs_run = epoch;
        indices.shuffle(&mut rng);

        let mut squared_error_sum = 0.0f32;
        for batch in indices.chunks(config.batch_size.max(1)) {
            grads.reset();
            let scale = 2.0 / batch.len() as f32;
            for &idx in batch {
                let (input, target) = &train_inputs[idx];
                let trace = model.forward_trace(input, &mut rng);
                let error = trace.output - target;
                squared_error_sum += error * error;
                model.backward(&trace, scale * error, &mut grads);
            }
            adam.step(model, &grads);
        }
        final_train_loss = squared_error_sum / train_inputs.len() as f32;

        let validation_loss = mean_squared_error(model, validation)?;
        info!(
            epoch,
            train_loss = final_train_loss,
            validation_loss,
            "epoch complete"
        );

        if validation_loss < best_validation_loss {
            best_validation_loss = validation_loss;
            best_model = model.clone();
            epochs_without_improvement = 0;
        } else {
            epochs_without_improvement += 1;
            if epochs_without_improvement >= config.patience {
                info!(
                    epoch,
                    best_validation_loss,
                    "early stopping: validation loss stalled"
                );
                stopped_early = true;
                break;
            }
        }
    }

    *model = best_model;
    Ok(FitOutcome {
        epochs_run,
        best_validation_loss,
        final_train_loss,
        stopped_early,
    })
}

/// Mean squared error with parameter updates (and dropout) disabled.
pub(crate) fn mean_squared_error(
    model: &LinkPredictor,
    examples: &[TrainingExample],
) -> SynapseResult<f32> {
    let mut sum = 0.0f32;
    for example in examples {
        let prediction = model.predict(&example.input_vector())?;
        let error = prediction - example.target_strength;
        sum += error * error;
    }
    Ok(sum / examples.len() as f32)
}
