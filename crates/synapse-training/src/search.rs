//! Hyperparameter search: sample the configuration grid without
//! replacement, run abbreviated training per trial, keep the best.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use synapse_core::config::{PredictorConfig, TrainingConfig};
use synapse_core::errors::{SynapseResult, TrainingError};
use synapse_core::models::{TrainingExample, TrialResult, TuningReport};
use synapse_embeddings::{extract_training_data, train_test_split};
use synapse_model::LinkPredictor;

use crate::trainer::{enforce_parameter_budget, fit, Trainer};

const LEARNING_RATES: &[f32] = &[0.01, 0.001, 0.0001];
const BATCH_SIZES: &[usize] = &[16, 32, 64];
const HEAD_COUNTS: &[usize] = &[2, 4, 8];
const HIDDEN_DIMS: &[usize] = &[32, 64, 96];

/// Epoch budget for one abbreviated trial.
const TRIAL_EPOCHS: usize = 20;
/// Early-stop patience for one abbreviated trial.
const TRIAL_PATIENCE: usize = 3;

impl Trainer {
    /// Search the hyperparameter grid with a `trials` budget.
    ///
    /// Combinations are sampled without replacement. A failing trial is
    /// logged and skipped; if every trial fails the search reports
    /// `NoViableConfiguration` instead of crashing.
    pub fn tune(&self, tenant_id: &str, trials: usize) -> SynapseResult<TuningReport> {
        let data = extract_training_data(self.store().as_ref(), tenant_id)?;
        let required = self.min_training_examples();
        if data.examples.len() < required {
            return Err(TrainingError::InsufficientData {
                found: data.examples.len(),
                required,
            }
            .into());
        }

        let config = self.training_config();
        let (train, validation) =
            train_test_split(data.examples, config.validation_ratio, config.seed);

        let mut grid: Vec<(f32, usize, usize, usize)> = Vec::new();
        for &lr in LEARNING_RATES {
            for &batch in BATCH_SIZES {
                for &heads in HEAD_COUNTS {
                    for &hidden in HIDDEN_DIMS {
                        grid.push((lr, batch, heads, hidden));
                    }
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(config.seed);
        grid.shuffle(&mut rng);
        grid.truncate(trials.min(grid.len()));

        let mut best: Option<TrialResult> = None;
        let mut trials_failed = 0usize;

        for (index, &(learning_rate, batch_size, head_count, hidden_dim)) in
            grid.iter().enumerate()
        {
            let trial_training = TrainingConfig {
                learning_rate,
                batch_size,
                ..config.abbreviated(TRIAL_EPOCHS, TRIAL_PATIENCE)
            };
            let trial_predictor = PredictorConfig {
                head_count,
                hidden_dim,
                ..self.predictor_config()
            };

            match run_trial(&trial_predictor, &trial_training, &train, &validation) {
                Ok(validation_loss) => {
                    info!(
                        trial = index + 1,
                        learning_rate,
                        batch_size,
                        head_count,
                        hidden_dim,
                        validation_loss,
                        "trial complete"
                    );
                    let candidate = TrialResult {
                        learning_rate,
                        batch_size,
                        head_count,
                        hidden_dim,
                        validation_loss,
                    };
                    let improves = best
                        .map(|b| candidate.validation_loss < b.validation_loss)
                        .unwrap_or(true);
                    if improves {
                        best = Some(candidate);
                    }
                }
                Err(error) => {
                    warn!(
                        trial = index + 1,
                        learning_rate,
                        batch_size,
                        head_count,
                        hidden_dim,
                        error = %error,
                        "trial failed, skipping"
                    );
                    trials_failed += 1;
                }
            }
        }

        let trials_run = grid.len();
        match best {
            Some(best) => {
                info!(
                    trials_run,
                    trials_failed,
                    best_validation_loss = best.validation_loss,
                    "hyperparameter search complete"
                );
                Ok(TuningReport {
                    best,
                    trials_run,
                    trials_failed,
                })
            }
            None => Err(TrainingError::NoViableConfiguration { trials: trials_run }.into()),
        }
    }
}

fn run_trial(
    predictor: &PredictorConfig,
    training: &TrainingConfig,
    train: &[TrainingExample],
    validation: &[TrainingExample],
) -> SynapseResult<f32> {
    let mut model = LinkPredictor::new(*predictor, training.seed)?;
    enforce_parameter_budget(&model)?;
    let outcome = fit(&mut model, train, validation, training)?;
    Ok(outcome.best_validation_loss)
}
