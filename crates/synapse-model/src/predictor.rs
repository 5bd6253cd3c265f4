//! LinkPredictor — concat → multi-head attention → feed-forward reducer
//! → logistic squash.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use synapse_core::config::PredictorConfig;
use synapse_core::errors::{ModelError, SynapseResult};
use synapse_core::traits::ILinkPredictor;

use crate::attention::{self, AttentionHead, AttentionTrace, HeadGrad};
use crate::linear::{Linear, LinearGrad};

/// The learned link-strength model.
///
/// Holds no mutable state across calls: a loaded instance is safe for
/// concurrent read-only inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkPredictor {
    config: PredictorConfig,
    heads: Vec<AttentionHead>,
    ffn1: Linear,
    ffn2: Linear,
    out: Linear,
}

impl LinkPredictor {
    /// Build a freshly initialized predictor.
    pub fn new(config: PredictorConfig, seed: u64) -> SynapseResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let heads = (0..config.head_count)
            .map(|_| AttentionHead::xavier(config.head_dim(), &mut rng))
            .collect();
        let ffn1 = Linear::xavier(config.input_dim(), config.hidden_dim, &mut rng);
        let ffn2 = Linear::xavier(config.hidden_dim, config.reduced_dim(), &mut rng);
        let out = Linear::xavier(config.reduced_dim(), 1, &mut rng);
        Ok(Self {
            config,
            heads,
            ffn1,
            ffn2,
            out,
        })
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Total trainable parameter count.
    pub fn count_parameters(&self) -> usize {
        self.heads.iter().map(AttentionHead::param_count).sum::<usize>()
            + self.ffn1.param_count()
            + self.ffn2.param_count()
            + self.out.param_count()
    }

    /// Inference on a pre-concatenated input. Regularization is disabled.
    pub fn predict(&self, x: &[f32]) -> SynapseResult<f32> {
        if x.len() != self.config.input_dim() {
            return Err(ModelError::DimensionMismatch {
                expected: self.config.input_dim(),
                actual: x.len(),
            }
            .into());
        }
        let (y, _) = attention::forward(&self.heads, x);
        let h1 = relu(&self.ffn1.forward(&y));
        let h2 = relu(&self.ffn2.forward(&h1));
        let z = self.out.forward(&h2)[0];
        let output = sigmoid(z);
        if !output.is_finite() {
            return Err(ModelError::PredictionFailed {
                reason: "non-finite model output".to_string(),
            }
            .into());
        }
        Ok(output.clamp(0.0, 1.0))
    }

    /// Training-mode forward pass with dropout, capturing intermediates.
    pub fn forward_trace(&self, x: &[f32], rng: &mut StdRng) -> ForwardTrace {
        debug_assert_eq!(x.len(), self.config.input_dim());
        let (y, attention) = attention::forward(&self.heads, x);

        let pre1 = self.ffn1.forward(&y);
        let mask1 = dropout_mask(pre1.len(), self.config.dropout, rng);
        let h1d: Vec<f32> = pre1
            .iter()
            .zip(&mask1)
            .map(|(p, m)| p.max(0.0) * m)
            .collect();

        let pre2 = self.ffn2.forward(&h1d);
        let mask2 = dropout_mask(pre2.len(), self.config.dropout, rng);
        let h2d: Vec<f32> = pre2
            .iter()
            .zip(&mask2)
            .map(|(p, m)| p.max(0.0) * m)
            .collect();

        let z = self.out.forward(&h2d)[0];
        ForwardTrace {
            attention,
            y,
            pre1,
            mask1,
            h1d,
            pre2,
            mask2,
            h2d,
            output: sigmoid(z),
        }
    }

    /// Backpropagate `d_output` (∂loss/∂output) through the trace,
    /// accumulating into `grads`.
    pub fn backward(&self, trace: &ForwardTrace, d_output: f32, grads: &mut Gradients) {
        let o = trace.output;
        let dz = d_output * o * (1.0 - o);

        let d_h2d = self.out.backward(&trace.h2d, &[dz], &mut grads.out);
        let d_pre2: Vec<f32> = d_h2d
            .iter()
            .zip(&trace.mask2)
            .zip(&trace.pre2)
            .map(|((g, m), p)| if *p > 0.0 { g * m } else { 0.0 })
            .collect();

        let d_h1d = self.ffn2.backward(&trace.h1d, &d_pre2, &mut grads.ffn2);
        let d_pre1: Vec<f32> = d_h1d
            .iter()
            .zip(&trace.mask1)
            .zip(&trace.pre1)
            .map(|((g, m), p)| if *p > 0.0 { g * m } else { 0.0 })
            .collect();

        let dy = self.ffn1.backward(&trace.y, &d_pre1, &mut grads.ffn1);
        attention::backward(&self.heads, &trace.attention, &dy, &mut grads.heads);
    }

    /// All parameter tensors in canonical order, mutably. The optimizer
    /// pairs these with `Gradients::tensors`.
    pub fn tensors_mut(&mut self) -> Vec<&mut Vec<f32>> {
        let mut tensors = Vec::new();
        for head in &mut self.heads {
            tensors.push(&mut head.query.w);
            tensors.push(&mut head.query.b);
            tensors.push(&mut head.key.w);
            tensors.push(&mut head.key.b);
            tensors.push(&mut head.value.w);
            tensors.push(&mut head.value.b);
        }
        tensors.push(&mut self.ffn1.w);
        tensors.push(&mut self.ffn1.b);
        tensors.push(&mut self.ffn2.w);
        tensors.push(&mut self.ffn2.b);
        tensors.push(&mut self.out.w);
        tensors.push(&mut self.out.b);
        tensors
    }

    pub(crate) fn from_parts(
        config: PredictorConfig,
        heads: Vec<AttentionHead>,
        ffn1: Linear,
        ffn2: Linear,
        out: Linear,
    ) -> Self {
        Self {
            config,
            heads,
            ffn1,
            ffn2,
            out,
        }
    }

    pub(crate) fn parts(&self) -> (&[AttentionHead], &Linear, &Linear, &Linear) {
        (&self.heads, &self.ffn1, &self.ffn2, &self.out)
    }
}

impl ILinkPredictor for LinkPredictor {
    fn predict_strength(
        &self,
        concept_a_embedding: &[f32],
        concept_b_embedding: &[f32],
        context_embedding: &[f32],
    ) -> SynapseResult<f32> {
        for (vec, expected) in [
            (concept_a_embedding, self.config.concept_dim),
            (concept_b_embedding, self.config.concept_dim),
            (context_embedding, self.config.context_dim),
        ] {
            if vec.len() != expected {
                return Err(ModelError::DimensionMismatch {
                    expected,
                    actual: vec.len(),
                }
                .into());
            }
        }
        let mut x = Vec::with_capacity(self.config.input_dim());
        x.extend_from_slice(concept_a_embedding);
        x.extend_from_slice(concept_b_embedding);
        x.extend_from_slice(context_embedding);
        self.predict(&x)
    }

    fn count_parameters(&self) -> usize {
        self.count_parameters()
    }
}

/// Intermediates from one training-mode forward pass.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    attention: AttentionTrace,
    y: Vec<f32>,
    pre1: Vec<f32>,
    mask1: Vec<f32>,
    h1d: Vec<f32>,
    pre2: Vec<f32>,
    mask2: Vec<f32>,
    h2d: Vec<f32>,
    /// The squashed prediction.
    pub output: f32,
}

/// Gradient buffers shaped like a `LinkPredictor`.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub heads: Vec<HeadGrad>,
    pub ffn1: LinearGrad,
    pub ffn2: LinearGrad,
    pub out: LinearGrad,
}

impl Gradients {
    pub fn zeros_like(model: &LinkPredictor) -> Self {
        Self {
            heads: model.heads.iter().map(HeadGrad::zeros_like).collect(),
            ffn1: LinearGrad::zeros_like(&model.ffn1),
            ffn2: LinearGrad::zeros_like(&model.ffn2),
            out: LinearGrad::zeros_like(&model.out),
        }
    }

    /// Zero every buffer in place.
    pub fn reset(&mut self) {
        for head in &mut self.heads {
            head.reset();
        }
        self.ffn1.reset();
        self.ffn2.reset();
        self.out.reset();
    }

    /// All gradient tensors in the same canonical order as
    /// `LinkPredictor::tensors_mut`.
    pub fn tensors(&self) -> Vec<&Vec<f32>> {
        let mut tensors = Vec::new();
        for head in &self.heads {
            tensors.push(&head.query.w);
            tensors.push(&head.query.b);
            tensors.push(&head.key.w);
            tensors.push(&head.key.b);
            tensors.push(&head.value.w);
            tensors.push(&head.value.b);
        }
        tensors.push(&self.ffn1.w);
        tensors.push(&self.ffn1.b);
        tensors.push(&self.ffn2.w);
        tensors.push(&self.ffn2.b);
        tensors.push(&self.out.w);
        tensors.push(&self.out.b);
        tensors
    }
}

fn relu(x: &[f32]) -> Vec<f32> {
    x.iter().map(|v| v.max(0.0)).collect()
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

fn dropout_mask(len: usize, rate: f32, rng: &mut StdRng) -> Vec<f32> {
    if rate <= 0.0 {
        return vec![1.0; len];
    }
    let keep = 1.0 - rate;
    (0..len)
        .map(|_| {
            if rng.random::<f32>() < rate {
                0.0
            } else {
                1.0 / keep
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::constants::MAX_PARAMETERS;

    fn input(seed: u64, dim: usize) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    #[test]
    fn default_config_fits_the_parameter_budget() {
        let model = LinkPredictor::new(PredictorConfig::default(), 1).unwrap();
        assert_eq!(model.count_parameters(), 32_097);
        assert!(model.count_parameters() <= MAX_PARAMETERS);
    }

    #[test]
    fn prediction_is_deterministic_and_bounded() {
        let model = LinkPredictor::new(PredictorConfig::default(), 2).unwrap();
        let x = input(3, 160);
        let a = model.predict(&x).unwrap();
        let b = model.predict(&x).unwrap();
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a));
    }

    #[test]
    fn rejects_wrong_input_width() {
        let model = LinkPredictor::new(PredictorConfig::default(), 2).unwrap();
        assert!(model.predict(&[0.0; 159]).is_err());
        assert!(model
            .predict_strength(&[0.0; 64], &[0.0; 64], &[0.0; 31])
            .is_err());
        assert!(model
            .predict_strength(&[0.0; 63], &[0.0; 64], &[0.0; 32])
            .is_err());
    }

    #[test]
    fn trace_without_dropout_matches_inference() {
        let config = PredictorConfig {
            dropout: 0.0,
            ..Default::default()
        };
        let model = LinkPredictor::new(config, 7).unwrap();
        let x = input(8, 160);
        let mut rng = StdRng::seed_from_u64(0);
        let trace = model.forward_trace(&x, &mut rng);
        let inference = model.predict(&x).unwrap();
        assert!((trace.output - inference).abs() < 1e-6);
    }

    #[test]
    fn full_backward_matches_finite_difference() {
        // Small model, no dropout, loss = (output - target)^2.
        let config = PredictorConfig {
            concept_dim: 8,
            context_dim: 4,
            head_count: 2,
            hidden_dim: 8,
            dropout: 0.0,
        };
        let mut model = LinkPredictor::new(config, 13).unwrap();
        let x = input(14, config.input_dim());
        let target = 0.7f32;

        let mut rng = StdRng::seed_from_u64(0);
        let trace = model.forward_trace(&x, &mut rng);
        let mut grads = Gradients::zeros_like(&model);
        model.backward(&trace, 2.0 * (trace.output - target), &mut grads);

        let loss = |m: &LinkPredictor| -> f32 {
            let o = m.predict(&x).unwrap();
            (o - target).powi(2)
        };

        let eps = 1e-3f32;
        // One weight from each region of the network.
        let checks: Vec<(f32, f32)> = {
            let analytic_ffn1 = grads.ffn1.w[3];
            let original = model.ffn1.w[3];
            model.ffn1.w[3] = original + eps;
            let plus = loss(&model);
            model.ffn1.w[3] = original - eps;
            let minus = loss(&model);
            model.ffn1.w[3] = original;
            let mut v = vec![((plus - minus) / (2.0 * eps), analytic_ffn1)];

            let analytic_head = grads.heads[1].value.w[2];
            let original = model.heads[1].value.w[2];
            model.heads[1].value.w[2] = original + eps;
            let plus = loss(&model);
            model.heads[1].value.w[2] = original - eps;
            let minus = loss(&model);
            model.heads[1].value.w[2] = original;
            v.push(((plus - minus) / (2.0 * eps), analytic_head));

            let analytic_out = grads.out.w[1];
            let original = model.out.w[1];
            model.out.w[1] = original + eps;
            let plus = loss(&model);
            model.out.w[1] = original - eps;
            let minus = loss(&model);
            model.out.w[1] = original;
            v.push(((plus - minus) / (2.0 * eps), analytic_out));
            v
        };

        for (numeric, analytic) in checks {
            assert!(
                (numeric - analytic).abs() < 1e-2,
                "numeric {numeric} vs analytic {analytic}"
            );
        }
    }

    #[test]
    fn tensor_views_cover_every_parameter() {
        let mut model = LinkPredictor::new(PredictorConfig::default(), 4).unwrap();
        let total: usize = model.tensors_mut().iter().map(|t| t.len()).sum();
        assert_eq!(total, model.count_parameters());

        let grads = Gradients::zeros_like(&model);
        let grad_total: usize = grads.tensors().iter().map(|t| t.len()).sum();
        assert_eq!(grad_total, total);
    }
}
