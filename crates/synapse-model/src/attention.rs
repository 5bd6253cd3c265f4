//! Multi-head self-attention over equal slices of the input vector.
//!
//! The concatenated input (concept A ‖ concept B ‖ context) is split into
//! one token per head; each head projects its own slice to query, key, and
//! value, and attention runs across the token positions so features from
//! either concept can weight features from the other and from the context.
//! A residual connection carries the raw input through.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::linear::{Linear, LinearGrad};

/// One attention head: projections for its input slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionHead {
    pub query: Linear,
    pub key: Linear,
    pub value: Linear,
}

impl AttentionHead {
    pub fn xavier(dim: usize, rng: &mut StdRng) -> Self {
        Self {
            query: Linear::xavier(dim, dim, rng),
            key: Linear::xavier(dim, dim, rng),
            value: Linear::xavier(dim, dim, rng),
        }
    }

    pub fn param_count(&self) -> usize {
        self.query.param_count() + self.key.param_count() + self.value.param_count()
    }
}

/// Gradient buffers for one head.
#[derive(Debug, Clone)]
pub struct HeadGrad {
    pub query: LinearGrad,
    pub key: LinearGrad,
    pub value: LinearGrad,
}

impl HeadGrad {
    pub fn zeros_like(head: &AttentionHead) -> Self {
        Self {
            query: LinearGrad::zeros_like(&head.query),
            key: LinearGrad::zeros_like(&head.key),
            value: LinearGrad::zeros_like(&head.value),
        }
    }

    pub fn reset(&mut self) {
        self.query.reset();
        self.key.reset();
        self.value.reset();
    }
}

/// Intermediates captured during an attention forward pass.
#[derive(Debug, Clone)]
pub struct AttentionTrace {
    /// Input slices, one per head.
    pub tokens: Vec<Vec<f32>>,
    pub q: Vec<Vec<f32>>,
    pub k: Vec<Vec<f32>>,
    pub v: Vec<Vec<f32>>,
    /// Row-stochastic attention weights, `alpha[i][j]`.
    pub alpha: Vec<Vec<f32>>,
}

/// Forward pass. Returns the post-residual output and the trace needed
/// for backprop.
pub fn forward(heads: &[AttentionHead], x: &[f32]) -> (Vec<f32>, AttentionTrace) {
    let h = heads.len();
    let d = x.len() / h;
    let scale = 1.0 / (d as f32).sqrt();

    let tokens: Vec<Vec<f32>> = (0..h).map(|i| x[i * d..(i + 1) * d].to_vec()).collect();
    let q: Vec<Vec<f32>> = heads
        .iter()
        .zip(&tokens)
        .map(|(head, t)| head.query.forward(t))
        .collect();
    let k: Vec<Vec<f32>> = heads
        .iter()
        .zip(&tokens)
        .map(|(head, t)| head.key.forward(t))
        .collect();
    let v: Vec<Vec<f32>> = heads
        .iter()
        .zip(&tokens)
        .map(|(head, t)| head.value.forward(t))
        .collect();

    let mut alpha = Vec::with_capacity(h);
    for i in 0..h {
        let scores: Vec<f32> = (0..h).map(|j| dot(&q[i], &k[j]) * scale).collect();
        alpha.push(softmax(&scores));
    }

    let mut y = x.to_vec();
    for i in 0..h {
        for j in 0..h {
            let weight = alpha[i][j];
            for (slot, vj) in y[i * d..(i + 1) * d].iter_mut().zip(&v[j]) {
                *slot += weight * vj;
            }
        }
    }

    (
        y,
        AttentionTrace {
            tokens,
            q,
            k,
            v,
            alpha,
        },
    )
}

/// Backward pass. `d_attn` is the gradient of the loss with respect to the
/// attention contribution (the residual path is handled by the caller).
pub fn backward(heads: &[AttentionHead], trace: &AttentionTrace, d_attn: &[f32], grads: &mut [HeadGrad]) {
    let h = heads.len();
    let d = d_attn.len() / h;
    let scale = 1.0 / (d as f32).sqrt();

    let d_out: Vec<&[f32]> = (0..h).map(|i| &d_attn[i * d..(i + 1) * d]).collect();

    // dV and dAlpha.
    let mut dv = vec![vec![0.0f32; d]; h];
    let mut dalpha = vec![vec![0.0f32; h]; h];
    for i in 0..h {
        for j in 0..h {
            let weight = trace.alpha[i][j];
            for (slot, g) in dv[j].iter_mut().zip(d_out[i]) {
                *slot += weight * g;
            }
            dalpha[i][j] = dot(d_out[i], &trace.v[j]);
        }
    }

    // Softmax backward: ds[i][j] = alpha[i][j] * (dalpha[i][j] - Σ_k alpha[i][k] dalpha[i][k]).
    let mut ds = vec![vec![0.0f32; h]; h];
    for i in 0..h {
        let row_dot: f32 = (0..h).map(|kk| trace.alpha[i][kk] * dalpha[i][kk]).sum();
        for j in 0..h {
            ds[i][j] = trace.alpha[i][j] * (dalpha[i][j] - row_dot);
        }
    }

    // dQ and dK through the scaled dot product.
    let mut dq = vec![vec![0.0f32; d]; h];
    let mut dk = vec![vec![0.0f32; d]; h];
    for i in 0..h {
        for j in 0..h {
            let g = ds[i][j] * scale;
            for (slot, kj) in dq[i].iter_mut().zip(&trace.k[j]) {
                *slot += g * kj;
            }
            for (slot, qi) in dk[j].iter_mut().zip(&trace.q[i]) {
                *slot += g * qi;
            }
        }
    }

    // Per-head projection gradients. Input gradients are discarded — the
    // embeddings themselves are not trained.
    for i in 0..h {
        heads[i]
            .query
            .backward(&trace.tokens[i], &dq[i], &mut grads[i].query);
        heads[i]
            .key
            .backward(&trace.tokens[i], &dk[i], &mut grads[i].key);
        heads[i]
            .value
            .backward(&trace.tokens[i], &dv[i], &mut grads[i].value);
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Numerically stable softmax.
fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn make_heads(h: usize, d: usize, seed: u64) -> Vec<AttentionHead> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..h).map(|_| AttentionHead::xavier(d, &mut rng)).collect()
    }

    #[test]
    fn attention_rows_are_stochastic() {
        let heads = make_heads(4, 8, 11);
        let x: Vec<f32> = (0..32).map(|i| (i as f32) / 32.0).collect();
        let (_, trace) = forward(&heads, &x);
        for row in &trace.alpha {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            assert!(row.iter().all(|&a| a >= 0.0));
        }
    }

    #[test]
    fn forward_is_deterministic() {
        let heads = make_heads(2, 4, 5);
        let x = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        let (a, _) = forward(&heads, &x);
        let (b, _) = forward(&heads, &x);
        assert_eq!(a, b);
    }

    #[test]
    fn backward_matches_finite_difference_on_values() {
        // Check dL/dW for one value weight against a numeric estimate,
        // where L = Σ d_attn · attn_out.
        let mut heads = make_heads(2, 3, 21);
        let x = vec![0.4, -0.2, 0.9, 0.1, 0.6, -0.5];
        let d_attn = vec![1.0, 0.5, -0.3, 0.8, -0.6, 0.2];

        let loss = |heads: &[AttentionHead]| -> f32 {
            let (y, _) = forward(heads, &x);
            // Subtract the residual so only the attention term is scored.
            y.iter()
                .zip(&x)
                .zip(&d_attn)
                .map(|((yi, xi), g)| (yi - xi) * g)
                .sum()
        };

        let (_, trace) = forward(&heads, &x);
        let mut grads: Vec<HeadGrad> = heads.iter().map(HeadGrad::zeros_like).collect();
        backward(&heads, &trace, &d_attn, &mut grads);

        let eps = 1e-3f32;
        for (hi, wi) in [(0usize, 0usize), (0, 4), (1, 7)] {
            let original = heads[hi].value.w[wi];
            heads[hi].value.w[wi] = original + eps;
            let plus = loss(&heads);
            heads[hi].value.w[wi] = original - eps;
            let minus = loss(&heads);
            heads[hi].value.w[wi] = original;

            let numeric = (plus - minus) / (2.0 * eps);
            let analytic = grads[hi].value.w[wi];
            assert!(
                (numeric - analytic).abs() < 1e-2,
                "head {hi} w[{wi}]: numeric {numeric} vs analytic {analytic}"
            );
        }

        // Same check through the softmax for a query weight.
        for (hi, wi) in [(0usize, 2usize), (1, 5)] {
            let original = heads[hi].query.w[wi];
            heads[hi].query.w[wi] = original + eps;
            let plus = loss(&heads);
            heads[hi].query.w[wi] = original - eps;
            let minus = loss(&heads);
            heads[hi].query.w[wi] = original;

            let numeric = (plus - minus) / (2.0 * eps);
            let analytic = grads[hi].query.w[wi];
            assert!(
                (numeric - analytic).abs() < 1e-2,
                "head {hi} query w[{wi}]: numeric {numeric} vs analytic {analytic}"
            );
        }
    }
}
