//! Dense layer with explicit forward and backward passes.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fully connected layer. Weights are row-major: `w[o * in_dim + i]`
/// multiplies input `i` into output `o`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Linear {
    pub w: Vec<f32>,
    pub b: Vec<f32>,
    pub in_dim: usize,
    pub out_dim: usize,
}

impl Linear {
    /// Xavier-uniform initialization.
    pub fn xavier(in_dim: usize, out_dim: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
        let w = (0..in_dim * out_dim)
            .map(|_| rng.random_range(-limit..limit))
            .collect();
        Self {
            w,
            b: vec![0.0; out_dim],
            in_dim,
            out_dim,
        }
    }

    pub fn forward(&self, x: &[f32]) -> Vec<f32> {
        debug_assert_eq!(x.len(), self.in_dim);
        let mut y = self.b.clone();
        for o in 0..self.out_dim {
            let row = &self.w[o * self.in_dim..(o + 1) * self.in_dim];
            let mut acc = 0.0f32;
            for (wi, xi) in row.iter().zip(x) {
                acc += wi * xi;
            }
            y[o] += acc;
        }
        y
    }

    /// Accumulate parameter gradients for output gradient `dy` at input
    /// `x`, returning the input gradient.
    pub fn backward(&self, x: &[f32], dy: &[f32], grad: &mut LinearGrad) -> Vec<f32> {
        debug_assert_eq!(x.len(), self.in_dim);
        debug_assert_eq!(dy.len(), self.out_dim);
        let mut dx = vec![0.0f32; self.in_dim];
        for o in 0..self.out_dim {
            let g = dy[o];
            grad.b[o] += g;
            let row = o * self.in_dim;
            for i in 0..self.in_dim {
                grad.w[row + i] += g * x[i];
                dx[i] += self.w[row + i] * g;
            }
        }
        dx
    }

    pub fn param_count(&self) -> usize {
        self.w.len() + self.b.len()
    }
}

/// Gradient buffer shaped like one `Linear`.
#[derive(Debug, Clone)]
pub struct LinearGrad {
    pub w: Vec<f32>,
    pub b: Vec<f32>,
}

impl LinearGrad {
    pub fn zeros_like(layer: &Linear) -> Self {
        Self {
            w: vec![0.0; layer.w.len()],
            b: vec![0.0; layer.b.len()],
        }
    }

    pub fn reset(&mut self) {
        self.w.fill(0.0);
        self.b.fill(0.0);
    }
}
