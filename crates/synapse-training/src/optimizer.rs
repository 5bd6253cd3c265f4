//! Adam — adaptive per-parameter gradient descent with bias-corrected
//! first and second moments.

use synapse_model::{Gradients, LinkPredictor};

const BETA1: f32 = 0.9;
const BETA2: f32 = 0.999;
const EPSILON: f32 = 1e-8;

/// Adam optimizer state, shaped like the model it updates.
pub struct Adam {
    learning_rate: f32,
    step_count: u64,
    m: Vec<Vec<f32>>,
    v: Vec<Vec<f32>>,
}

impl Adam {
    pub fn new(model: &LinkPredictor, learning_rate: f32) -> Self {
        let shapes: Vec<usize> = Gradients::zeros_like(model)
            .tensors()
            .iter()
            .map(|t| t.len())
            .collect();
        Self {
            learning_rate,
            step_count: 0,
            m: shapes.iter().map(|&len| vec![0.0; len]).collect(),
            v: shapes.iter().map(|&len| vec![0.0; len]).collect(),
        }
    }

    /// Apply one update from accumulated gradients.
    pub fn step(&mut self, model: &mut LinkPredictor, grads: &Gradients) {
        self.step_count += 1;
        let bias1 = 1.0 - BETA1.powi(self.step_count as i32);
        let bias2 = 1.0 - BETA2.powi(self.step_count as i32);

        let params = model.tensors_mut();
        let gradients = grads.tensors();
        debug_assert_eq!(params.len(), gradients.len());

        for (((param, grad), m), v) in params
            .into_iter()
            .zip(gradients)
            .zip(self.m.iter_mut())
            .zip(self.v.iter_mut())
        {
            for i in 0..param.len() {
                let g = grad[i];
                m[i] = BETA1 * m[i] + (1.0 - BETA1) * g;
                v[i] = BETA2 * v[i] + (1.0 - BETA2) * g * g;
                let m_hat = m[i] / bias1;
                let v_hat = v[i] / bias2;
                param[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synapse_core::config::PredictorConfig;

    fn small_config() -> PredictorConfig {
        PredictorConfig {
            concept_dim: 8,
            context_dim: 4,
            head_count: 2,
            hidden_dim: 8,
            dropout: 0.0,
        }
    }

    #[test]
    fn step_moves_parameters_against_the_gradient() {
        let mut model = LinkPredictor::new(small_config(), 5).unwrap();
        let x = vec![0.5; 20];
        let target = 0.9f32;

        let loss_before = (model.predict(&x).unwrap() - target).powi(2);

        let mut adam = Adam::new(&model, 0.01);
        let mut grads = Gradients::zeros_like(&model);
        let mut rng = StdRng::seed_from_u64(0);
        // A handful of full-gradient steps on a single example must
        // reduce its loss.
        for _ in 0..25 {
            grads.reset();
            let trace = model.forward_trace(&x, &mut rng);
            model.backward(&trace, 2.0 * (trace.output - target), &mut grads);
            adam.step(&mut model, &grads);
        }

        let loss_after = (model.predict(&x).unwrap() - target).powi(2);
        assert!(
            loss_after < loss_before,
            "loss did not decrease: {loss_before} -> {loss_after}"
        );
    }

    #[test]
    fn zero_gradients_leave_parameters_unchanged() {
        let mut model = LinkPredictor::new(small_config(), 6).unwrap();
        let snapshot = model.clone();
        let grads = Gradients::zeros_like(&model);
        let mut adam = Adam::new(&model, 0.01);
        adam.step(&mut model, &grads);
        assert_eq!(model, snapshot);
    }
}
