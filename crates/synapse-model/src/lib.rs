//! # synapse-model
//!
//! The link-strength predictor: a small parametric function mapping two
//! concept embeddings plus a context embedding to a strength in [0, 1].
//! Hand-rolled forward and backward passes keep the parameter budget
//! explicit and inference cheap enough for a synchronous request path.

pub mod artifact;
pub mod attention;
pub mod linear;
pub mod predictor;

pub use artifact::{load_artifact, save_artifact};
pub use predictor::{ForwardTrace, Gradients, LinkPredictor};
