//! Link-update strategies.
//!
//! The updater selects one at construction: neural when a model artifact
//! loads, Hebbian otherwise. A failing neural call swaps to the Hebbian
//! rule for that pair only.

mod heuristic;
mod neural;

pub use heuristic::HeuristicStrategy;
pub use neural::NeuralStrategy;
