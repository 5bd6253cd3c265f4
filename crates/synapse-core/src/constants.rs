/// Synapse system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimensionality of a concept embedding.
pub const CONCEPT_DIM: usize = 64;

/// Dimensionality of a context embedding.
pub const CONTEXT_DIM: usize = 32;

/// Dimensions of the context vector reserved for the link-type one-hot.
pub const LINK_TYPE_DIMS: usize = 2;

/// Links at or below this strength are treated as noise and excluded
/// from training data.
pub const STRENGTH_FLOOR: f32 = 0.1;

/// Fixed increment applied by the Hebbian fallback rule.
pub const HEBBIAN_INCREMENT: f32 = 0.1;

/// Hard ceiling on trainable parameters. Keeps a single prediction cheap
/// enough to run synchronously inside a learning-event request path.
pub const MAX_PARAMETERS: usize = 50_000;

/// Minimum training examples before a training run may proceed.
pub const MIN_TRAINING_EXAMPLES: usize = 50;
