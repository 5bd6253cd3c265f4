//! Default values shared by the config structs.

pub const DEFAULT_HEAD_COUNT: usize = 4;
pub const DEFAULT_HIDDEN_DIM: usize = 64;
pub const DEFAULT_DROPOUT: f32 = 0.1;

pub const DEFAULT_EPOCHS: usize = 100;
pub const DEFAULT_BATCH_SIZE: usize = 32;
pub const DEFAULT_LEARNING_RATE: f32 = 0.001;
pub const DEFAULT_PATIENCE: usize = 10;
pub const DEFAULT_VALIDATION_RATIO: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;
