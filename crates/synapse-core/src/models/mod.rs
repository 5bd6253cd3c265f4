//! Result and report models exchanged between subsystems.

mod attention_stats;
mod evaluation;
mod readiness;
mod training_example;
mod training_report;
mod tuning;
mod update_summary;

pub use attention_stats::{AttentionStats, LinkTypeStats};
pub use evaluation::EvaluationReport;
pub use readiness::TrainingReadiness;
pub use training_example::TrainingExample;
pub use training_report::TrainingReport;
pub use tuning::{TrialResult, TuningReport};
pub use update_summary::UpdateSummary;
