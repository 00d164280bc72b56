//! Self-play training sessions: match loop driver and rolling statistics.

pub mod metrics;
pub mod trainer;

pub use metrics::TrainingMetrics;
pub use trainer::{Trainer, TrainerConfig};
