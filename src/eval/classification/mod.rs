//! Classification metrics for model evaluation
//!
//! Provides multi-class classification metrics over string labels:
//! - Confusion matrix computation
//! - Per-class precision, recall, F1
//! - Macro, micro, and weighted averaging

mod average;
mod confusion;
mod metrics;


pub use average::Average;
pub use confusion::ConfusionMatrix;
pub use metrics::{ClassScore, MultiClassMetrics};
