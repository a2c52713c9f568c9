//! Model Evaluator for standardized evaluation
//!
//! Scores a loaded model on a held-out evaluation set and returns the fixed
//! metric set of its role.

mod metric;
mod model_evaluator;
mod result;


pub use metric::Metric;
pub use model_evaluator::{EvaluationSet, ModelEvaluator};
pub use result::{EvaluationRecord, MetricSet};
