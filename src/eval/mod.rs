//! Model evaluation and drift detection
//!
//! Fixed metric computation for both model roles, plus the statistical
//! evidence used to judge whether current data still resembles the reference.
//!
//! ## Architecture
//!
//! - `classification`: Multi-class confusion matrix, per-class and averaged scores
//! - `regression`: MAE, MSE and explained variance
//! - `evaluator`: ModelEvaluator scoring a loaded model on an evaluation set
//! - `drift`: Two-sample Kolmogorov–Smirnov drift detection per numeric field
//!
//! ## Example
//!
//! ```ignore
//! use aqi_governance::eval::{EvaluationSet, Metric, ModelEvaluator};
//! use aqi_governance::model::ModelRole;
//!
//! let set = EvaluationSet::from_dataset(&test, &features, ModelRole::Regression)?;
//! let metrics = ModelEvaluator::new().evaluate(&model, &set.features, &set.target, set.role)?;
//! println!("MSE: {:.3}", metrics.get(Metric::MSE).unwrap_or(f64::NAN));
//! ```

pub mod classification;
pub mod drift;
pub mod evaluator;
pub mod regression;

pub use classification::{Average, ClassScore, ConfusionMatrix, MultiClassMetrics};
pub use drift::{DriftCallback, DriftDetector, DriftReport, DriftSettings, DriftSummary, FieldDrift, Severity};
pub use evaluator::{EvaluationRecord, EvaluationSet, Metric, MetricSet, ModelEvaluator};
pub use regression::RegressionMetrics;
