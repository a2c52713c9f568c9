//! Model Evaluator for running evaluations

use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use super::super::classification::{Average, ConfusionMatrix, MultiClassMetrics};
use super::super::regression::RegressionMetrics;
use super::metric::Metric;
use super::result::{EvaluationRecord, MetricSet};
use crate::data::{Dataset, FeatureFrame, Target};
use crate::error::{Error, Result};
use crate::model::{ModelLoader, ModelRole, Predictions, Predictor};
use crate::registry::ModelVersion;

/// Held-out features and labels for one role, row-aligned
#[derive(Debug, Clone)]
pub struct EvaluationSet {
    pub role: ModelRole,
    pub features: FeatureFrame,
    pub target: Target,
}

impl EvaluationSet {
    /// Slice a dataset into features and the role's target.
    ///
    /// Missing columns or missing values are a schema mismatch.
    pub fn from_dataset<S: AsRef<str>>(
        dataset: &Dataset,
        features: &[S],
        role: ModelRole,
    ) -> Result<Self> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok(Self {
            role,
            features: FeatureFrame::from_dataset(dataset, features)?,
            target: Target::from_dataset(dataset, role)?,
        })
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// Model Evaluator for running evaluations
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelEvaluator;

impl ModelEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Predict with `model` over `x` and score against `y` with the role's metrics.
    pub fn evaluate(
        &self,
        model: &dyn Predictor,
        x: &FeatureFrame,
        y: &Target,
        role: ModelRole,
    ) -> Result<MetricSet> {
        if y.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if x.n_rows() != y.len() {
            return Err(Error::schema(format!(
                "features have {} rows, labels have {}",
                x.n_rows(),
                y.len()
            )));
        }
        let predictions = model.predict(x)?;
        self.score(&predictions, y, role)
    }

    /// Score existing predictions against ground truth
    pub fn score(&self, predictions: &Predictions, y: &Target, role: ModelRole) -> Result<MetricSet> {
        if predictions.len() != y.len() {
            return Err(Error::PredictionShape {
                expected: format!("{} values", y.len()),
                actual: predictions.describe(),
            });
        }

        match (role, predictions, y) {
            (ModelRole::Regression, Predictions::Continuous(pred), Target::Continuous(truth)) => {
                let m = RegressionMetrics::from_predictions(pred, truth);
                Ok(MetricSet::new()
                    .with(Metric::MAE, m.mae)
                    .with(Metric::MSE, m.mse)
                    .with(Metric::ExplainedVariance, m.explained_variance))
            }
            (
                ModelRole::Classification,
                Predictions::Categorical(pred),
                Target::Categorical(truth),
            ) => {
                let cm = ConfusionMatrix::from_predictions(pred, truth);
                let metrics = MultiClassMetrics::from_confusion_matrix(&cm);
                Ok(MetricSet::new()
                    .with(Metric::Accuracy, cm.accuracy())
                    .with(Metric::F1(Average::Weighted), metrics.f1_avg(Average::Weighted)))
            }
            (ModelRole::Classification, _, Target::Continuous(_)) => {
                Err(Error::schema("classification needs categorical labels"))
            }
            (ModelRole::Regression, _, Target::Categorical(_)) => {
                Err(Error::schema("regression needs numeric labels"))
            }
            (role, predictions, _) => Err(Error::PredictionShape {
                expected: format!(
                    "{} predictions",
                    match role {
                        ModelRole::Regression => "continuous",
                        ModelRole::Classification => "categorical",
                    }
                ),
                actual: predictions.describe(),
            }),
        }
    }

    /// Load a registered version and evaluate it on `set`
    pub fn evaluate_version(
        &self,
        loader: &dyn ModelLoader,
        version: &ModelVersion,
        set: &EvaluationSet,
    ) -> Result<EvaluationRecord> {
        let start = Instant::now();
        let model = loader.load(version)?;
        let metrics = self.evaluate(model.as_ref(), &set.features, &set.target, set.role)?;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(role = %set.role, version = version.version, %metrics, "evaluated");

        Ok(EvaluationRecord {
            role: set.role,
            version: version.version,
            metrics,
            samples: set.len(),
            duration_ms,
            evaluated_at: Utc::now(),
        })
    }
}
