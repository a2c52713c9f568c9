//! Active model pair

use chrono::Utc;
use tracing::{debug, info};

use super::record::PredictionRecord;
use super::sink::PredictionSink;
use crate::data::{default_features, Dataset, FeatureFrame};
use crate::error::{Error, Result};
use crate::model::{ModelLoader, ModelRole, Predictions, Predictor};
use crate::registry::{ModelRegistry, ModelStage, ModelVersion};

struct Loaded {
    version: ModelVersion,
    predictor: Box<dyn Predictor>,
}

impl Loaded {
    fn resolve<R, L>(registry: &R, loader: &L, role: ModelRole) -> Result<Self>
    where
        R: ModelRegistry + ?Sized,
        L: ModelLoader + ?Sized,
    {
        let version =
            registry.get_latest(role, ModelStage::Active)?.ok_or(Error::NoActiveModel(role))?;
        let predictor = loader.load(&version)?;
        debug!(role = %role, version = version.version, uri = %version.artifact_uri, "active model loaded");
        Ok(Self { version, predictor })
    }
}

/// The Active regression and classification models, loaded and ready to score
pub struct ActiveModels {
    regression: Loaded,
    classification: Loaded,
    features: Vec<String>,
}

impl std::fmt::Debug for ActiveModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveModels")
            .field("regression", &self.regression.version.version)
            .field("classification", &self.classification.version.version)
            .field("features", &self.features)
            .finish()
    }
}

impl ActiveModels {
    /// Load the Active version of both roles.
    ///
    /// Fails with [`Error::NoActiveModel`] if either role has none.
    pub fn load<R, L>(registry: &R, loader: &L) -> Result<Self>
    where
        R: ModelRegistry + ?Sized,
        L: ModelLoader + ?Sized,
    {
        let regression = Loaded::resolve(registry, loader, ModelRole::Regression)?;
        let classification = Loaded::resolve(registry, loader, ModelRole::Classification)?;
        info!(
            regression = regression.version.version,
            classification = classification.version.version,
            "serving with active models"
        );
        Ok(Self { regression, classification, features: default_features() })
    }

    /// Features extracted by [`predict_dataset`](Self::predict_dataset)
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn version(&self, role: ModelRole) -> &ModelVersion {
        match role {
            ModelRole::Regression => &self.regression.version,
            ModelRole::Classification => &self.classification.version,
        }
    }

    /// Score every row of `frame` with both models
    pub fn predict(&self, frame: &FeatureFrame) -> Result<Vec<PredictionRecord>> {
        self.score(frame, None)
    }

    /// Extract the configured features from `dataset` and score it.
    ///
    /// The dataset's `date` column, if present, is carried into each record.
    pub fn predict_dataset(&self, dataset: &Dataset) -> Result<Vec<PredictionRecord>> {
        let frame = FeatureFrame::from_dataset(dataset, &self.features)?;
        self.score(&frame, dataset.timestamps())
    }

    /// Score `frame` and append the records to `sink`; returns how many were written
    pub fn predict_into(&self, frame: &FeatureFrame, sink: &dyn PredictionSink) -> Result<usize> {
        let records = self.predict(frame)?;
        sink.append(&records)?;
        Ok(records.len())
    }

    fn score(
        &self,
        frame: &FeatureFrame,
        observed: Option<&[Option<chrono::DateTime<Utc>>]>,
    ) -> Result<Vec<PredictionRecord>> {
        let n = frame.n_rows();
        let pm10 = match self.regression.predictor.predict(frame)? {
            Predictions::Continuous(values) if values.len() == n => values,
            other => {
                return Err(Error::PredictionShape {
                    expected: format!("{n} continuous values"),
                    actual: other.describe(),
                })
            }
        };
        let categories = match self.classification.predictor.predict(frame)? {
            Predictions::Categorical(labels) if labels.len() == n => labels,
            other => {
                return Err(Error::PredictionShape {
                    expected: format!("{n} categorical labels"),
                    actual: other.describe(),
                })
            }
        };

        let timestamp = Utc::now();
        let records = pm10
            .into_iter()
            .zip(categories)
            .enumerate()
            .map(|(i, (predicted_pm10, predicted_category))| PredictionRecord {
                timestamp,
                observed_at: observed.and_then(|ts| ts.get(i).copied().flatten()),
                regression_version: self.regression.version.version,
                classification_version: self.classification.version.version,
                features: frame.row(i),
                predicted_pm10,
                predicted_category,
            })
            .collect::<Vec<_>>();

        debug!(rows = records.len(), "batch scored");
        Ok(records)
    }
}
