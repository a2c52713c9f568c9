//! Shared fixtures for unit tests

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};

use crate::data::{
    AqiCategory, Column, Dataset, FeatureFrame, CATEGORY_COLUMN, DATE_COLUMN, FEATURES, PM10_COLUMN,
};
use crate::error::{Error, Result};
use crate::model::{ModelLoader, ModelRole, Predictions, Predictor};
use crate::registry::{
    InMemoryRegistry, ModelRegistry, ModelStage, ModelVersion, StageTransition, TransitionRequest,
};

/// Hourly observations starting 2025-01-01 with deterministic features.
///
/// `pm10(i)` gives the target for row `i`; the category follows the AQI band of pm10.
pub(crate) fn observations(n: usize, pm10: impl Fn(usize) -> f64) -> Dataset {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut ds = Dataset::new()
        .with_column(DATE_COLUMN, Column::timestamps((0..n).map(|i| start + Duration::hours(i as i64))))
        .unwrap();
    for (k, feature) in FEATURES.iter().enumerate() {
        let values = (0..n).map(|i| ((i * (k + 3)) % 17) as f64 + k as f64);
        ds.insert_column(*feature, Column::numeric(values)).unwrap();
    }
    let targets: Vec<f64> = (0..n).map(&pm10).collect();
    let labels: Vec<&str> = targets.iter().map(|&v| AqiCategory::from_eu_aqi(v).as_str()).collect();
    ds.insert_column(PM10_COLUMN, Column::numeric(targets)).unwrap();
    ds.insert_column(CATEGORY_COLUMN, Column::categorical(labels)).unwrap();
    ds
}

/// pm10 spread evenly over [5, 40]
pub(crate) fn clean_pm10(i: usize) -> f64 {
    5.0 + (i % 36) as f64
}

/// pm10 with a small spread (population variance 5.25), so error profiles
/// with MSE around 10 and explained variance 0.6-0.8 are reachable
pub(crate) fn narrow_pm10(i: usize) -> f64 {
    20.0 + (i % 8) as f64
}

/// Predictions whose MSE and explained variance against `y` hit the targets.
///
/// Errors are `mu + sigma * (+1/-1 alternating)`, so `y.len()` must be even.
pub(crate) fn predictions_with(y: &[f64], mse: f64, evs: f64) -> Vec<f64> {
    let n = y.len() as f64;
    let mean = y.iter().sum::<f64>() / n;
    let var_y = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let sigma2 = (1.0 - evs) * var_y;
    assert!(sigma2 <= mse, "unreachable profile: mse {mse} < residual variance {sigma2}");
    let mu = (mse - sigma2).sqrt();
    let sigma = sigma2.sqrt();
    y.iter()
        .enumerate()
        .map(|(i, v)| v + mu + if i % 2 == 0 { sigma } else { -sigma })
        .collect()
}

/// Copy of `truth` with the first `errors` labels swapped for a wrong class
pub(crate) fn labels_with_errors(truth: &[String], errors: usize) -> Vec<String> {
    truth
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i < errors {
                if label == "good" { "poor".to_string() } else { "good".to_string() }
            } else {
                label.clone()
            }
        })
        .collect()
}

/// What a scripted model does when loaded
#[derive(Debug, Clone)]
pub(crate) enum Script {
    Predict(Predictions),
    FailLoad,
}

/// Loader returning canned predictions per (role, version)
#[derive(Debug, Default)]
pub(crate) struct ScriptedLoader {
    scripts: Mutex<BTreeMap<(ModelRole, u32), Script>>,
    loads: AtomicUsize,
}

impl ScriptedLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, role: ModelRole, version: u32, script: Script) -> Self {
        self.scripts.lock().unwrap().insert((role, version), script);
        self
    }

    /// Regression model scoring exactly `mse` / `evs` on `dataset`
    pub(crate) fn regression(self, version: u32, dataset: &Dataset, mse: f64, evs: f64) -> Self {
        let y = dataset.column(PM10_COLUMN).unwrap().present_values();
        let script = Script::Predict(Predictions::Continuous(predictions_with(&y, mse, evs)));
        self.with(ModelRole::Regression, version, script)
    }

    /// Classification model getting `errors` labels wrong on `dataset`
    pub(crate) fn classification(self, version: u32, dataset: &Dataset, errors: usize) -> Self {
        let truth: Vec<String> = dataset
            .column(CATEGORY_COLUMN)
            .and_then(Column::as_categorical)
            .unwrap()
            .iter()
            .flatten()
            .cloned()
            .collect();
        let script = Script::Predict(Predictions::Categorical(labels_with_errors(&truth, errors)));
        self.with(ModelRole::Classification, version, script)
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelLoader for ScriptedLoader {
    fn load(&self, version: &ModelVersion) -> Result<Box<dyn Predictor>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let script = self.scripts.lock().unwrap().get(&(version.role, version.version)).cloned();
        match script {
            Some(Script::Predict(predictions)) => {
                Ok(Box::new(move |_: &FeatureFrame| -> Result<Predictions> { Ok(predictions.clone()) }))
            }
            Some(Script::FailLoad) | None => Err(Error::ModelLoad {
                role: version.role,
                version: version.version,
                message: "no such artifact".into(),
            }),
        }
    }
}

/// Registry relying on the trait's default promote-then-archive.
///
/// With a failure set, every transition to Archived fails with it.
#[derive(Debug, Default)]
pub(crate) struct TwoStepRegistry {
    pub(crate) inner: InMemoryRegistry,
    archive_failure: Option<fn() -> Error>,
}

impl TwoStepRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_archive(failure: fn() -> Error) -> Self {
        Self { inner: InMemoryRegistry::new(), archive_failure: Some(failure) }
    }
}

impl ModelRegistry for TwoStepRegistry {
    fn register(&self, role: ModelRole, artifact_uri: &str) -> Result<ModelVersion> {
        self.inner.register(role, artifact_uri)
    }
    fn get_version(&self, role: ModelRole, version: u32) -> Result<ModelVersion> {
        self.inner.get_version(role, version)
    }
    fn get_latest(&self, role: ModelRole, stage: ModelStage) -> Result<Option<ModelVersion>> {
        self.inner.get_latest(role, stage)
    }
    fn list_versions(&self, role: ModelRole) -> Result<Vec<ModelVersion>> {
        self.inner.list_versions(role)
    }
    fn revision(&self, role: ModelRole) -> Result<u64> {
        self.inner.revision(role)
    }
    fn transition(&self, request: &TransitionRequest) -> Result<StageTransition> {
        match self.archive_failure {
            Some(failure) if request.to == ModelStage::Archived => Err(failure()),
            _ => self.inner.transition(request),
        }
    }
    fn history(&self, role: ModelRole) -> Result<Vec<StageTransition>> {
        self.inner.history(role)
    }
}
