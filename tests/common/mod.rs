//! Fixtures shared by the integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;

use aqi_governance::data::{AqiCategory, Column, Dataset, FeatureFrame, CATEGORY_COLUMN, DATE_COLUMN, FEATURES, PM10_COLUMN};
use aqi_governance::model::{ModelLoader, ModelRole, Predictions, Predictor};
use aqi_governance::registry::ModelVersion;
use aqi_governance::{Error, Result};
use chrono::{Duration, TimeZone, Utc};

/// Hourly observations with deterministic features; category follows pm10
pub fn observations(n: usize, pm10: impl Fn(usize) -> f64) -> Dataset {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let mut ds = Dataset::new()
        .with_column(DATE_COLUMN, Column::timestamps((0..n).map(|i| start + Duration::hours(i as i64))))
        .unwrap();
    for (k, feature) in FEATURES.iter().enumerate() {
        let values = (0..n).map(|i| ((i * (k + 5)) % 23) as f64 + k as f64);
        ds.insert_column(*feature, Column::numeric(values)).unwrap();
    }
    let targets: Vec<f64> = (0..n).map(&pm10).collect();
    let labels: Vec<&str> = targets.iter().map(|&v| AqiCategory::from_eu_aqi(v).as_str()).collect();
    ds.insert_column(PM10_COLUMN, Column::numeric(targets)).unwrap();
    ds.insert_column(CATEGORY_COLUMN, Column::categorical(labels)).unwrap();
    ds
}

/// pm10 spread over [5, 40]
pub fn clean_pm10(i: usize) -> f64 {
    5.0 + (i % 36) as f64
}

/// pm10 in [20, 27]; small enough variance to reach any MSE above 5.25
pub fn narrow_pm10(i: usize) -> f64 {
    20.0 + (i % 8) as f64
}

/// Replace one column of `ds`
pub fn with_pm10(mut ds: Dataset, values: Vec<f64>) -> Dataset {
    ds.insert_column(PM10_COLUMN, Column::numeric(values)).unwrap();
    ds
}

pub fn pm10_of(ds: &Dataset) -> Vec<f64> {
    ds.column(PM10_COLUMN).unwrap().present_values()
}

/// Predictions hitting exactly `mse` and explained variance `evs` against `y` (even length)
pub fn predictions_with(y: &[f64], mse: f64, evs: f64) -> Vec<f64> {
    let n = y.len() as f64;
    let mean = y.iter().sum::<f64>() / n;
    let var_y = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let sigma2 = (1.0 - evs) * var_y;
    let mu = (mse - sigma2).sqrt();
    let sigma = sigma2.sqrt();
    y.iter().enumerate().map(|(i, v)| v + mu + if i % 2 == 0 { sigma } else { -sigma }).collect()
}

/// Loader serving canned predictions per (role, version)
#[derive(Debug, Default)]
pub struct FixtureLoader {
    models: BTreeMap<(ModelRole, u32), Predictions>,
}

impl FixtureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regression(mut self, version: u32, ds: &Dataset, mse: f64, evs: f64) -> Self {
        let predictions = predictions_with(&pm10_of(ds), mse, evs);
        self.models.insert((ModelRole::Regression, version), Predictions::Continuous(predictions));
        self
    }

    /// Classifier that gets the first `errors` rows wrong
    pub fn classification(mut self, version: u32, ds: &Dataset, errors: usize) -> Self {
        let labels = ds
            .column(CATEGORY_COLUMN)
            .and_then(Column::as_categorical)
            .unwrap()
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, label)| match (i < errors, label.as_str()) {
                (true, "good") => "poor".to_string(),
                (true, _) => "good".to_string(),
                (false, _) => label.clone(),
            })
            .collect();
        self.models.insert((ModelRole::Classification, version), Predictions::Categorical(labels));
        self
    }
}

impl ModelLoader for FixtureLoader {
    fn load(&self, version: &ModelVersion) -> Result<Box<dyn Predictor>> {
        let predictions = self.models.get(&(version.role, version.version)).cloned().ok_or_else(|| {
            Error::ModelLoad {
                role: version.role,
                version: version.version,
                message: format!("nothing at {}", version.artifact_uri),
            }
        })?;
        Ok(Box::new(move |_: &FeatureFrame| -> Result<Predictions> { Ok(predictions.clone()) }))
    }
}
