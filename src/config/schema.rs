//! Configuration schema

use serde::{Deserialize, Serialize};

use crate::data::{default_features, Dataset};
use crate::error::Result;
use crate::eval::DriftSettings;
use crate::quality::{default_expectations, FieldExpectation};

/// Settings for one governance deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Drift thresholds
    pub drift: DriftSettings,
    /// Predictor columns fed to both model roles
    pub features: Vec<String>,
    /// Quality gate rules applied to reference and evaluation data
    pub expectations: Vec<FieldExpectation>,
    /// Re-reads after a version conflict raised before any write
    pub conflict_retries: u32,
    /// Share of records held out for evaluation by the chronological split
    pub test_ratio: f64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            drift: DriftSettings::default(),
            features: default_features(),
            expectations: default_expectations(),
            conflict_retries: 1,
            test_ratio: 0.1,
        }
    }
}

impl GovernanceConfig {
    /// Split `dataset` into (train, held-out evaluation) at `test_ratio`, latest rows held out
    pub fn split_holdout(&self, dataset: &Dataset) -> Result<(Dataset, Dataset)> {
        dataset.split_chronological(self.test_ratio)
    }
}
