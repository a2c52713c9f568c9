//! Model roles

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{CATEGORY_COLUMN, PM10_COLUMN};
use crate::eval::{Average, Metric};

/// The two deployed model slots. Each role has its own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    /// Predicts pm10 concentration
    Regression,
    /// Predicts the AQI category
    Classification,
}

impl ModelRole {
    pub const ALL: [ModelRole; 2] = [ModelRole::Regression, ModelRole::Classification];

    /// Column holding the ground truth for this role
    pub fn target_column(&self) -> &'static str {
        match self {
            ModelRole::Regression => PM10_COLUMN,
            ModelRole::Classification => CATEGORY_COLUMN,
        }
    }

    /// Metrics computed when evaluating a model in this role
    pub fn metrics(&self) -> &'static [Metric] {
        match self {
            ModelRole::Regression => &[Metric::MAE, Metric::MSE, Metric::ExplainedVariance],
            ModelRole::Classification => &[Metric::Accuracy, Metric::F1(Average::Weighted)],
        }
    }

    /// Registry model name
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Regression => "regression",
            ModelRole::Classification => "classification",
        }
    }

    /// Dense index, for per-role tables
    pub(crate) fn index(&self) -> usize {
        match self {
            ModelRole::Regression => 0,
            ModelRole::Classification => 1,
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
