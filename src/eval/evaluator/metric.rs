//! Evaluation metric definitions

use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::classification::Average;

/// Available evaluation metrics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Metric {
    // Classification
    /// Classification accuracy
    Accuracy,
    /// F1 score with averaging strategy
    F1(Average),
    // Regression
    /// Mean Absolute Error
    MAE,
    /// Mean Squared Error
    MSE,
    /// Explained variance score
    ExplainedVariance,
}

impl Metric {
    /// Whether higher values are better for this metric
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Metric::MSE | Metric::MAE)
    }

    /// Stable key used in serialized metric sets
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::F1(Average::Macro) => "f1_macro",
            Metric::F1(Average::Micro) => "f1_micro",
            Metric::F1(Average::Weighted) => "f1_weighted",
            Metric::MAE => "mae",
            Metric::MSE => "mse",
            Metric::ExplainedVariance => "explained_variance",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "accuracy" => Metric::Accuracy,
            "f1_macro" => Metric::F1(Average::Macro),
            "f1_micro" => Metric::F1(Average::Micro),
            "f1_weighted" => Metric::F1(Average::Weighted),
            "mae" => Metric::MAE,
            "mse" => Metric::MSE,
            "explained_variance" => Metric::ExplainedVariance,
            _ => return None,
        })
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::F1(avg) => write!(f, "F1({avg:?})"),
            Metric::Accuracy => write!(f, "Accuracy"),
            Metric::MAE => write!(f, "MAE"),
            Metric::MSE => write!(f, "MSE"),
            Metric::ExplainedVariance => write!(f, "EVS"),
        }
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.key().to_string()
    }
}

impl TryFrom<String> for Metric {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Metric::from_key(&value).ok_or_else(|| format!("unknown metric '{value}'"))
    }
}
