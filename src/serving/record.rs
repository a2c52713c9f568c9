use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One served prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// When the batch was scored
    pub timestamp: DateTime<Utc>,
    /// Observation time, when the input carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
    pub regression_version: u32,
    pub classification_version: u32,
    pub features: BTreeMap<String, f64>,
    pub predicted_pm10: f64,
    pub predicted_category: String,
}
