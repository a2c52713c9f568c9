//! Evaluation results

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::Metric;
use crate::model::ModelRole;

/// Metric values keyed by metric
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet {
    scores: BTreeMap<Metric, f64>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, metric: Metric, score: f64) -> Self {
        self.insert(metric, score);
        self
    }

    pub fn insert(&mut self, metric: Metric, score: f64) {
        self.scores.insert(metric, score);
    }

    /// Get score for a specific metric
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.scores.get(&metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.scores.iter().map(|(m, s)| (*m, *s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl fmt::Display for MetricSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(m, s)| format!("{m}: {s:.3}")).collect();
        f.write_str(&parts.join(", "))
    }
}

/// Metrics for one model version on one evaluation set. Not persisted here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub role: ModelRole,
    pub version: u32,
    pub metrics: MetricSet,
    /// Rows scored
    pub samples: usize,
    /// Wall time for load + predict + score
    pub duration_ms: f64,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }
}
