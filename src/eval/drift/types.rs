//! Drift settings and report types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tunable thresholds for drift detection
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftSettings {
    /// A field drifts when its KS p-value is below this
    pub significance: f64,
    /// Dataset drift when at least this share of tested fields drifted
    pub drift_share: f64,
    /// Warning band: p-values below `significance / warning_multiplier`
    pub warning_multiplier: f64,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self { significance: 0.05, drift_share: 0.5, warning_multiplier: 0.8 }
    }
}

/// How far a field's p-value is from the threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No drift detected
    None,
    /// Close to the threshold, log and continue
    Warning,
    /// Significant shift
    Critical,
}

/// Drift verdict for one numeric field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDrift {
    /// Field name
    pub feature: String,
    /// KS statistic (max distance between empirical CDFs)
    pub statistic: f64,
    /// Asymptotic p-value
    pub p_value: f64,
    /// Whether drift was detected
    pub drifted: bool,
    /// Severity of the drift
    pub severity: Severity,
    /// Non-missing reference values compared
    pub reference_size: usize,
    /// Non-missing current values compared
    pub current_size: usize,
}

/// Full result of comparing two datasets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Per-field verdicts, keyed by field name
    pub per_field: BTreeMap<String, FieldDrift>,
    /// Fields with no non-missing values on one side, not tested
    pub skipped: Vec<String>,
    /// Share of tested fields that drifted
    pub drift_share: f64,
    /// Whether the dataset as a whole drifted
    pub dataset_drift: bool,
}

impl DriftReport {
    /// Names of drifted fields, sorted
    pub fn drifted_fields(&self) -> Vec<&str> {
        self.per_field.values().filter(|f| f.drifted).map(|f| f.feature.as_str()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDrift> {
        self.per_field.get(name)
    }

    /// Counts per verdict
    pub fn summary(&self) -> DriftSummary {
        let mut summary = DriftSummary { tested: self.per_field.len(), ..DriftSummary::default() };
        for field in self.per_field.values() {
            summary.drifted += usize::from(field.drifted);
            match field.severity {
                Severity::Warning => summary.warnings += 1,
                Severity::Critical => summary.critical += 1,
                Severity::None => {}
            }
        }
        summary
    }
}

/// Per-verdict counts over the tested fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSummary {
    pub tested: usize,
    pub drifted: usize,
    /// Close to the threshold but not drifted
    pub warnings: usize,
    pub critical: usize,
}

impl DriftSummary {
    pub fn has_critical(&self) -> bool {
        self.critical > 0
    }

    pub fn has_drift(&self) -> bool {
        self.drifted > 0
    }

    /// Drifted fields as a percentage of tested ones
    pub fn drift_percentage(&self) -> f64 {
        match self.tested {
            0 => 0.0,
            tested => 100.0 * self.drifted as f64 / tested as f64,
        }
    }
}

/// Invoked by the detector whenever a field drifts (Andon cord)
pub type DriftCallback = Box<dyn Fn(&DriftReport) + Send + Sync>;
