//! Drift detector implementation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use super::statistical::{ks_p_value, ks_statistic};
use super::types::{DriftCallback, DriftReport, DriftSettings, FieldDrift, Severity};
use crate::data::Dataset;
use crate::error::{Error, Result};

/// Drift detector with a KS test per numeric field and callbacks
pub struct DriftDetector {
    settings: DriftSettings,
    callbacks: Vec<DriftCallback>,
}

impl std::fmt::Debug for DriftDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriftDetector")
            .field("settings", &self.settings)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new(DriftSettings::default())
    }
}

impl DriftDetector {
    /// Create a new drift detector
    pub fn new(settings: DriftSettings) -> Self {
        Self { settings, callbacks: Vec::new() }
    }

    pub fn settings(&self) -> &DriftSettings {
        &self.settings
    }

    /// Register callback for drift events (Andon Cord)
    ///
    /// Callbacks are invoked by `detect` when at least one field drifted.
    pub fn on_drift<F>(&mut self, callback: F)
    where
        F: Fn(&DriftReport) + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Compare every shared numeric field of `current` against `reference`.
    ///
    /// Both datasets must expose the same set of numeric columns; anything else
    /// is a [`Error::SchemaMismatch`] rather than a partial comparison.
    pub fn detect(&self, reference: &Dataset, current: &Dataset) -> Result<DriftReport> {
        if reference.is_empty() || current.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let ref_fields: BTreeSet<&str> = reference.numeric_columns().into_iter().collect();
        let cur_fields: BTreeSet<&str> = current.numeric_columns().into_iter().collect();
        if ref_fields != cur_fields {
            let only_ref: Vec<&str> = ref_fields.difference(&cur_fields).copied().collect();
            let only_cur: Vec<&str> = cur_fields.difference(&ref_fields).copied().collect();
            return Err(Error::schema(format!(
                "numeric fields differ: only in reference {only_ref:?}, only in current {only_cur:?}"
            )));
        }

        let mut per_field = BTreeMap::new();
        let mut skipped = Vec::new();

        for name in ref_fields {
            let (Some(ref_col), Some(cur_col)) = (reference.column(name), current.column(name))
            else {
                continue;
            };
            let ref_values = ref_col.present_values();
            let cur_values = cur_col.present_values();

            if ref_values.is_empty() || cur_values.is_empty() {
                warn!(field = name, "no values to compare, field skipped");
                skipped.push(name.to_string());
                continue;
            }

            let result = self.compare_columns(name, &ref_values, &cur_values);
            debug!(
                field = name,
                statistic = result.statistic,
                p_value = result.p_value,
                drifted = result.drifted,
                "ks test"
            );
            per_field.insert(name.to_string(), result);
        }

        let tested = per_field.len();
        let drifted = per_field.values().filter(|f: &&FieldDrift| f.drifted).count();
        let drift_share = if tested == 0 { 0.0 } else { drifted as f64 / tested as f64 };
        let dataset_drift = tested > 0 && drift_share >= self.settings.drift_share;

        let report = DriftReport { per_field, skipped, drift_share, dataset_drift };

        if dataset_drift {
            warn!(drifted, tested, drift_share, "dataset drift detected");
        } else {
            info!(drifted, tested, drift_share, "no dataset drift");
        }

        if drifted > 0 {
            for callback in &self.callbacks {
                callback(&report);
            }
        }

        Ok(report)
    }

    /// Run the KS test on one pair of columns with missing values already dropped
    pub fn compare_columns(&self, feature: &str, reference: &[f64], current: &[f64]) -> FieldDrift {
        let statistic = ks_statistic(reference, current);
        let p_value = ks_p_value(statistic, reference.len(), current.len());
        let (drifted, severity) = self.classify_result(p_value);

        FieldDrift {
            feature: feature.to_string(),
            statistic,
            p_value,
            drifted,
            severity,
            reference_size: reference.len(),
            current_size: current.len(),
        }
    }

    /// Classify result based on p-value and the significance threshold
    fn classify_result(&self, p_value: f64) -> (bool, Severity) {
        let threshold = self.settings.significance;
        if p_value < threshold {
            (true, Severity::Critical)
        } else if p_value < threshold / self.settings.warning_multiplier {
            (false, Severity::Warning)
        } else {
            (false, Severity::None)
        }
    }
}
