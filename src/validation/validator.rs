//! Validation runner

use tracing::{error, info, warn};

use super::report::{Finding, ValidationReport};
use crate::config::GovernanceConfig;
use crate::data::Dataset;
use crate::error::Result;
use crate::eval::DriftDetector;
use crate::quality::QualityGate;

/// Quality gate plus drift detection over a reference/current pair
#[derive(Debug, Default)]
pub struct DataValidator {
    gate: QualityGate,
    detector: DriftDetector,
}

impl DataValidator {
    pub fn new(gate: QualityGate, detector: DriftDetector) -> Self {
        Self { gate, detector }
    }

    /// Build from configured expectations and drift thresholds
    pub fn from_config(config: &GovernanceConfig) -> Self {
        Self::new(QualityGate::new(config.expectations.clone()), DriftDetector::new(config.drift))
    }

    pub fn detector_mut(&mut self) -> &mut DriftDetector {
        &mut self.detector
    }

    /// Validate `current` against `reference`.
    ///
    /// A failing current gate stops the pipeline. A failing reference gate is
    /// reported as [`Finding::ReferenceCorrupted`] and drift is not computed.
    /// Errors only come from drift detection (e.g. differing numeric fields).
    pub fn validate(&self, reference: &Dataset, current: &Dataset) -> Result<ValidationReport> {
        let current_gate = self.gate.check(current);
        if !current_gate.passed {
            warn!(violations = current_gate.violations.len(), "current data failed the quality gate");
            let findings = vec![Finding::CurrentGateFailed { violations: current_gate.violations.len() }];
            return Ok(ValidationReport {
                current_gate,
                reference_gate: None,
                drift: None,
                findings,
                reference_refresh: false,
            });
        }

        let reference_gate = self.gate.check(reference);
        if !reference_gate.passed {
            error!(
                violations = reference_gate.violations.len(),
                summary = %reference_gate.summary(),
                "stored reference fails the quality gate"
            );
            let findings = vec![Finding::ReferenceCorrupted {
                violations: reference_gate.violations.len(),
                summary: reference_gate.summary(),
            }];
            return Ok(ValidationReport {
                current_gate,
                reference_gate: Some(reference_gate),
                drift: None,
                findings,
                reference_refresh: false,
            });
        }

        let drift = self.detector.detect(reference, current)?;
        let summary = drift.summary();
        let mut findings = Vec::new();
        if summary.has_drift() {
            let fields = drift.drifted_fields().into_iter().map(String::from).collect();
            findings.push(Finding::Drift { fields, dataset_drift: drift.dataset_drift });
        }
        let reference_refresh = !summary.has_drift();

        info!(
            tested = summary.tested,
            drifted = summary.drifted,
            warnings = summary.warnings,
            dataset_drift = drift.dataset_drift,
            reference_refresh,
            "validation complete"
        );

        Ok(ValidationReport {
            current_gate,
            reference_gate: Some(reference_gate),
            drift: Some(drift),
            findings,
            reference_refresh,
        })
    }
}
