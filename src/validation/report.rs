//! Validation report types

use serde::{Deserialize, Serialize};

use crate::eval::DriftReport;
use crate::quality::GateResult;

/// Something the pipeline wants an operator to look at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    /// Current data failed the gate; nothing downstream ran
    CurrentGateFailed { violations: usize },
    /// The stored reference no longer passes the gate
    ReferenceCorrupted { violations: usize, summary: String },
    /// At least one field drifted
    Drift { fields: Vec<String>, dataset_drift: bool },
}

/// Result of validating a (reference, current) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub current_gate: GateResult,
    /// `None` when the current gate failed first
    pub reference_gate: Option<GateResult>,
    /// `None` unless both gates passed
    pub drift: Option<DriftReport>,
    pub findings: Vec<Finding>,
    /// Current data may replace the reference
    pub reference_refresh: bool,
}

impl ValidationReport {
    /// Both gates passed
    pub fn gates_passed(&self) -> bool {
        self.current_gate.passed && self.reference_gate.as_ref().is_some_and(|g| g.passed)
    }

    /// Whether the current dataset may be used for evaluation
    pub fn current_usable(&self) -> bool {
        self.current_gate.passed
    }

    pub fn reference_corrupted(&self) -> bool {
        self.findings.iter().any(|f| matches!(f, Finding::ReferenceCorrupted { .. }))
    }
}
