//! Decision records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::eval::drift::DriftSummary;
use crate::eval::MetricSet;
use crate::model::ModelRole;
use crate::registry::StageTransition;

/// What a decision run did for one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// No candidate was waiting
    NoCandidate,
    /// No version was Active; the candidate was promoted unconditionally
    FirstDeployment,
    /// The candidate beat the Active version and replaced it
    Promoted,
    /// The candidate did not beat the Active version and was archived
    Rejected { reasons: Vec<String> },
    /// The candidate failed the gate or could not be evaluated and was archived
    CandidateInvalid { kind: ErrorKind },
    /// The run stopped early; `transitions` lists any change that still landed
    Aborted { kind: ErrorKind },
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::NoCandidate => "no_candidate",
            Outcome::FirstDeployment => "first_deployment",
            Outcome::Promoted => "promoted",
            Outcome::Rejected { .. } => "rejected",
            Outcome::CandidateInvalid { .. } => "candidate_invalid",
            Outcome::Aborted { .. } => "aborted",
        }
    }

    /// Failure classifier, for the outcomes that carry one
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::CandidateInvalid { kind } | Outcome::Aborted { kind } => Some(*kind),
            _ => None,
        }
    }
}

/// Advisory record of one decision run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub role: ModelRole,
    pub timestamp: DateTime<Utc>,
    /// Candidate version considered, if any
    pub candidate: Option<u32>,
    /// Active version when the run read the registry
    pub old_active: Option<u32>,
    /// Version made Active by this run; `None` means unchanged
    pub new_active: Option<u32>,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub candidate_metrics: Option<MetricSet>,
    pub active_metrics: Option<MetricSet>,
    /// Error message on failure paths
    pub error: Option<String>,
    /// Decision attempts, more than one after a version conflict
    pub attempts: u32,
    /// Stage changes applied, in order
    pub transitions: Vec<StageTransition>,
    /// Drift found on the evaluation data, when the caller ran detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift: Option<DriftSummary>,
}

impl DecisionRecord {
    pub(crate) fn new(role: ModelRole) -> Self {
        Self {
            role,
            timestamp: Utc::now(),
            candidate: None,
            old_active: None,
            new_active: None,
            outcome: Outcome::NoCandidate,
            candidate_metrics: None,
            active_metrics: None,
            error: None,
            attempts: 1,
            transitions: Vec::new(),
            drift: None,
        }
    }

    /// Whether the Active version changed
    pub fn active_changed(&self) -> bool {
        self.new_active.is_some()
    }

    /// Version serving after the run
    pub fn serving(&self) -> Option<u32> {
        self.new_active.or(self.old_active)
    }
}

fn version(v: Option<u32>) -> String {
    v.map_or_else(|| "none".to_string(), |v| format!("v{v}"))
}

impl fmt::Display for DecisionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (candidate {}, active {} -> {})",
            self.role,
            self.outcome.as_str(),
            version(self.candidate),
            version(self.old_active),
            if self.active_changed() { version(self.new_active) } else { "unchanged".to_string() }
        )?;
        if let Some(error) = &self.error {
            write!(f, ": {}", error.lines().next().unwrap_or_default())?;
        }
        Ok(())
    }
}
