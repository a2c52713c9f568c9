//! Stage transition requests and records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::ModelStage;
use crate::model::ModelRole;

/// A conditional stage change.
///
/// With `expected_revision` set, the registry refuses the change with
/// [`VersionConflict`](crate::Error::VersionConflict) when the role's revision moved since it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub role: ModelRole,
    pub version: u32,
    pub to: ModelStage,
    pub expected_revision: Option<u64>,
    pub reason: Option<String>,
}

impl TransitionRequest {
    pub fn new(role: ModelRole, version: u32, to: ModelStage) -> Self {
        Self { role, version, to, expected_revision: None, reason: None }
    }

    /// Only apply if the role is still at `revision`
    pub fn at_revision(mut self, revision: u64) -> Self {
        self.expected_revision = Some(revision);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Stage transition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    pub role: ModelRole,
    /// Version
    pub version: u32,
    /// Previous stage
    pub from_stage: ModelStage,
    /// New stage
    pub to_stage: ModelStage,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Reason for transition
    pub reason: Option<String>,
    /// Role revision after this transition
    pub revision: u64,
}
