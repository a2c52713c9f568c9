//! Model version metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stage::ModelStage;
use crate::model::ModelRole;

/// Model version metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    /// Model slot this version belongs to
    pub role: ModelRole,
    /// Version number (monotonically increasing per role)
    pub version: u32,
    /// Current stage
    pub stage: ModelStage,
    /// URI to model artifacts
    pub artifact_uri: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last stage change
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ModelVersion {
    /// Create a new candidate version
    pub fn new(role: ModelRole, version: u32, artifact_uri: &str) -> Self {
        Self {
            role,
            version,
            stage: ModelStage::Candidate,
            artifact_uri: artifact_uri.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} ({})", self.role, self.version, self.stage)
    }
}
