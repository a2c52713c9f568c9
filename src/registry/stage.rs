//! Model lifecycle stages

use serde::{Deserialize, Serialize};

/// Model lifecycle stages.
///
/// Versions flow Candidate -> Active -> Archived, or Candidate -> Archived
/// when rejected. Archived is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStage {
    /// Trained, not yet deployed
    Candidate,
    /// Deployed and serving predictions
    Active,
    /// Retired, kept for audit
    Archived,
}

impl ModelStage {
    pub const ALL: [ModelStage; 3] = [ModelStage::Candidate, ModelStage::Active, ModelStage::Archived];

    /// Check if transition to target stage is valid
    pub fn can_transition_to(&self, target: ModelStage) -> bool {
        matches!(
            (self, target),
            (ModelStage::Candidate, ModelStage::Active)
                | (ModelStage::Candidate, ModelStage::Archived)
                | (ModelStage::Active, ModelStage::Archived)
        )
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStage::Candidate => "Candidate",
            ModelStage::Active => "Active",
            ModelStage::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for ModelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
