//! Model registry trait definition

use super::stage::ModelStage;
use super::transition::{StageTransition, TransitionRequest};
use super::version::ModelVersion;
use crate::error::{Error, Result};
use crate::model::ModelRole;

/// Versioned model storage with stage transitions.
///
/// Methods take `&self`; implementations lock internally so one registry
/// can be shared by concurrent per-role decision runs.
pub trait ModelRegistry: Send + Sync {
    /// Register a new candidate version
    fn register(&self, role: ModelRole, artifact_uri: &str) -> Result<ModelVersion>;

    /// Get a model version
    fn get_version(&self, role: ModelRole, version: u32) -> Result<ModelVersion>;

    /// Latest version at a specific stage, `None` if there is none
    fn get_latest(&self, role: ModelRole, stage: ModelStage) -> Result<Option<ModelVersion>>;

    /// List all versions of a role, oldest first
    fn list_versions(&self, role: ModelRole) -> Result<Vec<ModelVersion>>;

    /// Current revision stamp of a role. Bumped by every transition.
    fn revision(&self, role: ModelRole) -> Result<u64>;

    /// Apply one stage change
    fn transition(&self, request: &TransitionRequest) -> Result<StageTransition>;

    /// Get transition history for a role, oldest first
    fn history(&self, role: ModelRole) -> Result<Vec<StageTransition>>;

    /// Make `candidate` Active and archive `previous`.
    ///
    /// The default issues two conditional transitions, promote first, so a
    /// failure in between leaves two Active versions rather than none. That
    /// failure comes back as [`Error::PartiallyApplied`] carrying the promote.
    /// Registries that can apply both under one lock should override this.
    fn promote_replacing(
        &self,
        role: ModelRole,
        candidate: u32,
        previous: Option<u32>,
        expected_revision: Option<u64>,
        reason: &str,
    ) -> Result<Vec<StageTransition>> {
        let mut promote = TransitionRequest::new(role, candidate, ModelStage::Active).with_reason(reason);
        promote.expected_revision = expected_revision;
        let promoted = self.transition(&promote)?;

        let mut applied = vec![promoted];
        if let Some(previous) = previous {
            let archive = TransitionRequest::new(role, previous, ModelStage::Archived)
                .at_revision(applied[0].revision)
                .with_reason(format!("replaced by v{candidate}"));
            match self.transition(&archive) {
                Ok(archived) => applied.push(archived),
                Err(source) => {
                    return Err(Error::PartiallyApplied { applied, source: Box::new(source) })
                }
            }
        }
        Ok(applied)
    }
}
