//! Registry state shared by the in-memory and file-backed registries

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::stage::ModelStage;
use super::transition::{StageTransition, TransitionRequest};
use super::version::ModelVersion;
use crate::error::{Error, Result};
use crate::model::ModelRole;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct RoleEntry {
    versions: BTreeMap<u32, ModelVersion>,
    revision: u64,
    history: Vec<StageTransition>,
}

/// Versions, revision counters and history for every role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RegistryState {
    roles: BTreeMap<ModelRole, RoleEntry>,
}

impl RegistryState {
    pub(crate) fn register(&mut self, role: ModelRole, artifact_uri: &str) -> ModelVersion {
        let entry = self.roles.entry(role).or_default();
        let version = entry.versions.keys().max().copied().unwrap_or(0) + 1;
        let model = ModelVersion::new(role, version, artifact_uri);
        entry.versions.insert(version, model.clone());
        model
    }

    pub(crate) fn get_version(&self, role: ModelRole, version: u32) -> Result<ModelVersion> {
        self.roles
            .get(&role)
            .and_then(|entry| entry.versions.get(&version))
            .cloned()
            .ok_or(Error::VersionNotFound { role, version })
    }

    pub(crate) fn get_latest(&self, role: ModelRole, stage: ModelStage) -> Option<ModelVersion> {
        self.roles.get(&role).and_then(|entry| {
            entry.versions.values().filter(|m| m.stage == stage).max_by_key(|m| m.version).cloned()
        })
    }

    pub(crate) fn list_versions(&self, role: ModelRole) -> Vec<ModelVersion> {
        self.roles.get(&role).map(|entry| entry.versions.values().cloned().collect()).unwrap_or_default()
    }

    pub(crate) fn revision(&self, role: ModelRole) -> u64 {
        self.roles.get(&role).map_or(0, |entry| entry.revision)
    }

    pub(crate) fn history(&self, role: ModelRole) -> Vec<StageTransition> {
        self.roles.get(&role).map(|entry| entry.history.clone()).unwrap_or_default()
    }

    /// Simulate a concurrent writer by moving the revision without a stage change
    pub(crate) fn bump_revision(&mut self, role: ModelRole) -> u64 {
        let entry = self.roles.entry(role).or_default();
        entry.revision += 1;
        entry.revision
    }

    fn check_revision(&self, role: ModelRole, expected: Option<u64>) -> Result<()> {
        let actual = self.revision(role);
        match expected {
            Some(expected) if expected != actual => Err(Error::VersionConflict { role, expected, actual }),
            _ => Ok(()),
        }
    }

    fn check_transition(&self, role: ModelRole, version: u32, to: ModelStage) -> Result<ModelStage> {
        let from = self.get_version(role, version)?.stage;
        if !from.can_transition_to(to) {
            return Err(Error::InvalidTransition { role, version, from, to });
        }
        Ok(from)
    }

    fn apply(&mut self, role: ModelRole, version: u32, to: ModelStage, reason: Option<String>) -> Result<StageTransition> {
        let entry = self.roles.entry(role).or_default();
        let model = entry.versions.get_mut(&version).ok_or(Error::VersionNotFound { role, version })?;

        let from_stage = model.stage;
        let now = Utc::now();
        model.stage = to;
        model.updated_at = Some(now);
        entry.revision += 1;

        let record = StageTransition {
            role,
            version,
            from_stage,
            to_stage: to,
            timestamp: now,
            reason,
            revision: entry.revision,
        };
        entry.history.push(record.clone());
        Ok(record)
    }

    pub(crate) fn transition(&mut self, request: &TransitionRequest) -> Result<StageTransition> {
        self.check_revision(request.role, request.expected_revision)?;
        self.check_transition(request.role, request.version, request.to)?;
        self.apply(request.role, request.version, request.to, request.reason.clone())
    }

    /// Both transitions are validated before either is applied
    pub(crate) fn promote_replacing(
        &mut self,
        role: ModelRole,
        candidate: u32,
        previous: Option<u32>,
        expected_revision: Option<u64>,
        reason: &str,
    ) -> Result<Vec<StageTransition>> {
        self.check_revision(role, expected_revision)?;
        self.check_transition(role, candidate, ModelStage::Active)?;
        if let Some(previous) = previous {
            self.check_transition(role, previous, ModelStage::Archived)?;
        }

        let mut applied = vec![self.apply(role, candidate, ModelStage::Active, Some(reason.to_string()))?];
        if let Some(previous) = previous {
            applied.push(self.apply(
                role,
                previous,
                ModelStage::Archived,
                Some(format!("replaced by v{candidate}")),
            )?);
        }
        Ok(applied)
    }
}
