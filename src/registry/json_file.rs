//! JSON file-backed model registry

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::stage::ModelStage;
use super::state::RegistryState;
use super::traits::ModelRegistry;
use super::transition::{StageTransition, TransitionRequest};
use super::version::ModelVersion;
use crate::error::{Error, Result};
use crate::model::ModelRole;

/// Registry persisted as one JSON document.
///
/// Every write is applied to a copy of the state, saved, and only then
/// made visible, so the file and memory never disagree.
#[derive(Debug)]
pub struct JsonFileRegistry {
    path: PathBuf,
    state: Mutex<RegistryState>,
}

impl JsonFileRegistry {
    /// Create or open a JSON file registry
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::io(format!("reading registry {}", path.display()), e))?;
            serde_json::from_str(&content)
                .map_err(|e| Error::Serialization { path: path.clone(), message: e.to_string() })?
        } else {
            RegistryState::default()
        };

        Ok(Self { path, state: Mutex::new(state) })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &RegistryState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| Error::Serialization { path: self.path.clone(), message: e.to_string() })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| Error::io(format!("writing registry {}", tmp.display()), e))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| Error::io(format!("replacing registry {}", self.path.display()), e))?;
        debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&RegistryState) -> T) -> T {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write<T>(&self, f: impl FnOnce(&mut RegistryState) -> Result<T>) -> Result<T> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = state.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *state = next;
        Ok(out)
    }
}

impl ModelRegistry for JsonFileRegistry {
    fn register(&self, role: ModelRole, artifact_uri: &str) -> Result<ModelVersion> {
        self.write(|s| Ok(s.register(role, artifact_uri)))
    }

    fn get_version(&self, role: ModelRole, version: u32) -> Result<ModelVersion> {
        self.read(|s| s.get_version(role, version))
    }

    fn get_latest(&self, role: ModelRole, stage: ModelStage) -> Result<Option<ModelVersion>> {
        Ok(self.read(|s| s.get_latest(role, stage)))
    }

    fn list_versions(&self, role: ModelRole) -> Result<Vec<ModelVersion>> {
        Ok(self.read(|s| s.list_versions(role)))
    }

    fn revision(&self, role: ModelRole) -> Result<u64> {
        Ok(self.read(|s| s.revision(role)))
    }

    fn transition(&self, request: &TransitionRequest) -> Result<StageTransition> {
        self.write(|s| s.transition(request))
    }

    fn history(&self, role: ModelRole) -> Result<Vec<StageTransition>> {
        Ok(self.read(|s| s.history(role)))
    }

    fn promote_replacing(
        &self,
        role: ModelRole,
        candidate: u32,
        previous: Option<u32>,
        expected_revision: Option<u64>,
        reason: &str,
    ) -> Result<Vec<StageTransition>> {
        self.write(|s| s.promote_replacing(role, candidate, previous, expected_revision, reason))
    }
}
