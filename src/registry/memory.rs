//! In-memory model registry implementation

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use super::stage::ModelStage;
use super::state::RegistryState;
use super::traits::ModelRegistry;
use super::transition::{StageTransition, TransitionRequest};
use super::version::ModelVersion;
use crate::error::{Error, Result};
use crate::model::ModelRole;

/// Failure to inject into the next write, for exercising recovery paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The write fails as if the registry timed out
    Unavailable,
    /// Another writer moves the role's revision just before the write lands
    ConcurrentWrite,
}

/// In-memory model registry.
///
/// Promotion and archival of the replaced version happen under one write
/// lock, so readers never observe two Active versions.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: RwLock<RegistryState>,
    faults: Mutex<VecDeque<Fault>>,
    unavailable: AtomicBool,
}

impl InMemoryRegistry {
    /// Create a new in-memory registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fault for the next write (`transition` or `promote_replacing`)
    pub fn inject_fault(&self, fault: Fault) {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner).push_back(fault);
    }

    /// Make every call fail with `RegistryUnavailable` until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::RegistryUnavailable("in-memory registry switched off".into()));
        }
        Ok(())
    }

    fn take_fault(&self, role: ModelRole, state: &mut RegistryState) -> Result<()> {
        let fault = self.faults.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        match fault {
            Some(Fault::Unavailable) => Err(Error::RegistryUnavailable("injected timeout".into())),
            Some(Fault::ConcurrentWrite) => {
                state.bump_revision(role);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&RegistryState) -> T) -> Result<T> {
        self.ensure_available()?;
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&state))
    }

    fn write<T>(&self, role: ModelRole, f: impl FnOnce(&mut RegistryState) -> Result<T>) -> Result<T> {
        self.ensure_available()?;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.take_fault(role, &mut state)?;
        f(&mut state)
    }

    /// Number of versions of `role` currently in `stage`
    pub fn count_in_stage(&self, role: ModelRole, stage: ModelStage) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.list_versions(role).iter().filter(|m| m.stage == stage).count()
    }
}

impl ModelRegistry for InMemoryRegistry {
    fn register(&self, role: ModelRole, artifact_uri: &str) -> Result<ModelVersion> {
        self.ensure_available()?;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        Ok(state.register(role, artifact_uri))
    }

    fn get_version(&self, role: ModelRole, version: u32) -> Result<ModelVersion> {
        self.read(|s| s.get_version(role, version))?
    }

    fn get_latest(&self, role: ModelRole, stage: ModelStage) -> Result<Option<ModelVersion>> {
        self.read(|s| s.get_latest(role, stage))
    }

    fn list_versions(&self, role: ModelRole) -> Result<Vec<ModelVersion>> {
        self.read(|s| s.list_versions(role))
    }

    fn revision(&self, role: ModelRole) -> Result<u64> {
        self.read(|s| s.revision(role))
    }

    fn transition(&self, request: &TransitionRequest) -> Result<StageTransition> {
        self.write(request.role, |s| s.transition(request))
    }

    fn history(&self, role: ModelRole) -> Result<Vec<StageTransition>> {
        self.read(|s| s.history(role))
    }

    fn promote_replacing(
        &self,
        role: ModelRole,
        candidate: u32,
        previous: Option<u32>,
        expected_revision: Option<u64>,
        reason: &str,
    ) -> Result<Vec<StageTransition>> {
        self.write(role, |s| s.promote_replacing(role, candidate, previous, expected_revision, reason))
    }
}
