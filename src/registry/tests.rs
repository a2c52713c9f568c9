//! Tests for the in-memory and file-backed registries

use super::*;
use crate::error::{Error, ErrorKind};
use crate::model::ModelRole;
use crate::test_support::TwoStepRegistry;

const REG: ModelRole = ModelRole::Regression;
const CLS: ModelRole = ModelRole::Classification;

fn activate<R: ModelRegistry>(registry: &R, role: ModelRole, version: u32) {
    registry.transition(&TransitionRequest::new(role, version, ModelStage::Active)).unwrap();
}

#[test]
fn test_registry_register_model() {
    let registry = InMemoryRegistry::new();
    let model = registry.register(REG, "/path/v1").unwrap();

    assert_eq!(model.role, REG);
    assert_eq!(model.version, 1);
    assert_eq!(model.stage, ModelStage::Candidate);
}

#[test]
fn test_registry_versions_are_per_role() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/r1").unwrap();
    let r2 = registry.register(REG, "/path/r2").unwrap();
    let c1 = registry.register(CLS, "/path/c1").unwrap();

    assert_eq!(r2.version, 2);
    assert_eq!(c1.version, 1);
}

#[test]
fn test_registry_get_version_not_found() {
    let registry = InMemoryRegistry::new();
    let result = registry.get_version(REG, 1);
    assert!(matches!(result, Err(Error::VersionNotFound { version: 1, .. })));
}

#[test]
fn test_registry_get_latest_by_stage() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.register(REG, "/path/v2").unwrap();
    registry.register(REG, "/path/v3").unwrap();
    activate(&registry, REG, 1);

    let candidate = registry.get_latest(REG, ModelStage::Candidate).unwrap();
    let active = registry.get_latest(REG, ModelStage::Active).unwrap();
    let archived = registry.get_latest(REG, ModelStage::Archived).unwrap();

    assert_eq!(candidate.map(|m| m.version), Some(3));
    assert_eq!(active.map(|m| m.version), Some(1));
    assert!(archived.is_none());
}

#[test]
fn test_registry_get_latest_unknown_role_is_none() {
    let registry = InMemoryRegistry::new();
    assert!(registry.get_latest(CLS, ModelStage::Active).unwrap().is_none());
    assert!(registry.list_versions(CLS).unwrap().is_empty());
}

#[test]
fn test_registry_transition_records_history() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();

    let record = registry
        .transition(&TransitionRequest::new(REG, 1, ModelStage::Active).with_reason("first deployment"))
        .unwrap();

    assert_eq!(record.from_stage, ModelStage::Candidate);
    assert_eq!(record.to_stage, ModelStage::Active);
    assert_eq!(record.revision, 1);

    let history = registry.history(REG).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].reason.as_deref(), Some("first deployment"));
    assert!(registry.get_version(REG, 1).unwrap().updated_at.is_some());
}

#[test]
fn test_registry_invalid_transition() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.transition(&TransitionRequest::new(REG, 1, ModelStage::Archived)).unwrap();

    let err = registry.transition(&TransitionRequest::new(REG, 1, ModelStage::Active)).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition { from: ModelStage::Archived, to: ModelStage::Active, .. }
    ));
    assert_eq!(registry.revision(REG).unwrap(), 1);
}

#[test]
fn test_registry_revision_conflict() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.register(REG, "/path/v2").unwrap();
    let seen = registry.revision(REG).unwrap();

    activate(&registry, REG, 1);

    let err = registry
        .transition(&TransitionRequest::new(REG, 2, ModelStage::Active).at_revision(seen))
        .unwrap_err();
    assert!(matches!(err, Error::VersionConflict { expected: 0, actual: 1, .. }));
    assert_eq!(registry.get_version(REG, 2).unwrap().stage, ModelStage::Candidate);
}

#[test]
fn test_registry_revisions_are_per_role() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/r1").unwrap();
    registry.register(CLS, "/path/c1").unwrap();
    let cls_rev = registry.revision(CLS).unwrap();

    activate(&registry, REG, 1);

    registry
        .transition(&TransitionRequest::new(CLS, 1, ModelStage::Active).at_revision(cls_rev))
        .unwrap();
}

#[test]
fn test_promote_replacing_is_atomic() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.register(REG, "/path/v2").unwrap();
    activate(&registry, REG, 1);
    let rev = registry.revision(REG).unwrap();

    let applied = registry.promote_replacing(REG, 2, Some(1), Some(rev), "better metrics").unwrap();

    assert_eq!(applied.len(), 2);
    assert_eq!(applied[0].version, 2);
    assert_eq!(applied[1].version, 1);
    assert_eq!(applied[1].to_stage, ModelStage::Archived);
    assert_eq!(registry.count_in_stage(REG, ModelStage::Active), 1);
    assert_eq!(registry.get_latest(REG, ModelStage::Active).unwrap().map(|m| m.version), Some(2));
}

#[test]
fn test_promote_replacing_validates_before_applying() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.register(REG, "/path/v2").unwrap();

    let err = registry.promote_replacing(REG, 2, Some(9), None, "x").unwrap_err();

    assert!(matches!(err, Error::VersionNotFound { version: 9, .. }));
    assert_eq!(registry.get_version(REG, 2).unwrap().stage, ModelStage::Candidate);
    assert_eq!(registry.revision(REG).unwrap(), 0);
}

#[test]
fn test_injected_unavailable_fault() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.inject_fault(Fault::Unavailable);

    let err = registry.transition(&TransitionRequest::new(REG, 1, ModelStage::Active)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RegistryUnavailable);

    // fault consumed
    activate(&registry, REG, 1);
}

#[test]
fn test_injected_concurrent_write() {
    let registry = InMemoryRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    let rev = registry.revision(REG).unwrap();
    registry.inject_fault(Fault::ConcurrentWrite);

    let err = registry
        .transition(&TransitionRequest::new(REG, 1, ModelStage::Active).at_revision(rev))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VersionConflict);

    let rev = registry.revision(REG).unwrap();
    registry
        .transition(&TransitionRequest::new(REG, 1, ModelStage::Active).at_revision(rev))
        .unwrap();
}

#[test]
fn test_unavailable_switch() {
    let registry = InMemoryRegistry::new();
    registry.set_unavailable(true);
    assert!(registry.get_latest(REG, ModelStage::Candidate).unwrap_err().is_transient());
    registry.set_unavailable(false);
    assert!(registry.get_latest(REG, ModelStage::Candidate).is_ok());
}

#[test]
fn test_default_promote_then_archive_order() {
    let registry = TwoStepRegistry::new();
    registry.register(REG, "/path/v1").unwrap();
    registry.register(REG, "/path/v2").unwrap();
    activate(&registry, REG, 1);
    let rev = registry.revision(REG).unwrap();

    let applied = registry.promote_replacing(REG, 2, Some(1), Some(rev), "better").unwrap();

    let order: Vec<(u32, ModelStage)> = applied.iter().map(|t| (t.version, t.to_stage)).collect();
    assert_eq!(order, vec![(2, ModelStage::Active), (1, ModelStage::Archived)]);
    assert_eq!(registry.inner.count_in_stage(REG, ModelStage::Active), 1);
}

#[test]
fn test_default_promote_failure_between_steps_leaves_two_active() {
    let registry =
        TwoStepRegistry::failing_archive(|| Error::RegistryUnavailable("archive timed out".into()));
    registry.register(REG, "/path/v1").unwrap();
    registry.register(REG, "/path/v2").unwrap();
    activate(&registry, REG, 1);
    let rev = registry.revision(REG).unwrap();

    let err = registry.promote_replacing(REG, 2, Some(1), Some(rev), "better").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RegistryUnavailable);
    let promoted: Vec<(u32, ModelStage)> = err.applied().iter().map(|t| (t.version, t.to_stage)).collect();
    assert_eq!(promoted, vec![(2, ModelStage::Active)]);
    assert!(matches!(err, Error::PartiallyApplied { .. }));
    assert_eq!(registry.inner.count_in_stage(REG, ModelStage::Active), 2);
}

mod json_file {
    use super::*;

    #[test]
    fn test_json_registry_persists_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");

        {
            let registry = JsonFileRegistry::open(&path).unwrap();
            registry.register(REG, "/models/r1").unwrap();
            registry.register(REG, "/models/r2").unwrap();
            activate(&registry, REG, 1);
            registry.promote_replacing(REG, 2, Some(1), Some(1), "better").unwrap();
        }

        let reopened = JsonFileRegistry::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.revision(REG).unwrap(), 3);
        assert_eq!(reopened.get_version(REG, 1).unwrap().stage, ModelStage::Archived);
        assert_eq!(reopened.get_version(REG, 2).unwrap().stage, ModelStage::Active);
        assert_eq!(reopened.history(REG).unwrap().len(), 3);
    }

    #[test]
    fn test_json_registry_rejected_write_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let registry = JsonFileRegistry::open(&path).unwrap();
        registry.register(CLS, "/models/c1").unwrap();

        let err = registry
            .transition(&TransitionRequest::new(CLS, 1, ModelStage::Active).at_revision(5))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionConflict);

        let reopened = JsonFileRegistry::open(&path).unwrap();
        assert_eq!(reopened.get_version(CLS, 1).unwrap().stage, ModelStage::Candidate);
    }

    #[test]
    fn test_json_registry_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileRegistry::open(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
