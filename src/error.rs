//! Error types with actionable diagnostics.
//!
//! Every failure the governance layer can hit maps onto one variant here, and
//! every variant carries enough context to act on without reading the source.
//! [`ErrorKind`] is the serialisable classifier written into decision records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ModelRole;
use crate::registry::{ModelStage, StageTransition};

/// Result type alias for governance operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the governance layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset columns do not match what the operation needs.
    #[error("Schema mismatch: {message}\n  → Check that the dataset carries the canonical feature, pm10 and category columns")]
    SchemaMismatch { message: String },

    /// A quality expectation failed on the dataset.
    #[error("Quality gate failed with {count} violation(s): {summary}\n  → Fix the upstream fill/cleaning step before evaluating on this data")]
    GateViolation { count: usize, summary: String },

    /// The dataset has no rows.
    #[error("Dataset is empty\n  → A reference or evaluation set needs at least one record")]
    EmptyDataset,

    /// A model artifact could not be loaded.
    #[error("Failed to load {role} model v{version}: {message}\n  → Check the artifact URI recorded in the registry")]
    ModelLoad { role: ModelRole, version: u32, message: String },

    /// A model produced predictions of the wrong length or kind.
    #[error("Prediction shape mismatch: expected {expected}, got {actual}")]
    PredictionShape { expected: String, actual: String },

    /// The registry could not be reached (transient).
    #[error("Model registry unavailable: {0}\n  → Retry the run; no state was changed")]
    RegistryUnavailable(String),

    /// The registry state changed since it was read (transient).
    #[error("Version conflict on {role}: expected revision {expected}, registry is at {actual}")]
    VersionConflict { role: ModelRole, expected: u64, actual: u64 },

    /// The requested version does not exist.
    #[error("Version not found: {role} v{version}")]
    VersionNotFound { role: ModelRole, version: u32 },

    /// The requested stage change is not part of the lifecycle.
    #[error("Invalid stage transition for {role} v{version}: {from} → {to}")]
    InvalidTransition { role: ModelRole, version: u32, from: ModelStage, to: ModelStage },

    /// Serving needs an Active version that does not exist.
    #[error("No active {0} model\n  → Run the governor to promote a candidate first")]
    NoActiveModel(ModelRole),

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}")]
    Config { field: String, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error in {path}: {message}")]
    Serialization { path: PathBuf, message: String },

    /// A multi-step registry write failed after some of its steps landed.
    #[error("{source}\n  → {} stage change(s) already applied; inspect the registry before retrying", .applied.len())]
    PartiallyApplied {
        applied: Vec<StageTransition>,
        #[source]
        source: Box<Error>,
    },

    /// An append-only sink rejected a write.
    #[error("Sink write failed: {0}")]
    Sink(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a configuration error for a named field.
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }

    /// Create a schema mismatch error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaMismatch { message: message.into() }
    }

    /// Classify the error for decision records.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            Self::GateViolation { .. } | Self::EmptyDataset => ErrorKind::GateViolation,
            Self::ModelLoad { .. } => ErrorKind::ModelLoad,
            Self::PredictionShape { .. } => ErrorKind::PredictionShape,
            Self::RegistryUnavailable(_) => ErrorKind::RegistryUnavailable,
            Self::VersionConflict { .. } => ErrorKind::VersionConflict,
            Self::VersionNotFound { .. }
            | Self::InvalidTransition { .. }
            | Self::NoActiveModel(_) => ErrorKind::Registry,
            Self::Config { .. } => ErrorKind::Config,
            Self::Io { .. } | Self::Serialization { .. } | Self::Sink(_) => ErrorKind::Io,
            Self::PartiallyApplied { source, .. } => source.kind(),
        }
    }

    /// Stage changes that landed before the failure, empty for single-step errors.
    pub fn applied(&self) -> &[StageTransition] {
        match self {
            Self::PartiallyApplied { applied, .. } => applied,
            _ => &[],
        }
    }

    /// Whether a retry could succeed without any change to inputs.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RegistryUnavailable(_) | Self::VersionConflict { .. })
    }

    /// Whether the error means the candidate itself is unusable.
    ///
    /// Candidates that hit one of these are archived; anything else leaves
    /// registry state as it was.
    pub fn invalidates_candidate(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::SchemaMismatch
                | ErrorKind::GateViolation
                | ErrorKind::ModelLoad
                | ErrorKind::PredictionShape
        )
    }
}

/// Serialisable failure classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    SchemaMismatch,
    GateViolation,
    ModelLoad,
    PredictionShape,
    RegistryUnavailable,
    VersionConflict,
    Registry,
    Config,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SchemaMismatch => "schema_mismatch",
            ErrorKind::GateViolation => "gate_violation",
            ErrorKind::ModelLoad => "model_load",
            ErrorKind::PredictionShape => "prediction_shape",
            ErrorKind::RegistryUnavailable => "registry_unavailable",
            ErrorKind::VersionConflict => "version_conflict",
            ErrorKind::Registry => "registry",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_has_actionable_message() {
        let err = Error::NoActiveModel(ModelRole::Regression);
        let msg = err.to_string();
        assert!(msg.contains("regression"));
        assert!(msg.contains("→"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(Error::RegistryUnavailable("timeout".into()).is_transient());
        assert!(Error::VersionConflict { role: ModelRole::Classification, expected: 1, actual: 2 }
            .is_transient());
        assert!(!Error::EmptyDataset.is_transient());
    }

    #[test]
    fn test_candidate_invalidating_errors() {
        assert!(Error::schema("missing pm10").invalidates_candidate());
        assert!(Error::EmptyDataset.invalidates_candidate());
        assert!(Error::ModelLoad {
            role: ModelRole::Regression,
            version: 3,
            message: "corrupt".into()
        }
        .invalidates_candidate());
        assert!(!Error::RegistryUnavailable("down".into()).invalidates_candidate());
        assert!(!Error::VersionConflict { role: ModelRole::Regression, expected: 0, actual: 1 }
            .invalidates_candidate());
    }

    #[test]
    fn test_partially_applied_keeps_cause_kind() {
        let err = Error::PartiallyApplied {
            applied: Vec::new(),
            source: Box::new(Error::RegistryUnavailable("archive timed out".into())),
        };
        assert_eq!(err.kind(), ErrorKind::RegistryUnavailable);
        assert!(!err.is_transient());
        assert!(!err.invalidates_candidate());
        assert!(err.to_string().contains("already applied"));
        assert!(Error::EmptyDataset.applied().is_empty());
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::PredictionShape).unwrap();
        assert_eq!(json, "\"prediction_shape\"");
        assert_eq!(ErrorKind::PredictionShape.to_string(), "prediction_shape");
    }

    #[test]
    fn test_io_error_context() {
        let err = Error::io("reading registry", std::io::Error::other("disk gone"));
        assert!(err.to_string().contains("reading registry"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
