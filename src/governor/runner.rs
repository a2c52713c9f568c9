//! Per-role promotion decisions

use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::{error, info, warn};

use super::decision::{DecisionRecord, Outcome};
use super::rules::PromotionRule;
use super::sink::DecisionSink;
use crate::config::GovernanceConfig;
use crate::data::Dataset;
use crate::error::{Error, ErrorKind, Result};
use crate::eval::drift::{DriftReport, DriftSummary};
use crate::eval::{EvaluationRecord, EvaluationSet, ModelEvaluator};
use crate::model::{ModelLoader, ModelRole};
use crate::quality::QualityGate;
use crate::registry::{ModelRegistry, ModelStage, ModelVersion, TransitionRequest};

/// Decides, per role, whether the latest Candidate replaces the Active version.
///
/// Runs for the same role are serialised by a per-role lock; every registry
/// write is conditional on the revision read at the start of the attempt.
pub struct Governor<R, L> {
    registry: R,
    loader: L,
    config: GovernanceConfig,
    gate: QualityGate,
    evaluator: ModelEvaluator,
    locks: [Mutex<()>; 2],
    sink: Option<Box<dyn DecisionSink>>,
}

impl<R, L> std::fmt::Debug for Governor<R, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Governor")
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: ModelRegistry, L: ModelLoader> Governor<R, L> {
    /// Create a governor after validating `config`
    pub fn new(registry: R, loader: L, config: GovernanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry,
            loader,
            gate: QualityGate::new(config.expectations.clone()),
            config,
            evaluator: ModelEvaluator::new(),
            locks: [Mutex::new(()), Mutex::new(())],
            sink: None,
        })
    }

    /// Send every decision record to `sink`
    pub fn with_sink(mut self, sink: impl DecisionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Decide the fate of `role`'s latest candidate using `eval` as held-out data.
    ///
    /// Never fails: every abort path is reported in the returned record.
    pub fn run_role(&self, role: ModelRole, eval: &Dataset) -> DecisionRecord {
        self.decide(role, eval, None)
    }

    /// Like [`run_role`](Self::run_role), attaching the drift found on `eval`
    /// to the record so the decision can be read next to it.
    pub fn run_role_with_drift(
        &self,
        role: ModelRole,
        eval: &Dataset,
        drift: &DriftReport,
    ) -> DecisionRecord {
        self.decide(role, eval, Some(drift.summary()))
    }

    fn decide(&self, role: ModelRole, eval: &Dataset, drift: Option<DriftSummary>) -> DecisionRecord {
        let _guard = self.locks[role.index()].lock().unwrap_or_else(PoisonError::into_inner);

        let mut attempts = 0;
        let mut record = loop {
            attempts += 1;
            let mut record = DecisionRecord::new(role);
            match self.attempt(role, eval, &mut record) {
                Ok(()) => break record,
                // Only a conflict raised before anything was written is safe to re-read.
                Err(err @ Error::VersionConflict { .. })
                    if record.transitions.is_empty() && attempts <= self.config.conflict_retries =>
                {
                    warn!(role = %role, attempt = attempts, error = %err, "version conflict, re-reading");
                }
                Err(err) => {
                    self.abort(&mut record, err);
                    break record;
                }
            }
        };
        record.attempts = attempts;
        record.drift = drift;

        self.emit(&record);
        record
    }

    fn abort(&self, record: &mut DecisionRecord, err: Error) {
        let kind = err.kind();
        record.transitions.extend_from_slice(err.applied());
        record.new_active = record
            .transitions
            .iter()
            .rev()
            .find(|t| t.to_stage == ModelStage::Active)
            .map(|t| t.version);
        if record.new_active.is_some() {
            error!(
                role = %record.role,
                candidate = ?record.candidate,
                active = ?record.old_active,
                kind = %kind,
                error = %err,
                "decision aborted after promotion was applied"
            );
        } else {
            warn!(
                role = %record.role,
                candidate = ?record.candidate,
                active = ?record.old_active,
                kind = %kind,
                "decision aborted"
            );
        }
        record.outcome = Outcome::Aborted { kind };
        record.error = Some(err.to_string());
    }

    /// Run both roles in parallel. One role's failure never affects the other.
    pub fn run_all(&self, eval: &Dataset) -> Vec<DecisionRecord> {
        thread::scope(|scope| {
            let handles: Vec<_> = ModelRole::ALL
                .into_iter()
                .map(|role| (role, scope.spawn(move || self.run_role(role, eval))))
                .collect();
            handles
                .into_iter()
                .map(|(role, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        let mut record = DecisionRecord::new(role);
                        record.outcome = Outcome::Aborted { kind: ErrorKind::Registry };
                        record.error = Some("decision thread panicked".to_string());
                        record
                    })
                })
                .collect()
        })
    }

    fn attempt(&self, role: ModelRole, eval: &Dataset, record: &mut DecisionRecord) -> Result<()> {
        let revision = self.registry.revision(role)?;

        let Some(candidate) = self.registry.get_latest(role, ModelStage::Candidate)? else {
            info!(role = %role, "no candidate, nothing to decide");
            return Ok(());
        };
        record.candidate = Some(candidate.version);
        let active = self.registry.get_latest(role, ModelStage::Active)?;
        record.old_active = active.as_ref().map(|a| a.version);

        let (set, candidate_eval) = match self.evaluate_candidate(role, eval, &candidate) {
            Ok(evaluated) => evaluated,
            Err(err) if err.invalidates_candidate() => {
                return self.archive_invalid(&candidate, revision, err, record);
            }
            Err(err) => return Err(err),
        };
        record.candidate_metrics = Some(candidate_eval.metrics.clone());

        let Some(active) = active else {
            let promote = TransitionRequest::new(role, candidate.version, ModelStage::Active)
                .at_revision(revision)
                .with_reason("first deployment");
            record.transitions.push(self.registry.transition(&promote)?);
            record.new_active = Some(candidate.version);
            record.outcome = Outcome::FirstDeployment;
            info!(role = %role, candidate = candidate.version, active = "none", "first model for role promoted");
            return Ok(());
        };

        let active_eval = self.evaluator.evaluate_version(&self.loader, &active, &set)?;
        record.active_metrics = Some(active_eval.metrics.clone());

        let outcome = PromotionRule::for_role(role).evaluate(&candidate_eval.metrics, &active_eval.metrics);
        if outcome.holds {
            let reason = format!("beats v{}: {}", active.version, candidate_eval.metrics);
            let applied = self.registry.promote_replacing(
                role,
                candidate.version,
                Some(active.version),
                Some(revision),
                &reason,
            )?;
            record.transitions.extend(applied);
            record.new_active = Some(candidate.version);
            record.outcome = Outcome::Promoted;
            info!(
                role = %role,
                candidate = candidate.version,
                active = active.version,
                candidate_metrics = %candidate_eval.metrics,
                active_metrics = %active_eval.metrics,
                "candidate promoted, previous active archived"
            );
        } else {
            let archive = TransitionRequest::new(role, candidate.version, ModelStage::Archived)
                .at_revision(revision)
                .with_reason(format!("did not beat v{}", active.version));
            record.transitions.push(self.registry.transition(&archive)?);
            info!(
                role = %role,
                candidate = candidate.version,
                active = active.version,
                reasons = ?outcome.failed,
                "candidate rejected, active unchanged"
            );
            record.outcome = Outcome::Rejected { reasons: outcome.failed };
        }
        Ok(())
    }

    /// Gate the evaluation data and score the candidate on it
    fn evaluate_candidate(
        &self,
        role: ModelRole,
        eval: &Dataset,
        candidate: &ModelVersion,
    ) -> Result<(EvaluationSet, EvaluationRecord)> {
        self.gate.check(eval).into_result()?;
        let set = EvaluationSet::from_dataset(eval, &self.config.features, role)?;
        let evaluated = self.evaluator.evaluate_version(&self.loader, candidate, &set)?;
        Ok((set, evaluated))
    }

    fn archive_invalid(
        &self,
        candidate: &ModelVersion,
        revision: u64,
        err: Error,
        record: &mut DecisionRecord,
    ) -> Result<()> {
        let kind = err.kind();
        let archive = TransitionRequest::new(candidate.role, candidate.version, ModelStage::Archived)
            .at_revision(revision)
            .with_reason(format!("invalid candidate: {kind}"));
        record.transitions.push(self.registry.transition(&archive)?);
        warn!(
            role = %candidate.role,
            candidate = candidate.version,
            active = ?record.old_active,
            kind = %kind,
            error = %err,
            "candidate archived without comparison"
        );
        record.outcome = Outcome::CandidateInvalid { kind };
        record.error = Some(err.to_string());
        Ok(())
    }

    fn emit(&self, record: &DecisionRecord) {
        info!(
            role = %record.role,
            outcome = record.outcome.as_str(),
            candidate = ?record.candidate,
            active = ?record.serving(),
            drifted = ?record.drift.map(|d| d.drifted),
            "{record}"
        );
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.append(record) {
                warn!(role = %record.role, error = %err, "failed to write decision record");
            }
        }
    }
}
