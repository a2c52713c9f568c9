//! Promotion rules (conjunctive metric requirements)

use serde::{Deserialize, Serialize};

use crate::eval::{Average, Metric, MetricSet};
use crate::model::ModelRole;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Gt,
    Lt,
}

impl Comparison {
    /// Check if value satisfies comparison with threshold. NaN never does.
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Gt => value > threshold,
            Comparison::Lt => value < threshold,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Lt => "<",
        }
    }
}

/// `candidate.metric <comparison> active.metric`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRequirement {
    pub metric: Metric,
    pub comparison: Comparison,
}

impl MetricRequirement {
    /// Requirement that the candidate strictly improves on `metric`
    pub fn improves(metric: Metric) -> Self {
        let comparison = if metric.higher_is_better() { Comparison::Gt } else { Comparison::Lt };
        Self { metric, comparison }
    }
}

/// Result of applying a rule to a candidate/active pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Every requirement held
    pub holds: bool,
    /// Human-readable reason per failed requirement
    pub failed: Vec<String>,
}

/// Candidate replaces Active only if every requirement holds. Ties fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRule {
    requirements: Vec<MetricRequirement>,
}

impl PromotionRule {
    pub fn new(requirements: Vec<MetricRequirement>) -> Self {
        Self { requirements }
    }

    /// Regression: lower MSE and higher explained variance.
    /// Classification: higher accuracy and higher weighted F1.
    pub fn for_role(role: ModelRole) -> Self {
        let metrics = match role {
            ModelRole::Regression => [Metric::MSE, Metric::ExplainedVariance],
            ModelRole::Classification => [Metric::Accuracy, Metric::F1(Average::Weighted)],
        };
        Self::new(metrics.into_iter().map(MetricRequirement::improves).collect())
    }

    pub fn requirements(&self) -> &[MetricRequirement] {
        &self.requirements
    }

    pub fn evaluate(&self, candidate: &MetricSet, active: &MetricSet) -> RuleOutcome {
        let mut failed = Vec::new();
        for req in &self.requirements {
            match (candidate.get(req.metric), active.get(req.metric)) {
                (Some(c), Some(a)) if req.comparison.check(c, a) => {}
                (Some(c), Some(a)) => failed.push(format!(
                    "{}: candidate {c:.4} is not {} active {a:.4}",
                    req.metric,
                    req.comparison.as_str()
                )),
                _ => failed.push(format!("{}: missing from evaluation", req.metric)),
            }
        }
        RuleOutcome { holds: failed.is_empty(), failed }
    }
}
