//! Quality gate evaluation

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::expectation::{default_expectations, FieldExpectation, Rule};
use crate::data::{Column, Dataset};
use crate::error::{Error, Result};

/// One failed expectation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    /// Rule name, e.g. `not_null`
    pub rule: String,
    pub message: String,
    /// Records breaking the rule; 0 for dataset-level rules
    pub failing_rows: usize,
}

impl Violation {
    fn new(field: &str, rule: &str, message: String, failing_rows: usize) -> Self {
        Self { field: field.to_string(), rule: rule.to_string(), message, failing_rows }
    }
}

/// Outcome of a gate run. `passed` iff `violations` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub passed: bool,
    pub violations: Vec<Violation>,
}

impl GateResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self { passed: violations.is_empty(), violations }
    }

    /// One line per violation, `field rule: message`
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{} {}: {}", v.field, v.rule, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Turn a failing result into [`Error::GateViolation`]
    pub fn into_result(self) -> Result<Self> {
        if self.passed {
            Ok(self)
        } else {
            Err(Error::GateViolation { count: self.violations.len(), summary: self.summary() })
        }
    }
}

/// Check every expectation over every record, collecting all violations.
pub fn check(dataset: &Dataset, expectations: &[FieldExpectation]) -> GateResult {
    if dataset.is_empty() {
        return GateResult::from_violations(vec![Violation::new(
            "*",
            "non_empty",
            "dataset has no records".to_string(),
            0,
        )]);
    }

    let violations: Vec<Violation> =
        expectations.iter().filter_map(|e| check_expectation(dataset, e)).collect();

    let result = GateResult::from_violations(violations);
    if result.passed {
        debug!(records = dataset.len(), expectations = expectations.len(), "quality gate passed");
    } else {
        warn!(violations = result.violations.len(), summary = %result.summary(), "quality gate failed");
    }
    result
}

fn check_expectation(dataset: &Dataset, expectation: &FieldExpectation) -> Option<Violation> {
    let field = expectation.field.as_str();
    let rule = expectation.rule.name();

    let Some(column) = dataset.column(field) else {
        return Some(Violation::new(field, rule, "column is missing".to_string(), 0));
    };

    match &expectation.rule {
        Rule::Exists => None,
        Rule::NotNull => {
            let nulls = column.null_count();
            (nulls > 0).then(|| {
                Violation::new(field, rule, format!("{nulls} of {} values missing", column.len()), nulls)
            })
        }
        Rule::Between { min, max } => match column {
            Column::Numeric(values) => {
                let outside = values
                    .iter()
                    .flatten()
                    .filter(|v| !v.is_nan() && (**v < *min || **v > *max))
                    .count();
                (outside > 0).then(|| {
                    Violation::new(
                        field,
                        rule,
                        format!("{outside} value(s) outside [{min}, {max}]"),
                        outside,
                    )
                })
            }
            other => Some(Violation::new(
                field,
                rule,
                format!("column is {}, expected numeric", other.dtype()),
                0,
            )),
        },
    }
}

/// Declarative pass/fail check on dataset structure and value ranges
#[derive(Debug, Clone, PartialEq)]
pub struct QualityGate {
    expectations: Vec<FieldExpectation>,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(default_expectations())
    }
}

impl QualityGate {
    pub fn new(expectations: Vec<FieldExpectation>) -> Self {
        Self { expectations }
    }

    /// Add an expectation
    pub fn expect(mut self, expectation: FieldExpectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn expectations(&self) -> &[FieldExpectation] {
        &self.expectations
    }

    pub fn check(&self, dataset: &Dataset) -> GateResult {
        check(dataset, &self.expectations)
    }
}
