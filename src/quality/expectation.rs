//! Declarative field expectations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{CATEGORY_COLUMN, DATE_COLUMN, PM10_COLUMN};

/// A rule checked against one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// The column must be present
    Exists,
    /// No record may be missing a value
    NotNull,
    /// Every present value must lie in `[min, max]`
    Between { min: f64, max: f64 },
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Exists => "exists",
            Rule::NotNull => "not_null",
            Rule::Between { .. } => "between",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Between { min, max } => write!(f, "between [{min}, {max}]"),
            other => f.write_str(other.name()),
        }
    }
}

/// A rule keyed by field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExpectation {
    pub field: String,
    #[serde(flatten)]
    pub rule: Rule,
}

impl FieldExpectation {
    pub fn exists(field: impl Into<String>) -> Self {
        Self { field: field.into(), rule: Rule::Exists }
    }

    pub fn not_null(field: impl Into<String>) -> Self {
        Self { field: field.into(), rule: Rule::NotNull }
    }

    pub fn between(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self { field: field.into(), rule: Rule::Between { min, max } }
    }
}

impl fmt::Display for FieldExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

/// Active expectation set for air-quality observations
pub fn default_expectations() -> Vec<FieldExpectation> {
    vec![
        FieldExpectation::exists(DATE_COLUMN),
        FieldExpectation::not_null(PM10_COLUMN),
        FieldExpectation::between(PM10_COLUMN, 0.0, 500.0),
        FieldExpectation::not_null(CATEGORY_COLUMN),
    ]
}
