//! Quality Gate
//!
//! Validates a dataset against a fixed schema/range contract before it may
//! be used as a reference or evaluation set. Every expectation is evaluated
//! over every record and all violations are reported together.
//!
//! # Example
//!
//! ```ignore
//! use aqi_governance::quality::QualityGate;
//!
//! let result = QualityGate::default().check(&dataset);
//! if !result.passed {
//!     eprintln!("{}", result.summary());
//! }
//! ```

mod expectation;
mod gate;


pub use expectation::{default_expectations, FieldExpectation, Rule};
pub use gate::{check, GateResult, QualityGate, Violation};
