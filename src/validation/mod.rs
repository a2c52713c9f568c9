//! Data validation pipeline
//!
//! Gates the current dataset, re-checks the stored reference, compares the
//! two for drift and decides whether the current data may become the new
//! reference.

mod report;
mod validator;


pub use report::{Finding, ValidationReport};
pub use validator::DataValidator;
