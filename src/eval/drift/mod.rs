//! Drift Detection Module
//!
//! Compares a reference dataset with a current one, column by column, using
//! the two-sample Kolmogorov-Smirnov test, and rolls the per-field verdicts up
//! into one dataset-level drift flag.
//!
//! The detector only supplies evidence. Nothing here blocks a promotion.

mod detector;
mod statistical;
mod types;

#[cfg(test)]
mod tests;

pub use detector::DriftDetector;
pub use types::{DriftCallback, DriftReport, DriftSettings, DriftSummary, FieldDrift, Severity};

pub use statistical::{kolmogorov_q, ks_p_value, ks_statistic};
