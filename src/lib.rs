//! Model lifecycle governance for air-quality prediction.
//!
//! Two model roles predict from hourly air-quality observations: a regressor
//! for pm10 and a classifier for the AQI category. This crate decides, per
//! role, whether a newly trained Candidate may replace the Active version:
//!
//! - [`quality`]: declarative expectations every dataset must meet
//! - [`eval::drift`]: two-sample Kolmogorov–Smirnov drift detection
//! - [`eval::evaluator`]: role-specific metrics on held-out data
//! - [`registry`]: versioned model store with a Candidate → Active → Archived lifecycle
//! - [`governor`]: the promotion decision, one [`DecisionRecord`](governor::DecisionRecord) per run
//! - [`validation`]: gate, re-check the reference, detect drift
//! - [`serving`]: batch predictions from the Active pair
//!
//! # Toyota Way Principles
//!
//! - **Jidoka**: bad data stops the line at the quality gate
//! - **Andon**: drift and aborted decisions are always surfaced, never swallowed
//! - **Poka-yoke**: ties and partial information keep the existing Active version

pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod governor;
pub mod logging;
pub mod model;
pub mod quality;
pub mod registry;
pub mod serving;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::GovernanceConfig;
pub use error::{Error, ErrorKind, Result};
pub use governor::{DecisionRecord, Governor, Outcome};
pub use model::ModelRole;
pub use registry::{ModelRegistry, ModelStage};
