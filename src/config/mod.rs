//! Governance configuration
//!
//! Declarative YAML configuration for thresholds, features and quality
//! expectations. Every field has a default, so an empty document is valid.
//!
//! # Example
//!
//! ```yaml
//! drift:
//!   significance: 0.05
//!   drift_share: 0.5
//! features: [pm2_5, carbon_monoxide, temperature_2m]
//! conflict_retries: 1
//! ```

mod loader;
mod schema;
mod validate;


pub use schema::GovernanceConfig;
pub use validate::validate_config;
