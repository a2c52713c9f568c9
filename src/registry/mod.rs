//! Model Registry with stage transitions
//!
//! Versions flow: Candidate -> Active -> Archived (or Candidate -> Archived).
//! At most one version per role is Active at a time; every transition bumps
//! the role's revision, which callers pass back to make writes conditional.
//!
//! # Example
//!
//! ```ignore
//! use aqi_governance::registry::{InMemoryRegistry, ModelRegistry, ModelStage, TransitionRequest};
//!
//! let registry = InMemoryRegistry::new();
//! let v1 = registry.register(ModelRole::Regression, "models/rf_regression/1")?;
//! let rev = registry.revision(ModelRole::Regression)?;
//! registry.transition(&TransitionRequest::new(v1.role, v1.version, ModelStage::Active).at_revision(rev))?;
//! ```

mod json_file;
mod memory;
mod stage;
mod state;
mod traits;
mod transition;
mod version;

#[cfg(test)]
mod tests;

pub use json_file::JsonFileRegistry;
pub use memory::{Fault, InMemoryRegistry};
pub use stage::ModelStage;
pub use traits::ModelRegistry;
pub use transition::{StageTransition, TransitionRequest};
pub use version::ModelVersion;
