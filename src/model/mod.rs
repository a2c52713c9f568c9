//! Model roles and the trainable-model capability
//!
//! Estimator internals live outside this crate. The governance layer only
//! needs to load an artifact for a registered version and ask it for
//! predictions over a [`FeatureFrame`](crate::data::FeatureFrame).

mod predictor;
mod role;

pub use predictor::{ModelLoader, Predictions, Predictor};
pub use role::ModelRole;
