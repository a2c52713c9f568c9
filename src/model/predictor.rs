//! Predictor and loader traits

use crate::data::FeatureFrame;
use crate::error::Result;
use crate::registry::ModelVersion;

/// Model output, one value per input row
#[derive(Debug, Clone, PartialEq)]
pub enum Predictions {
    Continuous(Vec<f64>),
    Categorical(Vec<String>),
}

impl Predictions {
    pub fn len(&self) -> usize {
        match self {
            Predictions::Continuous(v) => v.len(),
            Predictions::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short shape description for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Predictions::Continuous(v) => format!("{} continuous values", v.len()),
            Predictions::Categorical(v) => format!("{} categorical labels", v.len()),
        }
    }
}

/// A loaded model that can score a feature frame
pub trait Predictor: Send + Sync {
    /// Predict one value per row of `features`
    fn predict(&self, features: &FeatureFrame) -> Result<Predictions>;
}

/// Resolves a registered version to a loaded model.
///
/// Failures should surface as [`Error::ModelLoad`](crate::error::Error::ModelLoad).
pub trait ModelLoader: Send + Sync {
    fn load(&self, version: &ModelVersion) -> Result<Box<dyn Predictor>>;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureFrame) -> Result<Predictions> + Send + Sync,
{
    fn predict(&self, features: &FeatureFrame) -> Result<Predictions> {
        self(features)
    }
}
