//! Serving with the Active models
//!
//! Loads the Active version of both roles once and scores batches of
//! observations, producing one [`PredictionRecord`] per row. Records can be
//! appended to any [`PredictionSink`].

mod active;
mod record;
mod sink;


pub use active::ActiveModels;
pub use record::PredictionRecord;
pub use sink::{InMemoryPredictionSink, JsonLinesPredictionSink, PredictionSink};
