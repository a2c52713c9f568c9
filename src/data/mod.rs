//! Tabular observation data
//!
//! Column-oriented datasets of timestamped air-quality and weather records,
//! plus the row-aligned views the evaluator consumes.
//!
//! - `dataset`: [`Dataset`] and [`Column`], chronological train/test split
//! - `frame`: [`FeatureFrame`] (model inputs) and [`Target`] (labels)
//! - `category`: EU AQI category derivation

mod category;
mod dataset;
mod frame;


pub use category::AqiCategory;
pub use dataset::{Column, Dataset};
pub use frame::{FeatureFrame, Target};

/// Timestamp column, the dataset's unique key
pub const DATE_COLUMN: &str = "date";

/// Particulate concentration, the regression target
pub const PM10_COLUMN: &str = "pm10";

/// Air-quality category, the classification target
pub const CATEGORY_COLUMN: &str = "category";

/// European AQI, the source of the category label
pub const EU_AQI_COLUMN: &str = "eu_aqi";

/// Canonical predictors shared by both model roles
pub const FEATURES: [&str; 9] = [
    "pm2_5",
    "carbon_monoxide",
    "carbon_dioxide",
    "uv_index",
    "temperature_2m",
    "relative_humidity_2m",
    "rain",
    "snowfall",
    "is_day",
];

/// Canonical feature list as owned strings
pub fn default_features() -> Vec<String> {
    FEATURES.iter().map(ToString::to_string).collect()
}
