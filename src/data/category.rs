//! EU AQI category labels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Air-quality category on the European AQI scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "poor")]
    Poor,
    #[serde(rename = "very poor")]
    VeryPoor,
    #[serde(rename = "extremely poor")]
    ExtremelyPoor,
}

impl AqiCategory {
    /// All categories, best to worst
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Fair,
        AqiCategory::Moderate,
        AqiCategory::Poor,
        AqiCategory::VeryPoor,
        AqiCategory::ExtremelyPoor,
    ];

    /// Bucket a European AQI value. Band upper bounds are inclusive.
    pub fn from_eu_aqi(aqi: f64) -> Self {
        if aqi <= 20.0 {
            AqiCategory::Good
        } else if aqi <= 40.0 {
            AqiCategory::Fair
        } else if aqi <= 60.0 {
            AqiCategory::Moderate
        } else if aqi <= 80.0 {
            AqiCategory::Poor
        } else if aqi <= 100.0 {
            AqiCategory::VeryPoor
        } else {
            AqiCategory::ExtremelyPoor
        }
    }

    /// Label as stored in the category column
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiCategory::Good => "good",
            AqiCategory::Fair => "fair",
            AqiCategory::Moderate => "moderate",
            AqiCategory::Poor => "poor",
            AqiCategory::VeryPoor => "very poor",
            AqiCategory::ExtremelyPoor => "extremely poor",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AqiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown AQI category '{s}'"))
    }
}
