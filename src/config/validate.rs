//! Configuration validation logic

use super::schema::GovernanceConfig;
use crate::error::{Error, Result};
use crate::quality::Rule;

/// Validate a governance configuration
///
/// Checks:
/// - Thresholds are inside their open/closed unit intervals
/// - Feature list is non-empty and has no blanks or duplicates
/// - Range expectations have `min <= max`
pub fn validate_config(config: &GovernanceConfig) -> Result<()> {
    let drift = &config.drift;
    if !(drift.significance > 0.0 && drift.significance < 1.0) {
        return Err(Error::config(
            "drift.significance",
            format!("{} (must be in (0, 1))", drift.significance),
        ));
    }
    if !(drift.drift_share > 0.0 && drift.drift_share <= 1.0) {
        return Err(Error::config(
            "drift.drift_share",
            format!("{} (must be in (0, 1])", drift.drift_share),
        ));
    }
    if !(drift.warning_multiplier > 0.0 && drift.warning_multiplier <= 1.0) {
        return Err(Error::config(
            "drift.warning_multiplier",
            format!("{} (must be in (0, 1])", drift.warning_multiplier),
        ));
    }

    if config.features.is_empty() {
        return Err(Error::config("features", "at least one feature is required"));
    }
    let mut seen = std::collections::BTreeSet::new();
    for feature in &config.features {
        if feature.trim().is_empty() {
            return Err(Error::config("features", "feature names must not be blank"));
        }
        if !seen.insert(feature.as_str()) {
            return Err(Error::config("features", format!("duplicate feature '{feature}'")));
        }
    }

    for expectation in &config.expectations {
        if let Rule::Between { min, max } = expectation.rule {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(Error::config(
                    "expectations",
                    format!("{}: min must not exceed max", expectation.field),
                ));
            }
        }
    }

    if !(config.test_ratio > 0.0 && config.test_ratio < 1.0) {
        return Err(Error::config("test_ratio", format!("{} (must be in (0, 1))", config.test_ratio)));
    }

    Ok(())
}
