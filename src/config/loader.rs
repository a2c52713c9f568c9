//! YAML loading

use std::fs;
use std::path::Path;

use tracing::debug;

use super::schema::GovernanceConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};

impl GovernanceConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: GovernanceConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config("yaml", format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading config file {}", path.display()), e))?;
        let config = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), features = config.features.len(), "config loaded");
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::config("yaml", e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}
