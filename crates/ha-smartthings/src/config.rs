//! Integration configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Options for the SmartThings integration
///
/// Every key is optional in YAML; missing keys take the defaults below.
/// Unknown keys are rejected. Commands, reads and optimistic writes always
/// address the device's `main` component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmartThingsConfig {
    /// Write the presumed effect of an acknowledged command into the
    /// device snapshot before the cloud confirms it
    pub optimistic: bool,

    /// When false, `stop` records playback as "paused" and `set_shuffle`
    /// writes into the playback status, as the integration always has.
    /// When true, `stop` records "stopped" and `set_shuffle` writes the
    /// shuffle attribute.
    pub fix_optimistic_targets: bool,

    /// Input sources whose playback status is meaningful
    pub controllable_sources: Vec<String>,
}

impl Default for SmartThingsConfig {
    fn default() -> Self {
        Self {
            optimistic: true,
            fix_optimistic_targets: false,
            controllable_sources: vec!["bluetooth".to_string(), "wifi".to_string()],
        }
    }
}

impl SmartThingsConfig {
    /// Parse and validate a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        debug!("Loading SmartThings config from {:?}", path);
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> ConfigResult<()> {
        if self.controllable_sources.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "controllable_sources".to_string(),
                reason: "source names must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Whether `source` is one of the controllable sources
    pub fn is_controllable_source(&self, source: &str) -> bool {
        self.controllable_sources.iter().any(|s| s == source)
    }
}
