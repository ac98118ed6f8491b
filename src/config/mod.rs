//! Configuration loading for the executor

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::error::ExecError;
use crate::core::logging::DEFAULT_NAMESPACE;

/// Executor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Namespace attached to debug messages about failed operations
    pub log_namespace: String,

    /// Indent the serialized error list in debug messages
    pub pretty_errors: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            log_namespace: DEFAULT_NAMESPACE.to_string(),
            pretty_errors: true,
        }
    }
}

impl ExecutorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing keys take their default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ExecError> {
        if self.log_namespace.trim().is_empty() {
            return Err(ExecError::Config {
                message: "log_namespace must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
