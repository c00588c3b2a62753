//! Snapshot capture and configuration loading

use crate::assembler::ConfigAssembler;
use crate::error::{ConfigError, ConfigResult};
use crate::resolved::ResolvedConfiguration;
use crate::snapshot::EnvironmentSnapshot;
use crate::validation::Validatable;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration loader with environment variable support
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Environment variable prefix, stripped from captured names
    prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a loader that reads unprefixed variables
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Create a loader that only reads `{prefix}_NAME` variables
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Capture the process environment
    pub fn capture_env(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot::from_env_with_prefix(self.prefix.as_deref())
    }

    /// Read a YAML file of `NAME: value` pairs into a snapshot
    pub fn snapshot_from_file(&self, path: impl AsRef<Path>) -> ConfigResult<EnvironmentSnapshot> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let raw: BTreeMap<String, Value> = serde_yaml::from_str(&content)?;

        let mut pairs = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                _ => {
                    return Err(ConfigError::EnvError(format!(
                        "{} in {} must be a scalar value",
                        name,
                        path.display()
                    )))
                }
            };
            pairs.push((name, value));
        }

        log::debug!("Read {} inputs from {}", pairs.len(), path.display());
        Ok(EnvironmentSnapshot::from_pairs(pairs))
    }

    /// Capture a snapshot, layering the environment over an optional file
    pub fn capture(&self, env_file: Option<impl AsRef<Path>>) -> ConfigResult<EnvironmentSnapshot> {
        let env = self.capture_env();
        match env_file {
            Some(path) => Ok(self.snapshot_from_file(path)?.layered(&env)),
            None => Ok(env),
        }
    }

    /// Assemble and validate the configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<ResolvedConfiguration> {
        Self::resolve(&self.capture_env())
    }

    /// Assemble and validate from a file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<ResolvedConfiguration> {
        Self::resolve(&self.capture(Some(path))?)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, env_file: Option<impl AsRef<Path>>) -> ConfigResult<ResolvedConfiguration> {
        match env_file {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Assemble and validate an already captured snapshot
    pub fn resolve(snapshot: &EnvironmentSnapshot) -> ConfigResult<ResolvedConfiguration> {
        let config = ConfigAssembler::new().assemble(snapshot)?;
        config.validate()?;
        Ok(config)
    }
}
