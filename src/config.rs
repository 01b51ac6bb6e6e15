//! Engine configuration file handling.
//!
//! Settings the scripting layer would otherwise decide per deployment: which
//! path convention to emit and how deep template references may nest.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::path::PathStyle;
use crate::engine::template::DEFAULT_MAX_DEPTH;

/// Upper bound accepted for `max_depth`
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// Engine configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path convention for canonicalization (defaults to the host's)
    pub style: PathStyle,
    /// Maximum nesting of `{...}` references in a template
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            style: PathStyle::host(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            anyhow::bail!(
                "max_depth {} exceeds the limit of {}",
                self.max_depth,
                MAX_DEPTH_LIMIT
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::new();
        assert_eq!(config.style, PathStyle::host());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_depth_bounds() {
        let mut config = EngineConfig::new();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        config.max_depth = MAX_DEPTH_LIMIT + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds the limit"));

        config.max_depth = MAX_DEPTH_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lbm.json");

        let config = EngineConfig {
            style: PathStyle::Windows,
            max_depth: 16,
        };
        config.save_to_file(&path).unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lbm.json");
        fs::write(&path, r#"{ "style": "unix" }"#).unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.style, PathStyle::Unix);
        assert_eq!(loaded.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_load_errors_carry_context() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = EngineConfig::load_from_file(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration"));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{ "style": "amiga" }"#).unwrap();
        let err = EngineConfig::load_from_file(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration JSON"));
    }
}
