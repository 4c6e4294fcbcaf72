//! Configuration file handling for fungi-cli

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default prediction service URL (the service's development default)
const DEFAULT_SERVER: &str = "http://localhost:5000";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default server URL
    pub server: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("fungi-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, server: Option<&str>, no_color: bool) -> MergedConfig {
        MergedConfig {
            server: server
                .map(String::from)
                .or_else(|| self.server.clone())
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            no_color: no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub server: String,
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_args_override_file() {
        let config = Config {
            server: Some("http://configured:9000".to_string()),
            no_color: Some(false),
        };

        let merged = config.merge_with_args(Some("http://flag:8000"), true);
        assert_eq!(merged.server, "http://flag:8000");
        assert!(merged.no_color);
    }

    #[test]
    fn test_merge_falls_back_to_file_then_default() {
        let config = Config {
            server: Some("http://configured:9000".to_string()),
            no_color: None,
        };
        let merged = config.merge_with_args(None, false);
        assert_eq!(merged.server, "http://configured:9000");
        assert!(!merged.no_color);

        let merged = Config::default().merge_with_args(None, false);
        assert_eq!(merged.server, DEFAULT_SERVER);
    }

    #[test]
    fn test_load_from_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = \"http://lab:5000\"\nno_color = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.as_deref(), Some("http://lab:5000"));
        assert_eq!(config.no_color, Some(true));
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = [not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
