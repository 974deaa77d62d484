//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config`, or the platform config dir)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Name of the per-template configuration file. Always excluded from
/// copies into generated projects.
pub const TEMPLATE_CONFIG_FILENAME: &str = "stencil.json";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template library settings.
    pub templates: TemplatesConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Root directory holding `namespace/relative-path` template dirs.
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicitly passed `--config` file must exist and parse; the
    /// default location is optional and silently falls back to built-in
    /// defaults.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = match config_file {
            Some(path) => Some(path.clone()),
            None => {
                let path = Self::config_path();
                path.exists().then_some(path)
            }
        };

        match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }

    /// Path to the global key-value configuration (JSON), managed by
    /// `stencil config --global`.
    pub fn global_config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".stencil.global.json"))
    }

    /// The template library root: configured, or the platform data dir.
    pub fn templates_root(&self) -> PathBuf {
        self.templates.root.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("dev", "stencil", "stencil")
                .map(|d| d.data_dir().join("templates"))
                .unwrap_or_else(|| PathBuf::from("templates"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_template_root() {
        let config = AppConfig::default();
        assert!(config.templates.root.is_none());
        assert!(!config.output.no_color);
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[templates]\nroot = \"/srv/templates\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.templates_root(), PathBuf::from("/srv/templates"));
        assert!(!config.output.no_color);
    }

    #[test]
    fn templates_root_falls_back_to_a_default() {
        let config = AppConfig::default();
        assert!(!config.templates_root().as_os_str().is_empty());
    }
}
