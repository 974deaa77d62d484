//! Project configuration: the persisted `.stencil.json` key-value file.
//!
//! Discovered by walking up from the working directory until a config file
//! is found, stopping at the home directory; when nothing is found the
//! working directory itself is the project root. Its contents are
//! bulk-merged into the store before prompting, which is how answers
//! persist across invocations (first-write-wins: a stored answer is never
//! re-prompted).

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use stencil_core::domain::paths;

use crate::error::{CliError, CliResult};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".stencil.json";

/// A JSON key-value config file addressed with dotted paths. Used for both
/// the project config and the global config.
#[derive(Debug, Clone)]
pub struct JsonConfigFile {
    path: PathBuf,
    data: Map<String, Value>,
}

impl JsonConfigFile {
    /// Load a config file; a missing file is an empty config.
    pub fn load(path: impl Into<PathBuf>) -> CliResult<Self> {
        let path = path.into();
        let data = if path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|e| CliError::IoError {
                message: format!("reading {}", path.display()),
                source: e,
            })?;
            let value: Value =
                serde_json::from_str(&text).map_err(|e| CliError::ConfigError {
                    message: format!("Unable to parse configuration file: {}: {e}", path.display()),
                    source: None,
                })?;
            match value {
                Value::Object(map) => map,
                _ => {
                    return Err(CliError::ConfigError {
                        message: format!(
                            "Configuration file is not a JSON object: {}",
                            path.display()
                        ),
                        source: None,
                    });
                }
            }
        } else {
            Map::new()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        paths::get(&self.data, key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        paths::set(&mut self.data, key, value);
    }

    /// Persist with stable pretty formatting.
    pub fn save(&self) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
                    message: format!("creating {}", parent.display()),
                    source: e,
                })?;
            }
        }
        let mut text = serde_json::to_string_pretty(&Value::Object(self.data.clone()))
            .map_err(|e| CliError::ConfigError {
                message: format!("serializing {}", self.path.display()),
                source: Some(Box::new(e)),
            })?;
        text.push('\n');
        std::fs::write(&self.path, text).map_err(|e| CliError::IoError {
            message: format!("writing {}", self.path.display()),
            source: e,
        })
    }
}

/// Find the project root: the nearest ancestor of `start` (inclusive)
/// containing a project config file. The search stops at the home
/// directory; with no hit, `start` itself is the root.
pub fn discover_project_root(start: &Path) -> PathBuf {
    let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_CONFIG_FILENAME).exists() {
            return current;
        }
        if Some(&current) == home.as_ref() || !current.pop() {
            return start.to_path_buf();
        }
    }
}

/// Open the project configuration for `start`, discovering the root.
/// Returns the root and the (possibly empty) config.
pub fn open_project_config(start: &Path) -> CliResult<(PathBuf, JsonConfigFile)> {
    let root = discover_project_root(start);
    let config = JsonConfigFile::load(root.join(PROJECT_CONFIG_FILENAME))?;
    Ok((root, config))
}

// ── tests ─────────────────────────────────────────────────────────────────────
