//! Implementation of the `stencil config` subcommands.
//!
//! Reads and patches the project (`.stencil.json`) or global key-value
//! configuration using the same dotted-path addressing the store uses.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    project::{self, JsonConfigFile},
};

/// Execute a `stencil config` subcommand.
pub fn execute(cmd: ConfigCommands, _config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key, global } => {
            let file = open(global)?;
            match file.get(&key) {
                Some(value) => {
                    output.print(&render_value(value))?;
                    Ok(())
                }
                None => Err(CliError::KeyNotFound { key }),
            }
        }

        ConfigCommands::Set { key, value, global } => {
            let mut file = open(global)?;
            // Accept JSON literals (numbers, booleans, arrays); anything
            // that doesn't parse is stored as a plain string.
            let value: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value));
            file.set(&key, value);
            file.save()?;
            output.success(&format!("Set {key}"))?;
            Ok(())
        }

        ConfigCommands::List { global } => {
            let file = open(global)?;
            let pretty = serde_json::to_string_pretty(&Value::Object(file.data().clone()))
                .map_err(|e| CliError::ConfigError {
                    message: "serializing configuration".into(),
                    source: Some(Box::new(e)),
                })?;
            output.print(&pretty)?;
            Ok(())
        }

        ConfigCommands::Path { global } => {
            let file = open(global)?;
            output.print(&file.path().display().to_string())?;
            Ok(())
        }
    }
}

fn open(global: bool) -> CliResult<JsonConfigFile> {
    if global {
        JsonConfigFile::load(AppConfig::global_config_path())
    } else {
        let cwd = std::env::current_dir()?;
        let (_root, file) = project::open_project_config(&cwd)?;
        Ok(file)
    }
}

/// Strings print bare; everything else prints as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_render_bare() {
        assert_eq!(render_value(&json!("acme")), "acme");
    }

    #[test]
    fn containers_render_as_json() {
        assert_eq!(render_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(render_value(&json!([1, 2])), "[1,2]");
    }
}
