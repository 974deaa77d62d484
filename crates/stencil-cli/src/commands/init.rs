//! Implementation of the `stencil init` command.

use crate::{
    cli::{GlobalArgs, InitArgs},
    error::{CliError, CliResult},
    output::OutputManager,
    project::{JsonConfigFile, PROJECT_CONFIG_FILENAME},
};

/// Execute the `stencil init` command: create an empty project
/// configuration in the current directory, marking it as a project root.
pub fn execute(args: InitArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let path = std::env::current_dir()?.join(PROJECT_CONFIG_FILENAME);

    if path.exists() {
        if !args.force {
            return Err(CliError::ConfigError {
                message: format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ),
                source: None,
            });
        }
        // Overwriting: start from an empty config, not the existing one.
        std::fs::remove_file(&path)?;
    }

    JsonConfigFile::load(path.clone())?.save()?;

    output.success(&format!("Created {}", path.display()))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // execute() touches the process working directory, so unit coverage
    // stays on the config primitives; the full command runs in the
    // integration tests.

    #[test]
    fn fresh_config_saves_an_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_CONFIG_FILENAME);
        JsonConfigFile::load(path.clone()).unwrap().save().unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}\n");
    }
}
