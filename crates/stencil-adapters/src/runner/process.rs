//! Process execution for `runCommand` and `commandExists`.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use stencil_core::{
    application::{ports::CommandRunner, ApplicationError},
    error::{StencilError, StencilResult},
};

/// Runs commands through the shell, awaited synchronously.
///
/// When a `base_command` is configured, commands starting with it are
/// re-dispatched through the current executable instead of the shell, so
/// template-invoked subcommands compose with this CLI's own command set
/// and configuration layout.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    base_command: Option<String>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the CLI name whose commands are dispatched through the
    /// current executable.
    pub fn with_base_command(name: impl Into<String>) -> Self {
        Self {
            base_command: Some(name.into()),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &str, dir: &Path) -> StencilResult<()> {
        let prefix = self.base_command.as_ref().map(|base| format!("{base} "));
        let status = if let Some(rest) = prefix.as_deref().and_then(|p| command.strip_prefix(p)) {
            debug!(%command, "dispatching through current executable");
            let exe = std::env::current_exe().map_err(|_| failed(command))?;
            Command::new(exe)
                .args(rest.split_whitespace())
                .current_dir(dir)
                .status()
        } else {
            Command::new("sh")
                .arg("-c")
                .arg(command)
                .current_dir(dir)
                .status()
        };

        let status = status.map_err(|_| failed(command))?;
        if !status.success() {
            return Err(failed(command));
        }
        Ok(())
    }

    fn exists(&self, command: &str) -> bool {
        // Paths with a separator are checked directly; bare names are
        // scanned for on PATH.
        if command.contains(std::path::MAIN_SEPARATOR) {
            return Path::new(command).is_file();
        }
        let Some(path) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path).any(|dir| dir.join(command).is_file())
    }
}

fn failed(command: &str) -> StencilError {
    ApplicationError::CommandFailed {
        command: command.to_string(),
    }
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_succeeds() {
        let runner = ProcessRunner::new();
        let dir = tempfile::tempdir().unwrap();
        runner.run("exit 0", dir.path()).unwrap();
    }

    #[test]
    fn nonzero_exit_fails_naming_the_command() {
        let runner = ProcessRunner::new();
        let dir = tempfile::tempdir().unwrap();
        let err = runner.run("exit 3", dir.path()).unwrap_err();
        assert!(err.to_string().contains("exit 3"));
    }

    #[test]
    fn commands_run_from_the_given_directory() {
        let runner = ProcessRunner::new();
        let dir = tempfile::tempdir().unwrap();
        runner.run("printf here > marker.txt", dir.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("marker.txt")).unwrap(),
            "here"
        );
    }

    #[test]
    fn exists_finds_shell_on_path() {
        let runner = ProcessRunner::new();
        assert!(runner.exists("sh"));
        assert!(!runner.exists("definitely-not-a-real-command-xyz"));
    }
}
