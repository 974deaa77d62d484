//! Implementation of the `stencil make` command.
//!
//! Responsibility: resolve the template, seed the store from the persisted
//! project configuration, run the prompt pipeline and the directives, then
//! flush the template's deferred messages. The scaffolding semantics all
//! live in `stencil-core`.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info, instrument};

use stencil_adapters::{JinjaRenderer, LocalFilesystem, ProcessRunner, TerminalPrompter};
use stencil_core::prelude::*;

use crate::{
    cli::{GlobalArgs, MakeArgs},
    config::{AppConfig, TEMPLATE_CONFIG_FILENAME},
    error::{CliError, CliResult},
    output::OutputManager,
    project,
};

/// Execute the `stencil make` command.
///
/// Dispatch sequence:
/// 1. Resolve `namespace:relative/path` to a template directory
/// 2. Parse the template configuration
/// 3. Seed the store: project config merge, `project_root`, `template_dir`
/// 4. Run the prompt pipeline
/// 5. Execute the directives in declaration order
/// 6. Flush deferred messages
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(
    args: MakeArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let working_dir = std::env::current_dir()?;

    // 1. Resolve the template directory
    let (namespace, rel_path) = split_template_id(&args.template);
    let template_dir = config.templates_root().join(namespace).join(rel_path);
    if !template_dir.is_dir() {
        return Err(CliError::TemplateNotFound {
            id: args.template.clone(),
        });
    }

    let config_path = template_dir.join(TEMPLATE_CONFIG_FILENAME);
    if !config_path.exists() {
        return Err(CliError::TemplateConfigMissing { path: config_path });
    }

    // 2. Parse the template configuration
    let template = parse_template_config(&config_path)?;
    debug!(
        prompts = template.prompts.len(),
        directives = template.directives.len(),
        "Template config parsed"
    );

    // 3. Seed the store
    let (project_root, project_config) = project::open_project_config(&working_dir)?;
    let mut store = Store::from_map(project_config.data().clone());

    let project_root = match &args.project_root {
        Some(path) => resolve_path(&working_dir, path),
        None => project_root,
    };
    store.set("project_root", json!(project_root.to_string_lossy()));
    store.set("template_dir", json!(template_dir.to_string_lossy()));

    // 4 + 5. Prompts, then directives
    let fs = LocalFilesystem::new();
    let renderer = JinjaRenderer::new();
    let prompter = TerminalPrompter::new();
    let runner = ProcessRunner::with_base_command("stencil");
    let conditions = ConditionRegistry::with_builtins();

    info!(template = %args.template, "Scaffold started");

    PromptPipeline::new(&prompter, &renderer, &fs, &conditions)
        .run(&template.prompts, &mut store)
        .map_err(CliError::Core)?;

    let env = RunEnv {
        template_dir,
        working_dir,
        config_filename: TEMPLATE_CONFIG_FILENAME.to_string(),
        overwrite: args.force,
    };
    let services = DirectiveServices {
        fs: &fs,
        renderer: &renderer,
        runner: &runner,
        conditions: &conditions,
        env: &env,
    };
    DirectiveRegistry::with_builtins()
        .run_all(&template.directives, &services, &mut store)
        .map_err(CliError::Core)?;

    info!(template = %args.template, "Scaffold completed");

    // 6. Deferred messages, in accumulation order, after everything ran
    for message in &template.messages {
        output.scaffold_message(message)?;
    }
    output.success(&format!("Template '{}' applied", args.template))?;

    Ok(())
}

/// Split a template identifier into `(namespace, relative path)`. A bare
/// path belongs to the `default` namespace.
fn split_template_id(id: &str) -> (&str, &str) {
    match id.split_once(':') {
        Some((namespace, path)) if !namespace.is_empty() => (namespace, path),
        Some((_, path)) => ("default", path),
        None => ("default", id),
    }
}

fn parse_template_config(path: &Path) -> CliResult<TemplateConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::IoError {
        message: format!("reading {}", path.display()),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| CliError::ConfigError {
        message: format!("Unable to parse configuration file: {}: {e}", path.display()),
        source: None,
    })
}

/// Resolve a possibly-relative path against the working directory,
/// canonicalizing when the target exists.
fn resolve_path(working_dir: &Path, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    };
    absolute.canonicalize().unwrap_or(absolute)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_uses_default_namespace() {
        assert_eq!(split_template_id("plugin"), ("default", "plugin"));
        assert_eq!(
            split_template_id("blocks/editor"),
            ("default", "blocks/editor")
        );
    }

    #[test]
    fn namespaced_path_splits_once() {
        assert_eq!(
            split_template_id("acme:blocks/editor"),
            ("acme", "blocks/editor")
        );
        // Only the first colon is the separator.
        assert_eq!(split_template_id("acme:a:b"), ("acme", "a:b"));
    }

    #[test]
    fn empty_namespace_falls_back_to_default() {
        assert_eq!(split_template_id(":plugin"), ("default", "plugin"));
    }

    #[test]
    fn relative_project_root_resolves_against_cwd() {
        let resolved = resolve_path(Path::new("/work"), Path::new("app"));
        assert_eq!(resolved, PathBuf::from("/work/app"));
    }

    #[test]
    fn absolute_project_root_is_kept() {
        let resolved = resolve_path(Path::new("/work"), Path::new("/srv/app"));
        assert_eq!(resolved, PathBuf::from("/srv/app"));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TEMPLATE_CONFIG_FILENAME);
        std::fs::write(&path, "{broken").unwrap();
        let err = parse_template_config(&path).unwrap_err();
        assert!(err.to_string().contains("Unable to parse configuration file"));
    }
}
