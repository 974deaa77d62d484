//! Implementation of the `stencil list` command.
//!
//! Walks the templates root for directories carrying a template
//! configuration file and prints their `namespace:relative/path`
//! identifiers.

use std::path::Path;

use walkdir::WalkDir;

use crate::{
    cli::{GlobalArgs, ListArgs},
    config::{AppConfig, TEMPLATE_CONFIG_FILENAME},
    error::CliResult,
    output::OutputManager,
};

/// Execute the `stencil list` command.
pub fn execute(
    args: ListArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = config.templates_root();
    if !root.is_dir() {
        output.warning(&format!(
            "No templates directory at {}",
            root.display()
        ))?;
        return Ok(());
    }

    let mut templates = collect_templates(&root, args.namespace.as_deref())?;
    templates.sort();

    if templates.is_empty() {
        output.info("No templates found")?;
        return Ok(());
    }

    output.header("Available templates")?;
    for template in templates {
        output.print(&format!("  {template}"))?;
    }
    Ok(())
}

/// Every `namespace:relative/path` under the root whose directory holds a
/// template configuration file.
fn collect_templates(root: &Path, namespace_filter: Option<&str>) -> CliResult<Vec<String>> {
    let mut found = Vec::new();

    for namespace_entry in std::fs::read_dir(root)? {
        let namespace_entry = namespace_entry?;
        if !namespace_entry.file_type()?.is_dir() {
            continue;
        }
        let namespace = namespace_entry.file_name().to_string_lossy().into_owned();
        if namespace_filter.is_some_and(|filter| filter != namespace) {
            continue;
        }

        let namespace_dir = namespace_entry.path();
        for entry in WalkDir::new(&namespace_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.file_type().is_file() && entry.file_name() == TEMPLATE_CONFIG_FILENAME {
                if let Some(template_dir) = entry.path().parent() {
                    if let Ok(rel) = template_dir.strip_prefix(&namespace_dir) {
                        found.push(format!("{namespace}:{}", rel.display()));
                    }
                }
            }
        }
    }

    Ok(found)
}

// ── tests ─────────────────────────────────────────────────────────────────────
