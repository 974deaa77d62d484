//! The `copy` directive: materialize template files into the project.

use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::application::services::Scaffolder;
use crate::application::ApplicationError;
use crate::domain::{DirectiveSpec, DomainError, Store};
use crate::error::StencilResult;

use super::{relative_base, Directive, DirectiveServices};

/// Copies a file or directory subtree from the template into the target
/// base (`workingDir` or `projectRoot`), substituting placeholders and
/// honoring exclusions. The template's own configuration file is always
/// appended to the exclusion list.
#[derive(Debug)]
pub struct CopyDirective {
    from: String,
    to: PathBuf,
    source_dir: PathBuf,
    target_dir: PathBuf,
    exclusions: Vec<String>,
    is_dir: bool,
}

impl CopyDirective {
    pub fn from_spec(
        spec: &DirectiveSpec,
        services: &DirectiveServices<'_>,
        store: &Store,
    ) -> StencilResult<Box<dyn Directive>> {
        let from = spec
            .arg_str("from")
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::DirectiveFieldMissing {
                field: "from",
                action: "copy",
            })?
            .to_string();

        let data = store.to_value();
        let to = services
            .renderer
            .replace(spec.arg_str("to").unwrap_or("."), &data)?;
        let to = if to.is_empty() { ".".to_string() } else { to };

        let target_dir = relative_base(spec, services, store)?;
        let source_dir = services.env.template_dir.clone();

        let source = source_dir.join(&from);
        if !services.fs.exists(&source) {
            return Err(ApplicationError::SourceMissing { path: source }.into());
        }

        let mut exclusions: Vec<String> = match spec.arg("exclude") {
            None => Vec::new(),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                DomainError::DirectiveFieldInvalid {
                    field: "exclude",
                    action: "copy",
                    reason: e.to_string(),
                }
            })?,
        };
        // The template config drives scaffolding; it never lands in the
        // generated project.
        exclusions.push(services.env.config_filename.clone());

        let is_dir = services.fs.is_dir(&source);

        Ok(Box::new(Self {
            from,
            to: PathBuf::from(to),
            source_dir,
            target_dir,
            exclusions,
            is_dir,
        }))
    }
}

impl Directive for CopyDirective {
    #[instrument(skip_all, fields(from = %self.from, to = %self.to.display()))]
    fn execute(&self, services: &DirectiveServices<'_>, store: &mut Store) -> StencilResult<()> {
        let data = store.to_value();
        let scaffolder = Scaffolder::new(
            services.fs,
            services.renderer,
            self.source_dir.clone(),
            self.target_dir.clone(),
        )
        .exclude(self.exclusions.clone())
        .overwrite(services.env.overwrite);

        if self.is_dir {
            scaffolder.copy_dir(Path::new(&self.from), &self.to, &data)
        } else {
            // A bare "." target for a single file means "same name in the
            // target base".
            let to = if self.to == Path::new(".") {
                Path::new(&self.from)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| self.to.clone())
            } else {
                self.to.clone()
            };
            scaffolder.copy_file(Path::new(&self.from), &to, &data)
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::conditions::ConditionRegistry;
    use crate::application::directives::{DirectiveRegistry, RunEnv};
    use crate::test_support::{LookupRenderer, RecordingRunner, StubFilesystem};
    use serde_json::json;

    struct Fixture {
        fs: StubFilesystem,
        renderer: LookupRenderer,
        runner: RecordingRunner,
        conditions: ConditionRegistry,
        env: RunEnv,
    }

    impl Fixture {
        fn new(fs: StubFilesystem) -> Self {
            Self {
                fs,
                renderer: LookupRenderer,
                runner: RecordingRunner::new(),
                conditions: ConditionRegistry::with_builtins(),
                env: RunEnv {
                    template_dir: "/templates/default/plugin".into(),
                    working_dir: "/project".into(),
                    config_filename: "stencil.json".into(),
                    overwrite: false,
                },
            }
        }

        fn services(&self) -> DirectiveServices<'_> {
            DirectiveServices {
                fs: &self.fs,
                renderer: &self.renderer,
                runner: &self.runner,
                conditions: &self.conditions,
                env: &self.env,
            }
        }

        fn run(&self, directives: serde_json::Value, store: &mut Store) -> StencilResult<()> {
            let specs: Vec<DirectiveSpec> = serde_json::from_value(directives).unwrap();
            DirectiveRegistry::with_builtins().run_all(&specs, &self.services(), store)
        }
    }

    #[test]
    fn copies_and_substitutes_into_the_working_dir() {
        let fixture = Fixture::new(
            StubFilesystem::new()
                .with_dir("/templates/default/plugin/src")
                .with_file("/templates/default/plugin/src/file.txt", "Hello {{ name }}"),
        );
        let mut store = Store::new();
        store.set("name", json!("World"));

        fixture
            .run(
                json!([{"action": "copy", "from": "src", "to": "dest"}]),
                &mut store,
            )
            .unwrap();

        assert_eq!(
            fixture.fs.file_string("/project/dest/file.txt").unwrap(),
            "Hello World"
        );
    }

    #[test]
    fn template_config_file_is_always_excluded() {
        let fixture = Fixture::new(
            StubFilesystem::new()
                .with_dir("/templates/default/plugin")
                .with_file("/templates/default/plugin/stencil.json", "{}")
                .with_file("/templates/default/plugin/readme.md", "docs"),
        );
        let mut store = Store::new();

        fixture
            .run(
                json!([{"action": "copy", "from": ".", "to": "."}]),
                &mut store,
            )
            .unwrap();

        assert!(fixture.fs.file_string("/project/readme.md").is_some());
        assert!(fixture.fs.file_string("/project/stencil.json").is_none());
    }

    #[test]
    fn target_path_is_substituted_against_the_store() {
        let fixture = Fixture::new(
            StubFilesystem::new()
                .with_dir("/templates/default/plugin/src")
                .with_file("/templates/default/plugin/src/mod.txt", "x"),
        );
        let mut store = Store::new();
        store.set("slug", json!("my-plugin"));

        fixture
            .run(
                json!([{"action": "copy", "from": "src", "to": "{{ slug }}"}]),
                &mut store,
            )
            .unwrap();

        assert!(fixture.fs.file_string("/project/my-plugin/mod.txt").is_some());
    }

    #[test]
    fn project_root_base_comes_from_the_store() {
        let fixture = Fixture::new(
            StubFilesystem::new().with_file("/templates/default/plugin/license.txt", "MIT"),
        );
        let mut store = Store::new();
        store.set("project_root", json!("/workspace/app"));

        fixture
            .run(
                json!([{
                    "action": "copy",
                    "from": "license.txt",
                    "to": "LICENSE",
                    "relativeTo": "projectRoot"
                }]),
                &mut store,
            )
            .unwrap();

        assert_eq!(
            fixture.fs.file_string("/workspace/app/LICENSE").unwrap(),
            "MIT"
        );
    }

    #[test]
    fn missing_project_root_is_fatal_when_requested() {
        let fixture = Fixture::new(
            StubFilesystem::new().with_file("/templates/default/plugin/a.txt", "a"),
        );
        let result = fixture.run(
            json!([{
                "action": "copy",
                "from": "a.txt",
                "relativeTo": "projectRoot"
            }]),
            &mut Store::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn single_file_with_default_target_keeps_its_name() {
        let fixture = Fixture::new(
            StubFilesystem::new().with_file("/templates/default/plugin/Makefile", "all:"),
        );
        fixture
            .run(
                json!([{"action": "copy", "from": "Makefile"}]),
                &mut Store::new(),
            )
            .unwrap();
        assert_eq!(fixture.fs.file_string("/project/Makefile").unwrap(), "all:");
    }

    #[test]
    fn missing_from_field_is_fatal() {
        let fixture = Fixture::new(StubFilesystem::new());
        let result = fixture.run(json!([{"action": "copy"}]), &mut Store::new());
        assert!(result.is_err());
    }

    #[test]
    fn missing_source_path_is_fatal() {
        let fixture = Fixture::new(StubFilesystem::new());
        let result = fixture.run(
            json!([{"action": "copy", "from": "ghost"}]),
            &mut Store::new(),
        );
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Source path is invalid"));
    }
}
