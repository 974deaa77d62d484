//! The `composerPackageInstalled` rule: PHP dependency detection.

use std::path::Path;

use serde_json::Value;

use crate::application::ports::Filesystem;
use crate::domain::{ConditionSpec, DomainError, Store};
use crate::error::StencilResult;

use super::Condition;

/// True when the named package appears in `composer.json`'s `require` or
/// `require-dev` maps in the working directory, or failing that in either
/// package list of an accompanying `composer.lock`.
///
/// Missing or unparseable manifests count as "not installed"; this rule is
/// a predicate, not a validator of the target project.
#[derive(Debug)]
pub struct ComposerPackageInstalled {
    package: String,
}

impl ComposerPackageInstalled {
    pub fn from_spec(spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        let package = spec.arg_str("package").map(str::to_string).ok_or_else(|| {
            DomainError::ConditionFieldMissing {
                field: "package".into(),
                kind: spec.condition.clone(),
            }
        })?;
        Ok(Box::new(Self { package }))
    }

    fn in_manifest(&self, manifest: &Value) -> bool {
        ["require", "require-dev"].iter().any(|&section| {
            manifest
                .get(section)
                .and_then(|deps| deps.get(&self.package))
                .is_some()
        })
    }

    fn in_lock_file(&self, lock: &Value) -> bool {
        ["packages", "packages-dev"].iter().any(|&section| {
            lock.get(section)
                .and_then(Value::as_array)
                .is_some_and(|packages| {
                    packages
                        .iter()
                        .any(|p| p.get("name").and_then(Value::as_str) == Some(&self.package))
                })
        })
    }
}

impl Condition for ComposerPackageInstalled {
    fn validate(&self, _store: &Store) -> StencilResult<()> {
        Ok(())
    }

    fn evaluate(&self, _store: &Store, fs: &dyn Filesystem) -> StencilResult<bool> {
        let Some(manifest) = read_json(fs, Path::new("composer.json")) else {
            return Ok(false);
        };
        if self.in_manifest(&manifest) {
            return Ok(true);
        }

        let Some(lock) = read_json(fs, Path::new("composer.lock")) else {
            return Ok(false);
        };
        Ok(self.in_lock_file(&lock))
    }
}

fn read_json(fs: &dyn Filesystem, path: &Path) -> Option<Value> {
    if !fs.exists(path) {
        return None;
    }
    let text = fs.read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubFilesystem;
    use serde_json::json;

    fn condition(package: &str) -> Box<dyn Condition> {
        let spec = serde_json::from_value(json!({
            "condition": "composerPackageInstalled",
            "package": package
        }))
        .unwrap();
        ComposerPackageInstalled::from_spec(&spec).unwrap()
    }

    fn evaluate(fs: &StubFilesystem, package: &str) -> bool {
        condition(package).evaluate(&Store::new(), fs).unwrap()
    }

    #[test]
    fn found_in_require() {
        let fs = StubFilesystem::new().with_file(
            "composer.json",
            r#"{"require": {"acme/widgets": "^1.0"}}"#,
        );
        assert!(evaluate(&fs, "acme/widgets"));
    }

    #[test]
    fn found_in_require_dev() {
        let fs = StubFilesystem::new().with_file(
            "composer.json",
            r#"{"require-dev": {"acme/tools": "^2.0"}}"#,
        );
        assert!(evaluate(&fs, "acme/tools"));
    }

    #[test]
    fn falls_back_to_the_lock_file() {
        let fs = StubFilesystem::new()
            .with_file("composer.json", r#"{"require": {}}"#)
            .with_file(
                "composer.lock",
                r#"{"packages": [{"name": "acme/transitive"}], "packages-dev": []}"#,
            );
        assert!(evaluate(&fs, "acme/transitive"));
        assert!(!evaluate(&fs, "acme/absent"));
    }

    #[test]
    fn no_manifest_means_not_installed() {
        assert!(!evaluate(&StubFilesystem::new(), "acme/widgets"));
    }

    #[test]
    fn unparseable_manifest_means_not_installed() {
        let fs = StubFilesystem::new().with_file("composer.json", "not json {");
        assert!(!evaluate(&fs, "acme/widgets"));
    }
}
