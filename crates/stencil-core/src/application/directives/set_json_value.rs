//! The `setJSONValue` directive: surgical JSON key patching.

use std::path::PathBuf;

use serde_json::Value;
use tracing::instrument;

use crate::application::ApplicationError;
use crate::domain::{paths, DirectiveSpec, DomainError, Store};
use crate::error::StencilResult;

use super::{Directive, DirectiveServices};

/// Reads a JSON file, writes `value` at dotted-path `key`, and serializes
/// back with stable pretty formatting. Untouched keys keep their order.
#[derive(Debug)]
pub struct SetJsonValueDirective {
    file: String,
    path: PathBuf,
    key: String,
    value: Value,
}

impl SetJsonValueDirective {
    pub fn from_spec(
        spec: &DirectiveSpec,
        services: &DirectiveServices<'_>,
        store: &Store,
    ) -> StencilResult<Box<dyn Directive>> {
        let data = store.to_value();
        let replace = |text: &str| services.renderer.replace(text, &data);

        let file = match spec.arg_str("file") {
            Some(file) if !file.is_empty() => replace(file)?,
            _ => {
                return Err(DomainError::DirectiveFieldMissing {
                    field: "file",
                    action: "setJSONValue",
                }
                .into());
            }
        };

        let path = match spec.arg_str("path") {
            Some(path) => PathBuf::from(replace(path)?),
            None => services.env.working_dir.clone(),
        };

        let key = match spec.arg_str("key") {
            Some(key) if !key.is_empty() => replace(key)?,
            _ => {
                return Err(DomainError::DirectiveFieldMissing {
                    field: "key",
                    action: "setJSONValue",
                }
                .into());
            }
        };

        let value = match spec.arg("value") {
            None | Some(Value::Null) => {
                return Err(DomainError::DirectiveFieldMissing {
                    field: "value",
                    action: "setJSONValue",
                }
                .into());
            }
            Some(Value::String(s)) => Value::String(replace(s)?),
            Some(other) => other.clone(),
        };

        let full = path.join(&file);
        if !services.fs.exists(&full) {
            return Err(ApplicationError::FileMissing { path: full }.into());
        }

        Ok(Box::new(Self {
            file,
            path,
            key,
            value,
        }))
    }
}

impl Directive for SetJsonValueDirective {
    #[instrument(skip_all, fields(file = %self.file, key = %self.key))]
    fn execute(&self, services: &DirectiveServices<'_>, _store: &mut Store) -> StencilResult<()> {
        let full = self.path.join(&self.file);

        let text = services.fs.read_to_string(&full)?;
        let mut doc: Value = serde_json::from_str(&text).map_err(|e| {
            ApplicationError::JsonParse {
                path: full.clone(),
                reason: e.to_string(),
            }
        })?;
        let map = doc
            .as_object_mut()
            .ok_or_else(|| ApplicationError::NotAnObject { path: full.clone() })?;

        paths::set(map, &self.key, self.value.clone());

        let mut pretty = serde_json::to_string_pretty(&doc).map_err(|e| {
            ApplicationError::JsonParse {
                path: full.clone(),
                reason: e.to_string(),
            }
        })?;
        pretty.push('\n');
        services.fs.write(&full, pretty.as_bytes())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
