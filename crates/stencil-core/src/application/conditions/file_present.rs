//! The `filePresent` / `fileNotPresent` rules: filesystem existence.

use std::path::Path;

use serde_json::Value;

use crate::application::ports::Filesystem;
use crate::domain::{ConditionSpec, DomainError, Store};
use crate::error::StencilResult;

use super::Condition;

/// Tests whether a file exists on disk. The `file` field names a *store
/// key*; the path checked is the value stored there, not the literal spec
/// value. A missing store key fails validation.
#[derive(Debug)]
pub struct FilePresent {
    file_key: String,
    negate: bool,
}

impl FilePresent {
    pub fn from_spec(spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        Ok(Box::new(Self {
            file_key: require_file(spec)?,
            negate: false,
        }))
    }

    pub fn negated_from_spec(spec: &ConditionSpec) -> StencilResult<Box<dyn Condition>> {
        Ok(Box::new(Self {
            file_key: require_file(spec)?,
            negate: true,
        }))
    }
}

impl Condition for FilePresent {
    fn validate(&self, store: &Store) -> StencilResult<()> {
        match store.get(&self.file_key) {
            None => Err(DomainError::StoreKeyMissing {
                key: self.file_key.clone(),
            }
            .into()),
            Some(Value::String(_)) => Ok(()),
            Some(_) => Err(DomainError::ConditionFieldInvalid {
                field: "file".into(),
                kind: if self.negate {
                    "fileNotPresent".into()
                } else {
                    "filePresent".into()
                },
            }
            .into()),
        }
    }

    fn evaluate(&self, store: &Store, fs: &dyn Filesystem) -> StencilResult<bool> {
        let path = store.get_str(&self.file_key).unwrap_or_default();
        Ok(fs.exists(Path::new(path)) != self.negate)
    }
}

fn require_file(spec: &ConditionSpec) -> StencilResult<String> {
    spec.arg_str("file")
        .map(str::to_string)
        .ok_or_else(|| {
            DomainError::ConditionFieldMissing {
                field: "file".into(),
                kind: spec.condition.clone(),
            }
            .into()
        })
}

// ── tests ─────────────────────────────────────────────────────────────────────
