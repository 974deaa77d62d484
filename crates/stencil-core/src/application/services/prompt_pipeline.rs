//! The prompt pipeline: resolves prompt specifications into store entries.
//!
//! Each spec flows through, in declaration order: skip-if-present →
//! visibility check → default resolution → type-specific rendering →
//! transform → persist. Prior answers (a persisted project configuration
//! merged into the store) always win and are never re-prompted.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::application::conditions::{ConditionRegistry, Relation};
use crate::application::ports::{Filesystem, PromptOption, Prompter, Renderer};
use crate::domain::{transforms, DomainError, PromptSpec, Store};
use crate::error::StencilResult;

/// The built-in prompt types. `boolean` is accepted as an alias for
/// `confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Input,
    Multiline,
    Password,
    Confirm,
    Enum,
    Radio,
    Checkboxes,
}

impl PromptKind {
    fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Multiline => "multiline",
            Self::Password => "password",
            Self::Confirm => "confirm",
            Self::Enum => "enum",
            Self::Radio => "radio",
            Self::Checkboxes => "checkboxes",
        }
    }

    fn needs_options(self) -> bool {
        matches!(self, Self::Enum | Self::Radio | Self::Checkboxes)
    }
}

/// Resolves a list of prompt specifications against a store.
pub struct PromptPipeline<'a> {
    prompter: &'a dyn Prompter,
    renderer: &'a dyn Renderer,
    fs: &'a dyn Filesystem,
    conditions: &'a ConditionRegistry,
}

impl<'a> PromptPipeline<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        renderer: &'a dyn Renderer,
        fs: &'a dyn Filesystem,
        conditions: &'a ConditionRegistry,
    ) -> Self {
        Self {
            prompter,
            renderer,
            fs,
            conditions,
        }
    }

    /// Validate every spec, then resolve them in order, writing one store
    /// entry per rendered prompt.
    ///
    /// All specs are validated before any prompt renders, so a broken spec
    /// late in the list cannot leave the user half-way through an
    /// interview.
    #[instrument(skip_all, fields(prompts = specs.len()))]
    pub fn run(&self, specs: &[PromptSpec], store: &mut Store) -> StencilResult<()> {
        let kinds: Vec<PromptKind> = specs.iter().map(resolve_kind).collect();

        for (spec, kind) in specs.iter().zip(&kinds) {
            validate_spec(spec, *kind)?;
        }
        for (spec, kind) in specs.iter().zip(&kinds) {
            self.resolve_one(spec, *kind, store)?;
        }
        Ok(())
    }

    fn resolve_one(&self, spec: &PromptSpec, kind: PromptKind, store: &mut Store) -> StencilResult<()> {
        // Prior answers take precedence and are never re-prompted.
        if store.has(&spec.name) {
            debug!(prompt = %spec.name, "value already present, skipping");
            return Ok(());
        }

        if let Some(show_if) = &spec.show_if {
            if !self
                .conditions
                .evaluate(show_if, Relation::And, store, self.fs)?
            {
                debug!(prompt = %spec.name, "showIf evaluated false, skipping");
                return Ok(());
            }
        }

        let value = self.render(spec, kind, store)?;

        let value = match &spec.transform {
            Some(transform) => transforms::apply_all(value, transform.as_slice())?,
            None => value,
        };

        store.set(&spec.name, value);
        Ok(())
    }

    fn render(&self, spec: &PromptSpec, kind: PromptKind, store: &Store) -> StencilResult<Value> {
        let value = match kind {
            PromptKind::Input => {
                let default = self.resolve_default(spec, store)?;
                let required = spec.required.unwrap_or(true);

                let mut answer = self.prompter.input(&spec.message, default.as_deref())?;
                while answer.is_empty() && required {
                    warn!(prompt = %spec.name, "Field is required!");
                    answer = self.prompter.input(&spec.message, default.as_deref())?;
                }
                Value::String(answer)
            }
            PromptKind::Multiline => Value::String(self.prompter.multiline(&spec.message)?),
            PromptKind::Password => Value::String(self.prompter.password(&spec.message)?),
            PromptKind::Confirm => {
                // Stored as the literal strings "true"/"false", so confirm
                // answers substitute cleanly into templates.
                let confirmed = self.prompter.confirm(&spec.message)?;
                Value::String(if confirmed { "true" } else { "false" }.to_string())
            }
            PromptKind::Enum => {
                let options = options_of(spec);
                Value::String(self.prompter.choice(&spec.message, &options)?)
            }
            PromptKind::Radio => {
                let options = options_of(spec);
                Value::String(self.prompter.select(&spec.message, &options)?)
            }
            PromptKind::Checkboxes => {
                let options = options_of(spec);
                let keys = self.prompter.multi_select(&spec.message, &options)?;
                Value::Array(keys.into_iter().map(Value::String).collect())
            }
        };
        Ok(value)
    }

    /// Resolve an input prompt's default: substitute against the current
    /// store (a default may reference already-collected fields), then apply
    /// `transform_default`.
    fn resolve_default(&self, spec: &PromptSpec, store: &Store) -> StencilResult<Option<String>> {
        let Some(default) = &spec.default else {
            return Ok(None);
        };

        let text = match default {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let substituted = self.renderer.replace(&text, &store.to_value())?;

        let resolved = match &spec.transform_default {
            Some(transform) => {
                match transforms::apply_all(Value::String(substituted), transform.as_slice())? {
                    Value::String(s) => s,
                    other => other.to_string(),
                }
            }
            None => substituted,
        };
        Ok(Some(resolved))
    }
}

/// Resolve the declared type tag. Unknown tags are the one non-fatal,
/// auto-recovering resolution case: warn and fall back to `input`.
fn resolve_kind(spec: &PromptSpec) -> PromptKind {
    match spec.kind.as_deref() {
        None | Some("input") => PromptKind::Input,
        Some("multiline") => PromptKind::Multiline,
        Some("password") => PromptKind::Password,
        Some("boolean") | Some("confirm") => PromptKind::Confirm,
        Some("enum") => PromptKind::Enum,
        Some("radio") => PromptKind::Radio,
        Some("checkboxes") => PromptKind::Checkboxes,
        Some(other) => {
            warn!(prompt = %spec.name, "Prompt type '{other}' not found, defaulting to 'input'");
            PromptKind::Input
        }
    }
}

fn validate_spec(spec: &PromptSpec, kind: PromptKind) -> StencilResult<()> {
    if spec.name.is_empty() {
        return Err(DomainError::PromptNameMissing {
            kind: kind.name().to_string(),
        }
        .into());
    }
    if spec.message.is_empty() {
        return Err(DomainError::PromptMessageMissing {
            name: spec.name.clone(),
        }
        .into());
    }
    if kind.needs_options() {
        match &spec.options {
            None => {
                return Err(DomainError::PromptOptionsMissing {
                    kind: kind.name().to_string(),
                    name: spec.name.clone(),
                }
                .into());
            }
            Some(options) if options.is_empty() => {
                return Err(DomainError::PromptOptionsInvalid {
                    kind: kind.name().to_string(),
                    name: spec.name.clone(),
                }
                .into());
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn options_of(spec: &PromptSpec) -> Vec<PromptOption> {
    spec.options
        .iter()
        .flatten()
        .map(|(key, label)| PromptOption {
            key: key.clone(),
            label: match label {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────
