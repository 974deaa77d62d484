//! Declarative template configuration.
//!
//! A template directory carries a JSON configuration describing the prompts
//! to collect, the directives to execute, and the messages to display once
//! scaffolding completes. These are plain serde models; field validation
//! happens in the pipeline and the directive factories so errors can name
//! the offending entity rather than surfacing as serde parse failures.

use serde::Deserialize;
use serde_json::{Map, Value};

/// The declarative unit tying a template together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    /// Prompts to resolve, in declaration order.
    #[serde(default)]
    pub prompts: Vec<PromptSpec>,

    /// Directives to execute, in declaration order.
    #[serde(default)]
    pub directives: Vec<DirectiveSpec>,

    /// Deferred notices displayed once, after all directives complete.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// One declarative request for user input.
///
/// `name` and `message` are required; they deserialize with defaults so the
/// pipeline can report which prompt is malformed instead of failing the
/// whole config parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptSpec {
    /// Dotted store path the answer is written to.
    #[serde(default)]
    pub name: String,

    /// User-facing prompt text.
    #[serde(default)]
    pub message: String,

    /// Prompt type tag; defaults to `input`. Unknown tags fall back to
    /// `input` with a warning.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Default answer, itself subject to substitution against the store.
    pub default: Option<Value>,

    /// Transform(s) applied to the resolved default before display.
    pub transform_default: Option<OneOrMany<String>>,

    /// Whether an empty answer re-prompts (`input` type only).
    pub required: Option<bool>,

    /// Ordered option-key -> option-label map (`enum`/`radio`/`checkboxes`).
    pub options: Option<Map<String, Value>>,

    /// Transform(s) applied to the final answer before storage.
    pub transform: Option<OneOrMany<String>>,

    /// Conditions gating whether the prompt renders at all (AND semantics).
    #[serde(rename = "showIf")]
    pub show_if: Option<Vec<ConditionSpec>>,
}

/// One declarative boolean rule.
///
/// `condition` names the rule type; every other field is rule-specific and
/// validated by the rule itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionSpec {
    #[serde(default)]
    pub condition: String,

    #[serde(flatten)]
    pub args: Map<String, Value>,
}

impl ConditionSpec {
    /// Rule-specific argument by name.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Rule-specific string argument by name.
    pub fn arg_str(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(Value::as_str)
    }
}

/// One declarative side-effecting action.
///
/// `action` maps to a directive implementation; every other field is
/// action-specific and validated by the directive's factory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectiveSpec {
    #[serde(default)]
    pub action: String,

    #[serde(flatten)]
    pub args: Map<String, Value>,
}

impl DirectiveSpec {
    /// Action-specific argument by name.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Action-specific string argument by name.
    pub fn arg_str(&self, name: &str) -> Option<&str> {
        self.arg(name).and_then(Value::as_str)
    }
}

/// A deferred user-facing notice.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Display style: `out`, `warning` or `success`. Unrecognized styles
    /// render as plain output.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub message: String,
}

/// A single value or a list of them — template configs accept both
/// `"transform": "kebabCase"` and `"transform": ["snakeCase", "uppercase"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
