//! MiniJinja-backed placeholder substitution.
//!
//! Templates use `{{ path }}` placeholders with dotted access into the
//! store (`{{ license.slug }}`) and the transform registry available as
//! filters (`{{ name | kebabCase }}`). Undefined variables render as empty
//! strings — templates routinely reference optional answers.

use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;

use stencil_core::{
    application::{ports::Renderer, ApplicationError},
    domain::transforms,
    error::StencilResult,
};

/// Renderer over a preconfigured [`minijinja::Environment`].
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Lenient);

        for &name in transforms::NAMES {
            env.add_filter(name, move |value: String| -> Result<String, minijinja::Error> {
                transforms::apply(&value, name).map_err(|e| {
                    minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, e.to_string())
                })
            });
        }

        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for JinjaRenderer {
    fn substitute(&self, text: &str, data: &Value) -> StencilResult<String> {
        self.env
            .render_str(text, minijinja::Value::from_serialize(data))
            .map_err(|e| {
                ApplicationError::RenderFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
