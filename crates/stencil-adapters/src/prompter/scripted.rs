//! Scripted prompter: replays canned answers for non-interactive tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use stencil_core::{
    application::{
        ports::{PromptOption, Prompter},
        ApplicationError,
    },
    error::{StencilError, StencilResult},
};

/// One queued answer.
#[derive(Debug, Clone)]
pub enum ScriptedAnswer {
    Text(String),
    Bool(bool),
    Keys(Vec<String>),
}

impl ScriptedAnswer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Replays a fixed queue of answers in order and records every message
/// asked, for assertions. Running out of answers is an error, not a hang.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<ScriptedAnswer>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt message asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn next(&self, message: &str) -> StencilResult<ScriptedAnswer> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected(format!("no scripted answer left for: {message}")))
    }

    fn next_text(&self, message: &str) -> StencilResult<String> {
        match self.next(message)? {
            ScriptedAnswer::Text(s) => Ok(s),
            other => Err(unexpected(format!("expected text answer, got {other:?}"))),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, message: &str, default: Option<&str>) -> StencilResult<String> {
        let answer = self.next_text(message)?;
        if answer.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        }
        Ok(answer)
    }

    fn multiline(&self, message: &str) -> StencilResult<String> {
        self.next_text(message)
    }

    fn password(&self, message: &str) -> StencilResult<String> {
        self.next_text(message)
    }

    fn confirm(&self, message: &str) -> StencilResult<bool> {
        match self.next(message)? {
            ScriptedAnswer::Bool(b) => Ok(b),
            other => Err(unexpected(format!("expected bool answer, got {other:?}"))),
        }
    }

    fn choice(&self, message: &str, _options: &[PromptOption]) -> StencilResult<String> {
        self.next_text(message)
    }

    fn select(&self, message: &str, _options: &[PromptOption]) -> StencilResult<String> {
        self.next_text(message)
    }

    fn multi_select(&self, message: &str, _options: &[PromptOption]) -> StencilResult<Vec<String>> {
        match self.next(message)? {
            ScriptedAnswer::Keys(keys) => Ok(keys),
            other => Err(unexpected(format!("expected key list, got {other:?}"))),
        }
    }
}

fn unexpected(reason: String) -> StencilError {
    ApplicationError::PromptFailed { reason }.into()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_answers_in_order() {
        let prompter = ScriptedPrompter::new([
            ScriptedAnswer::text("first"),
            ScriptedAnswer::Bool(true),
        ]);
        assert_eq!(prompter.input("One?", None).unwrap(), "first");
        assert!(prompter.confirm("Two?").unwrap());
        assert_eq!(prompter.asked(), ["One?", "Two?"]);
    }

    #[test]
    fn empty_text_falls_back_to_default() {
        let prompter = ScriptedPrompter::new([ScriptedAnswer::text("")]);
        assert_eq!(prompter.input("Slug?", Some("fallback")).unwrap(), "fallback");
    }

    #[test]
    fn exhausted_queue_is_an_error() {
        let prompter = ScriptedPrompter::new([]);
        assert!(prompter.input("Anything?", None).is_err());
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let prompter = ScriptedPrompter::new([ScriptedAnswer::Bool(true)]);
        assert!(prompter.input("Text?", None).is_err());
    }
}
