//! Dialoguer-backed terminal prompting.

use dialoguer::{theme::ColorfulTheme, Confirm, Editor, Input, MultiSelect, Password, Select};

use stencil_core::{
    application::{
        ports::{PromptOption, Prompter},
        ApplicationError,
    },
    error::{StencilError, StencilResult},
};

/// Interactive prompter over stdin/stdout. Every call blocks until the
/// user answers or interrupts the process.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, message: &str, default: Option<&str>) -> StencilResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string()).show_default(true);
        }
        input.interact_text().map_err(map_err)
    }

    fn multiline(&self, message: &str) -> StencilResult<String> {
        // $EDITOR-based entry; an aborted editor session means an empty
        // answer, matching the required-field retry loop upstream.
        let edited = Editor::new().edit(message).map_err(map_err)?;
        Ok(edited.unwrap_or_default())
    }

    fn password(&self, message: &str) -> StencilResult<String> {
        Password::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty_password(true)
            .interact()
            .map_err(map_err)
    }

    fn confirm(&self, message: &str) -> StencilResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .interact()
            .map_err(map_err)
    }

    fn choice(&self, message: &str, options: &[PromptOption]) -> StencilResult<String> {
        let keys: Vec<String> = options.iter().map(|o| o.key.clone()).collect();
        let accepted = keys.join(", ");
        let validation_keys = keys.clone();
        Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{message} [{accepted}]"))
            .validate_with(move |input: &String| -> Result<(), String> {
                if validation_keys.contains(input) {
                    Ok(())
                } else {
                    Err(format!("must be one of: {}", validation_keys.join(", ")))
                }
            })
            .interact_text()
            .map_err(map_err)
    }

    fn select(&self, message: &str, options: &[PromptOption]) -> StencilResult<String> {
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(map_err)?;
        Ok(options[index].key.clone())
    }

    fn multi_select(&self, message: &str, options: &[PromptOption]) -> StencilResult<Vec<String>> {
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let indices = MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(&labels)
            .interact()
            .map_err(map_err)?;
        Ok(indices.into_iter().map(|i| options[i].key.clone()).collect())
    }
}

fn map_err(e: dialoguer::Error) -> StencilError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
    .into()
}
