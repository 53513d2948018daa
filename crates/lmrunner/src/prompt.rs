//! Terminal implementation of the core `Prompter` seam.
//!
//! Selections and free text go through `dialoguer`, secrets through
//! `rpassword`, notifications to stderr. Escape / Ctrl-D dismisses a prompt.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use owo_colors::{OwoColorize, Style};

use lmrunner_core::{CoreError, InputRequest, Notice, Prompter};

use crate::cli::ColorMode;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Notification colors; plain when color is off.
#[derive(Debug, Default, Clone)]
pub struct Styles {
    pub info: Style,
    pub warning: Style,
    pub error: Style,
}

impl Styles {
    pub fn new(color: bool) -> Self {
        if !color {
            return Self::default();
        }
        Self {
            info: Style::new().cyan(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }
}

pub struct TerminalPrompter {
    styles: Styles,
    quiet: bool,
}

impl TerminalPrompter {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self {
            styles: Styles::new(color),
            quiet,
        }
    }
}

fn prompt_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::Prompt {
        message: e.to_string(),
    }
}

impl Prompter for TerminalPrompter {
    fn pick(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, CoreError> {
        if items.is_empty() {
            return Ok(None);
        }
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_err)
    }

    fn input(&self, request: &InputRequest<'_>) -> Result<Option<String>, CoreError> {
        let value = if request.secret {
            rpassword::prompt_password(format!("{}: ", request.prompt)).map_err(prompt_err)?
        } else {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{} ({})", request.prompt, request.placeholder))
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?
        };
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_owned()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CoreError> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(prompt_err)?;
        Ok(answer.unwrap_or(false))
    }

    fn notify(&self, level: Notice, message: &str) {
        match level {
            Notice::Info if self.quiet => {}
            Notice::Info => eprintln!("{}", message.style(self.styles.info)),
            Notice::Warning => eprintln!("{} {message}", "warning:".style(self.styles.warning)),
            Notice::Error => eprintln!("{} {message}", "error:".style(self.styles.error)),
        }
    }
}
