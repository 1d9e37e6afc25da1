//! Modal prompts rendered by the external `dialog` program.
//!
//! Every prompt goes through [`Dialog::run`], which adds the localized button
//! captions, starts the program and captures its diagnostic channel. The
//! prompt helpers turn the exit code and that text into typed results:
//! - `Ok(Some(value))` - the user accepted
//! - `Ok(None)` - the user cancelled or pressed Escape
//! - `Err(_)` - the program could not be run or answered with garbage

mod password;
mod process;
mod prompts;
mod sizing;

pub use process::{DialogError, Invocation, Outcome, OutputChannel, ProcessRunner, Runner};
pub use prompts::{ListItem, MenuItem};
pub use sizing::BoxSize;

use anyhow::{Context, Result};
use log::info;

use crate::{
    config::DialogSettings,
    i18n::{ButtonLabels, current_language, normalize_language, translate},
};

pub const DEFAULT_PROGRAM: &str = "dialog";

/// Result type for prompt operations.
///
/// - `Ok(Some(value))` - User submitted a value
/// - `Ok(None)` - User cancelled
/// - `Err(_)` - An error occurred
pub type PromptResult<T> = Result<Option<T>>;

/// Entry point for all prompts.
pub struct Dialog<R = ProcessRunner> {
    runner: R,
    program: String,
    language: Option<String>,
    clear: bool,
}

impl Default for Dialog<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog<ProcessRunner> {
    /// Runs the `dialog` program found on `PATH` with captions in the
    /// process-wide language.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(ProcessRunner)
    }

    /// Builds a dialog from persisted settings.
    #[must_use]
    pub fn from_settings(settings: &DialogSettings) -> Self {
        let dialog = Self::new()
            .with_program(settings.program.clone())
            .with_clear(settings.clear);

        match settings.language.as_deref() {
            Some(lang) => dialog.with_language(lang),
            None => dialog,
        }
    }
}

impl<R: Runner> Dialog<R> {
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            program: DEFAULT_PROGRAM.to_string(),
            language: None,
            clear: true,
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Pins captions and messages to `code` instead of following
    /// [`set_language`](crate::i18n::set_language).
    #[must_use]
    pub fn with_language(mut self, code: &str) -> Self {
        self.language = Some(normalize_language(code));
        self
    }

    /// Whether to clear the screen before each prompt (default: true).
    #[must_use]
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Language the next prompt renders in.
    #[must_use]
    pub fn language(&self) -> String {
        self.language.clone().unwrap_or_else(current_language)
    }

    #[must_use]
    pub fn labels(&self) -> ButtonLabels {
        ButtonLabels::for_language(&self.language())
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs the program with `args` after the button caption overrides,
    /// which are looked up anew for every invocation.
    ///
    /// With `check`, a non-zero exit is returned as [`DialogError::Failed`].
    /// The prompt helpers never set it: for them a non-zero exit means the
    /// user declined.
    pub fn run(&self, args: Vec<String>, check: bool) -> Result<Outcome> {
        let invocation = self.invocation(args);
        self.execute(invocation, check)
    }

    /// Asks the program for its version, failing if it cannot be run.
    pub fn probe(&self) -> Result<String> {
        let outcome = self
            .run(vec!["--print-version".to_string()], true)
            .with_context(|| format!("{} is not usable", self.program))?;

        let version = outcome.stderr.trim().to_string();
        info!("{} reports {version}", self.program);

        Ok(version)
    }

    pub(crate) fn invocation(&self, args: Vec<String>) -> Invocation {
        let mut full = self.labels().to_args();
        full.extend(args);
        Invocation::new(self.program.clone(), full)
    }

    pub(crate) fn execute(&self, invocation: Invocation, check: bool) -> Result<Outcome> {
        let outcome = self.runner.run(invocation)?;

        if check && !outcome.success() {
            return Err(DialogError::Failed {
                code: outcome.code,
                stderr: outcome.stderr,
            }
            .into());
        }

        Ok(outcome)
    }

    pub(crate) fn tr(&self, key: &str) -> String {
        translate(&self.language(), key)
    }

    /// Leading arguments shared by the boxed prompts.
    fn header(&self, title: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(3);
        if self.clear {
            args.push("--clear".to_string());
        }
        args.push("--title".to_string());
        args.push(title.to_string());
        args
    }
}

#[cfg(test)]
mod tests;
