//! Prompt helpers built on [`Dialog::run`].

use anyhow::{Context, Result, bail};
use log::debug;

use super::{Dialog, PromptResult, Runner, sizing::BoxSize};

const YESNO_HEIGHT: &str = "13";
const YESNO_WIDTH: &str = "74";

const MENU_HEIGHT: &str = "12";
const MENU_WIDTH: &str = "73";
const MENU_LIST_HEIGHT: &str = "6";

const LIST_HEIGHT: &str = "20";
const LIST_WIDTH: &str = "60";

const INPUT_HEIGHT: &str = "10";
const INPUT_WIDTH: &str = "60";

/// A menu entry: the label shown to the user and what to do when it is
/// picked.
///
/// The handler runs after the menu's own process has exited, so it is free to
/// present further prompts.
pub struct MenuItem<'a, T> {
    pub label: String,
    handler: Box<dyn FnOnce() -> PromptResult<T> + 'a>,
}

impl<'a, T> MenuItem<'a, T> {
    #[must_use]
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: FnOnce() -> PromptResult<T> + 'a,
    {
        Self {
            label: label.into(),
            handler: Box::new(handler),
        }
    }
}

/// An entry of a radio list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Returned when this entry is chosen
    pub key: String,
    /// Shown next to the key
    pub label: String,
    /// Initially selected
    pub selected: bool,
}

impl ListItem {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            selected: false,
        }
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

fn on_off(selected: bool) -> String {
    String::from(if selected { "on" } else { "off" })
}

impl<R: Runner> Dialog<R> {
    /// Shows `text` in a box sized to fit it and waits for OK.
    pub fn msgbox(&self, title: &str, text: &str) -> Result<()> {
        let size = BoxSize::for_text(text);

        let mut args = self.header(title);
        args.extend([
            "--msgbox".to_string(),
            text.to_string(),
            size.height.to_string(),
            size.width.to_string(),
        ]);

        // OK and Escape both just dismiss the box
        self.run(args, false)?;
        Ok(())
    }

    /// Returns true only if the user answered yes.
    pub fn yesno(&self, title: &str, text: &str) -> Result<bool> {
        let mut args = self.header(title);
        args.extend([
            "--yesno".to_string(),
            text.to_string(),
            YESNO_HEIGHT.to_string(),
            YESNO_WIDTH.to_string(),
        ]);

        Ok(self.run(args, false)?.success())
    }

    /// Presents `items` numbered from 1 and runs the handler of the chosen
    /// entry, returning whatever it returns.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dialog = Dialog::new();
    /// let choice = dialog.menu(
    ///     "Console Setup",
    ///     vec![
    ///         MenuItem::new("Install/Upgrade", || Ok(Some(Action::Install))),
    ///         MenuItem::new("Shell", || Ok(Some(Action::Shell))),
    ///         MenuItem::new("Advanced", || dialog.menu("Advanced", advanced_items())),
    ///     ],
    /// )?;
    /// ```
    pub fn menu<T>(&self, title: &str, items: Vec<MenuItem<'_, T>>) -> PromptResult<T> {
        let mut args = self.header(title);
        args.extend([
            "--menu".to_string(),
            String::new(),
            MENU_HEIGHT.to_string(),
            MENU_WIDTH.to_string(),
            MENU_LIST_HEIGHT.to_string(),
        ]);
        for (i, item) in items.iter().enumerate() {
            args.push(i.saturating_add(1).to_string());
            args.push(item.label.clone());
        }

        let outcome = self.run(args, false)?;
        if !outcome.success() {
            return Ok(None);
        }

        let payload = outcome.stderr.trim();
        let index: usize = payload
            .parse()
            .with_context(|| format!("Unexpected menu selection '{payload}'"))?;

        let count = items.len();
        let Some(item) = index
            .checked_sub(1)
            .and_then(|i| items.into_iter().nth(i))
        else {
            bail!("Menu selection {index} is outside 1..={count}");
        };

        debug!("Menu '{title}': selected '{}'", item.label);
        (item.handler)()
    }

    /// Multiple choice with every entry initially unchecked. Returns the keys
    /// of the checked entries.
    pub fn checklist(
        &self,
        title: &str,
        text: &str,
        items: &[(&str, &str)],
    ) -> PromptResult<Vec<String>> {
        let mut args = self.header(title);
        args.extend([
            "--checklist".to_string(),
            text.to_string(),
            LIST_HEIGHT.to_string(),
            LIST_WIDTH.to_string(),
            "0".to_string(),
        ]);
        for (key, label) in items {
            args.extend([key.to_string(), label.to_string(), on_off(false)]);
        }

        let outcome = self.run(args, false)?;
        if !outcome.success() {
            return Ok(None);
        }

        Ok(Some(
            outcome
                .stderr
                .split_whitespace()
                .map(String::from)
                .collect(),
        ))
    }

    /// Single choice honoring each entry's initial selection. Returns the
    /// chosen key.
    pub fn radiolist(&self, title: &str, text: &str, items: &[ListItem]) -> PromptResult<String> {
        let mut args = self.header(title);
        args.extend([
            "--radiolist".to_string(),
            text.to_string(),
            LIST_HEIGHT.to_string(),
            LIST_WIDTH.to_string(),
            items.len().to_string(),
        ]);
        for item in items {
            args.extend([item.key.clone(), item.label.clone(), on_off(item.selected)]);
        }

        let outcome = self.run(args, false)?;
        if !outcome.success() {
            return Ok(None);
        }

        Ok(Some(outcome.stderr.trim().to_string()))
    }

    /// Free text entry pre-filled with `init`. Returns the trimmed text.
    pub fn inputbox(&self, title: &str, text: &str, init: &str) -> PromptResult<String> {
        let mut args = self.header(title);
        args.extend([
            "--inputbox".to_string(),
            text.to_string(),
            INPUT_HEIGHT.to_string(),
            INPUT_WIDTH.to_string(),
            init.to_string(),
        ]);

        let outcome = self.run(args, false)?;
        if !outcome.success() {
            return Ok(None);
        }

        Ok(Some(outcome.stderr.trim().to_string()))
    }
}
