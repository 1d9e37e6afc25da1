//! Password entry with confirmation.

use std::{
    fs::{self, OpenOptions},
    io::Write,
};

use anyhow::{Context, Result};
use log::{debug, info};
use tempfile::NamedTempFile;

use super::{Dialog, PromptResult, Runner, process::OutputChannel, sizing::split_lines};

/// Lets Tab and the arrow keys move between the two form fields.
const FORM_KEY_BINDINGS: &str = "\
bindkey formfield TAB FORM_NEXT
bindkey formfield DOWN FORM_NEXT
bindkey formfield UP FORM_PREV
bindkey formbox DOWN FORM_NEXT
bindkey formbox TAB FORM_NEXT
bindkey formbox UP FORM_PREV
";

pub(crate) const DIALOGRC_ENV: &str = "DIALOGRC";

const FORM_HEIGHT: &str = "10";
const FORM_WIDTH: &str = "70";
const FIELD_LENGTH: &str = "25";
const INPUT_LENGTH: &str = "50";

/// What the user typed into the form.
#[derive(Debug, PartialEq, Eq)]
enum Entry {
    Accepted(String),
    Empty,
    Mismatch,
}

/// Checks the form output: exactly two non-empty fields that agree.
fn check_entry(output: &str) -> Entry {
    let lines = split_lines(output);
    let fields: Vec<&str> = lines.iter().map(|l| l.trim()).collect();

    match fields.as_slice() {
        [first, second] if !first.is_empty() && !second.is_empty() => {
            if first == second {
                Entry::Accepted((*first).to_string())
            } else {
                Entry::Mismatch
            }
        }
        _ => Entry::Empty,
    }
}

fn key_bindings_file() -> Result<NamedTempFile> {
    let mut dialogrc = tempfile::Builder::new()
        .prefix("dialogrc_")
        .tempfile()
        .context("Unable to create a temporary dialogrc")?;

    dialogrc
        .write_all(FORM_KEY_BINDINGS.as_bytes())
        .and_then(|()| dialogrc.flush())
        .context("Unable to write the temporary dialogrc")?;

    Ok(dialogrc)
}

impl<R: Runner> Dialog<R> {
    /// Asks for a password twice until both entries agree and are not empty.
    ///
    /// Field values travel through a private temporary file handed to the
    /// program as a descriptor, never through the diagnostic channel.
    /// Cancelling the form returns `Ok(None)` straight away.
    pub fn password(
        &self,
        title: &str,
        label: Option<&str>,
        confirm_label: Option<&str>,
    ) -> PromptResult<String> {
        let label = label.map_or_else(|| self.tr("password"), str::to_string);
        let confirm_label =
            confirm_label.map_or_else(|| self.tr("confirm_password"), str::to_string);

        let dialogrc = key_bindings_file()?;

        loop {
            let output = tempfile::Builder::new()
                .prefix("dialog_out_")
                .tempfile()
                .context("Unable to create a temporary output file")?;

            let writer = OpenOptions::new()
                .write(true)
                .open(output.path())
                .with_context(|| format!("Unable to open {}", output.path().display()))?;
            let fd = super::process::descriptor(&writer)?;

            let args = vec![
                "--insecure".to_string(),
                "--output-fd".to_string(),
                fd.to_string(),
                "--visit-items".to_string(),
                "--passwordform".to_string(),
                title.to_string(),
                FORM_HEIGHT.to_string(),
                FORM_WIDTH.to_string(),
                "0".to_string(),
                format!("{label}:"),
                "1".to_string(),
                "10".to_string(),
                String::new(),
                "0".to_string(),
                "30".to_string(),
                FIELD_LENGTH.to_string(),
                INPUT_LENGTH.to_string(),
                format!("{confirm_label}:"),
                "2".to_string(),
                "10".to_string(),
                String::new(),
                "2".to_string(),
                "30".to_string(),
                FIELD_LENGTH.to_string(),
                INPUT_LENGTH.to_string(),
            ];

            let invocation = self
                .invocation(args)
                .with_env(DIALOGRC_ENV, dialogrc.path())
                .with_output(OutputChannel {
                    file: writer,
                    path: output.path().to_path_buf(),
                });

            let outcome = self.execute(invocation, false)?;
            if !outcome.success() {
                info!("Password form cancelled");
                return Ok(None);
            }

            let entered = fs::read_to_string(output.path())
                .with_context(|| format!("Unable to read {}", output.path().display()))?;

            match check_entry(&entered) {
                Entry::Accepted(password) => return Ok(Some(password)),
                Entry::Empty => {
                    debug!("Password form returned an empty field");
                    self.msgbox(&self.tr("error"), &self.tr("empty_password"))?;
                }
                Entry::Mismatch => {
                    debug!("Password fields do not match");
                    self.msgbox(&self.tr("error"), &self.tr("password_mismatch"))?;
                }
            }
        }
    }
}
