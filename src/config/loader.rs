use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result, bail};
use bon::Builder;
use log::info;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Margin, Rotate, Style},
};

use crate::{
    common::{print_header, project_config_dir},
    dialog::DEFAULT_PROGRAM,
    i18n::{current_language, is_supported, normalize_language},
};

pub(crate) const CONFIG_FILE_NAME: &str = "config.json";

#[derive(clap::Args)]
pub struct ConfigureArgs {
    /// Dialog program to run (name on PATH or absolute path)
    #[arg(long)]
    pub program: Option<String>,

    /// Language for button captions and messages (e.g. en, zh)
    #[arg(long)]
    pub language: Option<String>,

    /// Clear the screen before each prompt
    #[arg(long)]
    pub clear: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct DialogSettings {
    /// Program implementing the dialog command line (default: "dialog")
    #[serde(default = "default_program")]
    #[builder(into, default = default_program())]
    pub program: String,
    /// Language code; unset means "follow the locale environment"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Pass --clear to the boxed prompts (default: true)
    #[serde(default = "default_true")]
    #[builder(default = true)]
    pub clear: bool,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            language: None,
            clear: true,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dialog: DialogSettings,
}

#[derive(Tabled)]
struct ConfigDisplay<'a> {
    program: &'a str,
    language: String,
    clear: bool,
}

impl<'a> From<&'a Config> for ConfigDisplay<'a> {
    fn from(config: &'a Config) -> Self {
        let language = config.dialog.language.clone().unwrap_or_else(|| {
            format!("{} (from locale)", current_language())
        });

        Self {
            program: &config.dialog.program,
            language,
            clear: config.dialog.clear,
        }
    }
}

impl Config {
    pub(crate) fn load_existing(config_file: &Path) -> Result<Self> {
        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let config: Config = serde_json::from_str(&config_string)
            .context("Unable to deserialize configuration data")?;

        Ok(config)
    }

    pub(crate) fn save_to(&self, config_file: &Path) -> Result<()> {
        let config_string =
            serde_json::to_string_pretty(self).context("Unable to serialize configuration data")?;

        let mut fd = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(config_file)
            .with_context(|| format!("Unable to write {}", config_file.display()))?;

        fd.write_all(config_string.as_bytes()).with_context(|| {
            format!("Failed to write configuration to {}", config_file.display())
        })?;

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);
        self.save_to(&config_file)?;
        info!("Configuration saved to {}", config_file.display());
        Ok(())
    }

    pub fn load() -> Result<Self> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);

        if config_file.exists() {
            Config::load_existing(&config_file)
        } else {
            Ok(Config::default())
        }
    }

    /// Applies only the fields that were given on the command line.
    pub(crate) fn apply(&mut self, args: &ConfigureArgs) -> Result<()> {
        if let Some(program) = &args.program {
            if program.trim().is_empty() {
                bail!("Dialog program cannot be empty");
            }
            self.dialog.program.clone_from(program);
        }
        if let Some(language) = &args.language {
            let code = normalize_language(language);
            if !is_supported(&code) {
                bail!("Unsupported language: {language}");
            }
            self.dialog.language = Some(code);
        }
        if let Some(clear) = args.clear {
            self.dialog.clear = clear;
        }
        Ok(())
    }
}

fn display_configuration(config: &Config) {
    let display = ConfigDisplay::from(config);
    let mut table = Table::new([display]);
    table
        .with(Rotate::Left)
        .with(Style::modern())
        .with(Margin::new(4, 0, 0, 0));

    print_header();
    println!("{table}");
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC
////////////////////////////////////////////////////////////////////////////////

pub fn show_configuration() -> Result<()> {
    let config = Config::load()?;

    display_configuration(&config);

    Ok(())
}

pub fn configure(args: &ConfigureArgs) -> Result<()> {
    let mut config = Config::load()?;

    config.apply(args)?;
    config.save()?;

    display_configuration(&config);

    Ok(())
}
