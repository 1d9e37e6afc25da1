use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::warn;

use installer_dialog::{
    Config, ConfigureArgs, Dialog, ListItem, Logging, MenuItem, PROJECT_NAME, PROJECT_VERSION,
    configure, i18n, show_configuration,
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Command,

    /// Verbose
    #[arg(short, long)]
    verbose: bool,

    /// Language for button captions and messages (overrides the config)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Dialog program to run (overrides the config)
    #[arg(long, global = true)]
    program: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show a message and wait for OK
    Msgbox { title: String, text: String },

    /// Ask a yes/no question; exits with 1 on "no" or cancel
    Yesno { title: String, text: String },

    /// Pick one entry of a menu; prints its label
    Menu {
        title: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Check any number of KEY=LABEL entries; prints the checked keys
    Checklist {
        title: String,
        text: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Pick one of KEY=LABEL entries (a trailing '*' marks the default); prints its key
    Radiolist {
        title: String,
        text: String,
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Ask for a line of text; prints it
    Input {
        title: String,
        text: String,
        /// Initial value
        #[arg(long, default_value = "")]
        init: String,
    },

    /// Ask for a password twice; prints it
    Password {
        title: String,
        /// Label of the first field
        #[arg(long)]
        label: Option<String>,
        /// Label of the confirmation field
        #[arg(long)]
        confirm_label: Option<String>,
    },

    /// Verify that the dialog program can be run
    Check,

    /// Show Config
    #[command(visible_alias = "show-configuration")]
    ShowConfig,

    /// Update the persisted configuration
    Configure(ConfigureArgs),
}

fn init_logging(verbose: bool) -> Result<()> {
    let file_name = format!("{PROJECT_NAME}.log");
    Logging::new()
        .with_file(file_name)
        .with_verbose(verbose)
        .start()
}

/// Splits `KEY=LABEL`. Without '=' the whole text is both key and label.
fn parse_entry(entry: &str) -> Result<(String, String)> {
    let (key, label) = entry.split_once('=').unwrap_or((entry, entry));
    if key.is_empty() {
        bail!("Entry '{entry}' has an empty key");
    }
    if key.contains(char::is_whitespace) {
        bail!("Entry key '{key}' cannot contain whitespace");
    }
    Ok((key.to_string(), label.to_string()))
}

fn parse_radio_entry(entry: &str) -> Result<ListItem> {
    let (text, selected) = match entry.strip_suffix('*') {
        Some(text) => (text, true),
        None => (entry, false),
    };
    let (key, label) = parse_entry(text)?;
    Ok(ListItem::new(key, label).selected(selected))
}

/// Prints the answer, or maps a cancelled prompt to exit status 1.
fn answer(value: Option<String>) -> ExitCode {
    match value {
        Some(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

fn settings(args: &UserArgs) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {e:#}");
        Config::default()
    });

    if let Some(program) = &args.program {
        config.dialog.program.clone_from(program);
    }
    if let Some(lang) = &args.lang {
        config.dialog.language = Some(lang.clone());
    }
    if let Some(lang) = &config.dialog.language {
        i18n::set_language(lang);
    }

    config
}

fn run_prompt(dialog: &Dialog, command: Command) -> Result<ExitCode> {
    let code = match command {
        Command::Msgbox { title, text } => {
            dialog.msgbox(&title, &text)?;
            ExitCode::SUCCESS
        }
        Command::Yesno { title, text } => {
            if dialog.yesno(&title, &text)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Menu { title, items } => {
            let items = items
                .into_iter()
                .map(|label| MenuItem::new(label.clone(), move || Ok(Some(label))))
                .collect();
            answer(dialog.menu(&title, items)?)
        }
        Command::Checklist { title, text, items } => {
            let entries = items
                .iter()
                .map(|e| parse_entry(e))
                .collect::<Result<Vec<_>>>()?;
            let pairs: Vec<(&str, &str)> = entries
                .iter()
                .map(|(k, l)| (k.as_str(), l.as_str()))
                .collect();
            answer(dialog.checklist(&title, &text, &pairs)?.map(|keys| keys.join(" ")))
        }
        Command::Radiolist { title, text, items } => {
            let items = items
                .iter()
                .map(|e| parse_radio_entry(e))
                .collect::<Result<Vec<_>>>()?;
            answer(dialog.radiolist(&title, &text, &items)?)
        }
        Command::Input { title, text, init } => answer(dialog.inputbox(&title, &text, &init)?),
        Command::Password {
            title,
            label,
            confirm_label,
        } => answer(dialog.password(&title, label.as_deref(), confirm_label.as_deref())?),
        Command::Check => {
            let version = dialog.probe()?;
            println!("{} {}: {version}", "✓".green(), dialog.program());
            ExitCode::SUCCESS
        }
        Command::ShowConfig => {
            show_configuration()?;
            ExitCode::SUCCESS
        }
        Command::Configure(args) => {
            configure(&args)?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

fn main() -> Result<ExitCode> {
    let args = UserArgs::parse();

    init_logging(args.verbose).context("Unable to start logging")?;

    let config = settings(&args);
    let dialog = Dialog::from_settings(&config.dialog);

    run_prompt(&dialog, args.command)
}
