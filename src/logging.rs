use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup.
///
/// The dialog program owns the whole terminal while a prompt is up, so by
/// default records go to a file in the project data directory. Verbose mode
/// writes debug records to stderr instead.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    verbose: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            verbose: false,
        }
    }

    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, enable: bool) -> Self {
        self.verbose = enable;
        self
    }

    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();
        b.filter_level(self.level());

        if !self.verbose
            && let Some(file_name) = &self.file_name
        {
            let log_file = log_file_path(&project_data_dir()?, file_name);

            let fd = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("Unable to open {} for writing", log_file.display()))?;

            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logger already initialized")?;

        Ok(())
    }
}

fn log_file_path(data_dir: &Path, file_name: &Path) -> PathBuf {
    data_dir.join(file_name)
}
