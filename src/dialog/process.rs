//! Running the dialog program as a child process.

use std::{
    ffi::OsString,
    fs::File,
    path::PathBuf,
    process::{Command, Stdio},
};

use anyhow::{Context, Result};
use derive_more::{Display, Error};
use log::{debug, warn};

/// Failure of an invocation run in strict mode.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum DialogError {
    #[display("dialog exited with status {code}: {stderr}")]
    Failed { code: i32, stderr: String },
}

/// Exit code and captured diagnostic channel of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub code: i32,
    pub stderr: String,
}

impl Outcome {
    #[must_use]
    pub fn new(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// A file the child writes results into, kept off the diagnostic channel.
///
/// `file` is the write handle the child inherits; `path` is where the
/// caller reads the results back from.
#[derive(Debug)]
pub struct OutputChannel {
    pub file: File,
    pub path: PathBuf,
}

/// Everything needed to start the dialog program once.
#[derive(Debug)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, OsString)>,
    pub output: Option<OutputChannel>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            envs: Vec::new(),
            output: None,
        }
    }

    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputChannel) -> Self {
        self.output = Some(output);
        self
    }

    /// Looks up an environment override by name.
    #[must_use]
    pub fn env(&self, key: &str) -> Option<&OsString> {
        self.envs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Human readable command line for log records.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|a| {
                if a.is_empty() || a.contains(char::is_whitespace) {
                    format!("\"{a}\"")
                } else {
                    a.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Starts the dialog program and waits for it to exit.
pub trait Runner {
    fn run(&self, invocation: Invocation) -> Result<Outcome>;
}

/// Production runner: the child shares the terminal (stdin/stdout) and its
/// stderr is captured as the payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, invocation: Invocation) -> Result<Outcome> {
        debug!("Running: {}", invocation.command_line());

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());

        if let Some(output) = &invocation.output {
            inherit_output(&mut command, &output.file)?;
        }

        let child = command
            .spawn()
            .with_context(|| format!("Unable to run {}, is it installed?", invocation.program))?;

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed waiting for {}", invocation.program))?;

        let code = output.status.code().unwrap_or_else(|| {
            warn!("{} terminated by a signal", invocation.program);
            -1
        });

        debug!("{} exited with {code}", invocation.program);

        Ok(Outcome {
            code,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Keeps `file` open across exec so the child can write to its descriptor.
#[cfg(unix)]
fn inherit_output(command: &mut Command, file: &File) -> Result<()> {
    use std::os::unix::{io::AsRawFd, process::CommandExt};

    let fd = file.as_raw_fd();

    // SAFETY: `pre_exec` runs in the child between fork and exec; only
    // async-signal-safe fcntl calls are made.
    unsafe {
        command.pre_exec(move || {
            let flags = libc::fcntl(fd, libc::F_GETFD);
            if flags < 0 {
                return Err(std::io::Error::last_os_error());
            }
            if libc::fcntl(fd, libc::F_SETFD, flags & !libc::FD_CLOEXEC) < 0 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }

    Ok(())
}

#[cfg(not(unix))]
fn inherit_output(_command: &mut Command, _file: &File) -> Result<()> {
    anyhow::bail!("Passing an output descriptor to dialog requires a Unix platform")
}

/// Descriptor number the child sees for `file`.
#[cfg(unix)]
pub(crate) fn descriptor(file: &File) -> Result<i32> {
    use std::os::unix::io::AsRawFd;
    Ok(file.as_raw_fd())
}

#[cfg(not(unix))]
pub(crate) fn descriptor(_file: &File) -> Result<i32> {
    anyhow::bail!("Passing an output descriptor to dialog requires a Unix platform")
}
