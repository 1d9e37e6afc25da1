#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::{
    cell::RefCell,
    collections::VecDeque,
    fs,
    io::Write,
    path::PathBuf,
};

use anyhow::{Result, bail};

use super::{Dialog, Invocation, Outcome, Runner};

mod menu_tests;
mod password_tests;

/// Number of caption override arguments in front of every directive.
const LABEL_ARGS: usize = 8;

/// What the fake program does when invoked.
struct Reply {
    code: i32,
    stderr: String,
    output: Option<String>,
}

impl Reply {
    fn exit(code: i32) -> Self {
        Self {
            code,
            stderr: String::new(),
            output: None,
        }
    }

    fn stderr(code: i32, stderr: &str) -> Self {
        Self {
            code,
            stderr: stderr.to_string(),
            output: None,
        }
    }

    fn form(password: &str, confirm: &str) -> Self {
        Self {
            code: 0,
            stderr: String::new(),
            output: Some(format!("{password}\n{confirm}\n")),
        }
    }
}

/// One recorded invocation.
struct Call {
    program: String,
    args: Vec<String>,
    dialogrc: Option<PathBuf>,
    dialogrc_content: Option<String>,
    output_path: Option<PathBuf>,
}

impl Call {
    /// Arguments after the caption overrides.
    fn directive(&self) -> &[String] {
        &self.args[LABEL_ARGS..]
    }
}

/// Plays back canned replies and records what it was asked to run.
struct ScriptedRunner {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedRunner {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> std::cell::Ref<'_, Vec<Call>> {
        self.calls.borrow()
    }

    fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, mut invocation: Invocation) -> Result<Outcome> {
        let dialogrc = invocation.env("DIALOGRC").map(PathBuf::from);
        let dialogrc_content = dialogrc
            .as_ref()
            .map(|p| fs::read_to_string(p).unwrap());

        self.calls.borrow_mut().push(Call {
            program: invocation.program.clone(),
            args: invocation.args.clone(),
            dialogrc,
            dialogrc_content,
            output_path: invocation.output.as_ref().map(|o| o.path.clone()),
        });

        let Some(reply) = self.replies.borrow_mut().pop_front() else {
            bail!("unexpected dialog invocation");
        };

        if let Some(text) = reply.output
            && let Some(output) = invocation.output.as_mut()
        {
            output.file.write_all(text.as_bytes()).unwrap();
        }

        Ok(Outcome::new(reply.code, reply.stderr))
    }
}

fn scripted(replies: impl IntoIterator<Item = Reply>) -> Dialog<ScriptedRunner> {
    Dialog::with_runner(ScriptedRunner::new(replies)).with_language("en")
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| (*a).to_string()).collect()
}
