//! External command abstraction
//!
//! Every tool envboot drives (the interpreter, pip, the packaging helper,
//! the interactive shell) goes through a [`CommandRunner`], so the exit
//! status of each call is visible to the caller instead of being lost.

pub mod dry_run;
#[cfg(test)]
pub mod recording;
pub mod system;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use dry_run::DryRunRunner;
pub use system::SystemRunner;

/// A single external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    /// Variables set on the child, on top of the inherited environment
    pub env_set: Vec<(OsString, OsString)>,
    /// Variables removed from the child's environment
    pub env_remove: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env_set: Vec::new(),
            env_remove: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env_set.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn env_remove(mut self, key: impl Into<OsString>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// Program name as a lossy string, for messages
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Look up a variable this spec sets on the child
    #[cfg(test)]
    pub fn env_value(&self, key: &str) -> Option<&OsString> {
        self.env_set
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    if word.is_empty() || word.contains(char::is_whitespace) {
        format!("\"{word}\"")
    } else {
        word.to_string()
    }
}

/// How a command's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Stream stdout/stderr to the terminal
    Inherit,
    /// Collect stdout/stderr into the outcome
    Output,
}

/// Result of running a command to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code to report; signals map to 1
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }
}

/// Script an interactive shell reads while starting up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupScript {
    pub path: PathBuf,
    pub contents: String,
}

/// An interactive shell session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    pub command: CommandSpec,
    /// Written before the shell starts; `None` when the command carries everything
    pub startup: Option<StartupScript>,
}

impl SessionSpec {
    pub fn new(command: CommandSpec) -> Self {
        Self {
            command,
            startup: None,
        }
    }

    #[must_use]
    pub fn with_startup(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.startup = Some(StartupScript {
            path: path.as_ref().to_path_buf(),
            contents: contents.into(),
        });
        self
    }

    /// Command line followed by the startup script
    #[cfg(test)]
    pub fn render(&self) -> String {
        match self.startup {
            Some(ref startup) => format!("{}\n{}", self.command, startup.contents),
            None => self.command.to_string(),
        }
    }
}

/// Executes external commands
pub trait CommandRunner {
    /// Run a command to completion
    fn run(&mut self, spec: &CommandSpec, capture: Capture) -> Result<CommandOutcome>;

    /// Hand the terminal over to an interactive session that outlives envboot
    fn spawn_session(&mut self, session: &SessionSpec) -> Result<()>;
}
