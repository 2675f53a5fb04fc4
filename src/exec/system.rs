//! Runner backed by `std::process::Command`

use std::fs;
use std::process::{Command, Stdio};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use super::{Capture, CommandOutcome, CommandRunner, CommandSpec, SessionSpec};
use crate::error::{EnvbootError, Result};

/// Runs commands on the host
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn to_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    if let Some(ref cwd) = spec.cwd {
        cmd.current_dir(cwd);
    }
    for key in &spec.env_remove {
        cmd.env_remove(key);
    }
    for (key, value) in &spec.env_set {
        cmd.env(key, value);
    }
    cmd
}

fn spawn_failed(spec: &CommandSpec, err: &std::io::Error) -> EnvbootError {
    EnvbootError::CommandSpawnFailed {
        program: spec.program_name(),
        reason: err.to_string(),
    }
}

fn spinner(spec: &CommandSpec) -> Option<ProgressBar> {
    if !Term::stderr().is_term() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner} Running {msg}")
        .map(|s| s.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]))
    {
        pb.set_style(style);
    }
    pb.set_message(spec.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec, capture: Capture) -> Result<CommandOutcome> {
        tracing::debug!(command = %spec, cwd = ?spec.cwd, "running");
        let mut cmd = to_command(spec);

        match capture {
            Capture::Inherit => {
                let status = cmd.status().map_err(|e| spawn_failed(spec, &e))?;
                Ok(CommandOutcome {
                    code: status.code(),
                    ..Default::default()
                })
            }
            Capture::Output => {
                let pb = spinner(spec);
                let output = cmd.stdin(Stdio::null()).output();
                if let Some(pb) = pb {
                    pb.finish_and_clear();
                }
                let output = output.map_err(|e| spawn_failed(spec, &e))?;
                Ok(CommandOutcome {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
        }
    }

    #[cfg(windows)]
    fn spawn_session(&mut self, session: &SessionSpec) -> Result<()> {
        write_startup(session)?;
        let spec = &session.command;

        // `start` opens a new console window and returns at once
        let wrapped = CommandSpec {
            program: "cmd".into(),
            args: ["/C", "start", ""]
                .into_iter()
                .map(Into::into)
                .chain(std::iter::once(spec.program.clone()))
                .chain(spec.args.iter().cloned())
                .collect(),
            ..spec.clone()
        };

        tracing::debug!(command = %wrapped, "starting session window");
        to_command(&wrapped)
            .spawn()
            .map_err(|e| spawn_failed(spec, &e))?;
        Ok(())
    }

    #[cfg(not(windows))]
    fn spawn_session(&mut self, session: &SessionSpec) -> Result<()> {
        use std::os::unix::process::CommandExt;

        write_startup(session)?;
        let spec = &session.command;

        tracing::debug!(command = %spec, "replacing process with session");
        // exec only returns on failure
        let err = to_command(spec).exec();
        Err(spawn_failed(spec, &err))
    }
}

fn write_startup(session: &SessionSpec) -> Result<()> {
    let Some(ref startup) = session.startup else {
        return Ok(());
    };

    let write_failed = |e: std::io::Error| EnvbootError::FileWriteFailed {
        path: startup.path.display().to_string(),
        reason: e.to_string(),
    };
    if let Some(parent) = startup.path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(&startup.path, &startup.contents).map_err(write_failed)?;
    tracing::debug!(path = %startup.path.display(), "wrote session startup script");
    Ok(())
}
