//! Test runner that records invocations and replays scripted outcomes

use std::collections::VecDeque;

use super::{Capture, CommandOutcome, CommandRunner, CommandSpec, SessionSpec};
use crate::error::{EnvbootError, Result};

/// Scripted reply to a matching command
#[derive(Debug)]
enum Reply {
    Outcome(CommandOutcome),
    SpawnError,
}

/// Records every command; replies are matched by a substring of the
/// rendered command line, falling back to success
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<(CommandSpec, Capture)>,
    pub sessions: Vec<SessionSpec>,
    scripted: VecDeque<(String, Reply)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `outcome` to the next command whose line contains `needle`
    #[must_use]
    pub fn on(mut self, needle: &str, outcome: CommandOutcome) -> Self {
        self.scripted
            .push_back((needle.to_string(), Reply::Outcome(outcome)));
        self
    }

    /// Fail to start the next command whose line contains `needle`
    #[must_use]
    pub fn fail_spawn(mut self, needle: &str) -> Self {
        self.scripted.push_back((needle.to_string(), Reply::SpawnError));
        self
    }

    /// Rendered command lines, in call order
    pub fn lines(&self) -> Vec<String> {
        self.calls.iter().map(|(spec, _)| spec.to_string()).collect()
    }

    pub fn ran(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, spec: &CommandSpec, capture: Capture) -> Result<CommandOutcome> {
        let line = spec.to_string();
        self.calls.push((spec.clone(), capture));

        let position = self
            .scripted
            .iter()
            .position(|(needle, _)| line.contains(needle.as_str()));
        match position.and_then(|i| self.scripted.remove(i)) {
            Some((_, Reply::Outcome(outcome))) => Ok(outcome),
            Some((_, Reply::SpawnError)) => Err(EnvbootError::CommandSpawnFailed {
                program: spec.program_name(),
                reason: "No such file or directory".to_string(),
            }),
            None => Ok(CommandOutcome::success()),
        }
    }

    fn spawn_session(&mut self, session: &SessionSpec) -> Result<()> {
        self.sessions.push(session.clone());
        Ok(())
    }
}
