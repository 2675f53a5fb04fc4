//! Runner that prints commands instead of running them

use console::Style;

use super::{Capture, CommandOutcome, CommandRunner, CommandSpec, SessionSpec};
use crate::error::Result;

/// Prints every command and reports success with empty output
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl DryRunRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, spec: &CommandSpec, _capture: Capture) -> Result<CommandOutcome> {
        println!("{} {}", Style::new().dim().apply_to("[dry-run]"), spec);
        Ok(CommandOutcome::success())
    }

    fn spawn_session(&mut self, session: &SessionSpec) -> Result<()> {
        let tag = Style::new().dim().apply_to("[dry-run]");
        if let Some(ref startup) = session.startup {
            println!("{tag} startup script: {}", startup.path.display());
            for line in startup.contents.lines() {
                println!("    {line}");
            }
        }
        println!("{tag} session: {}", session.command);
        Ok(())
    }
}
