//! Interactive session launcher
//!
//! Asks the operator whether to create the environment or just activate it,
//! then hands the terminal to a shell bound to the environment.

pub mod prompt;
pub mod session;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::environment;
use crate::error::Result;
use crate::exec::{Capture, CommandRunner};
use crate::ui;

pub use session::{SessionPlan, ShellFlavor};

/// Operator's answer to the launcher prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchChoice {
    /// `C`: create the environment, then open a session that installs deps
    Create,
    /// `A`: open a session on the existing environment
    Activate,
}

impl LaunchChoice {
    /// Parse a single-character answer, ignoring case and surrounding space
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.trim().chars();
        let choice = match chars.next()?.to_ascii_uppercase() {
            'C' => LaunchChoice::Create,
            'A' => LaunchChoice::Activate,
            _ => return None,
        };
        chars.next().is_none().then_some(choice)
    }
}

impl fmt::Display for LaunchChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchChoice::Create => f.write_str("create"),
            LaunchChoice::Activate => f.write_str("activate"),
        }
    }
}

/// Terminal title for the launcher, from config or the project name
pub fn window_title(project_dir: &Path, config: &ProjectConfig) -> String {
    config.title.clone().unwrap_or_else(|| {
        let name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "envboot".to_string());
        format!("{name} environment")
    })
}

/// Opens a shell session for a project
pub struct Launcher<'a, R: CommandRunner> {
    runner: &'a mut R,
    project_dir: PathBuf,
    config: ProjectConfig,
    flavor: ShellFlavor,
}

impl<'a, R: CommandRunner> Launcher<'a, R> {
    pub fn new(runner: &'a mut R, project_dir: &Path, config: ProjectConfig) -> Self {
        Self {
            runner,
            project_dir: project_dir.to_path_buf(),
            config,
            flavor: ShellFlavor::host(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_flavor(mut self, flavor: ShellFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Carry out `choice`
    ///
    /// For `Create` the environment is created first, blocking until the
    /// interpreter finishes. Its exit status is reported but does not stop
    /// the session from opening.
    pub fn launch(self, choice: LaunchChoice) -> Result<()> {
        tracing::info!(%choice, project = %self.project_dir.display(), "launching session");

        let plan = match choice {
            LaunchChoice::Create => {
                ui::step(&format!(
                    "Creating environment '{}' with Python {}",
                    self.config.env_dir, self.config.python
                ));
                let spec = environment::creation_command(&self.project_dir, &self.config);
                let outcome = self.runner.run(&spec, Capture::Inherit)?;
                if !outcome.succeeded() {
                    tracing::warn!(code = outcome.exit_code(), "environment creation failed");
                    ui::warning(&format!(
                        "Environment creation exited with code {}",
                        outcome.exit_code()
                    ));
                }
                SessionPlan::ActivateAndInstall
            }
            LaunchChoice::Activate => SessionPlan::Activate,
        };

        let session = session::session_command(&self.flavor, &self.project_dir, &self.config, plan);
        ui::step("Opening environment shell");
        self.runner.spawn_session(&session)
    }
}
