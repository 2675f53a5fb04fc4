//! Environment bootstrapper
//!
//! Runs the fixed build sequence against a project directory:
//! create the environment if needed, activate it, upgrade pip, install the
//! manifest, make sure the packaging helper is present, freeze the project,
//! deactivate. Two files are required and checked right before the step
//! that needs them; everything else is delegated to the external tools.

mod report;

use std::path::{Path, PathBuf};

use crate::config::{FailurePolicy, ProjectConfig};
use crate::environment::{self, Activation, VirtualEnv};
use crate::error::{EnvbootError, Result};
use crate::exec::{Capture, CommandOutcome, CommandRunner, CommandSpec};
use crate::ui;

pub use report::{BootstrapReport, Step, StepStatus};

/// Exit code recorded when a tool could not be started at all
const NOT_FOUND_CODE: i32 = 127;

/// Drives one bootstrap run
pub struct Bootstrapper<'a, R: CommandRunner> {
    runner: &'a mut R,
    project_dir: PathBuf,
    config: ProjectConfig,
    report: BootstrapReport,
}

impl<'a, R: CommandRunner> Bootstrapper<'a, R> {
    pub fn new(runner: &'a mut R, project_dir: &Path, config: ProjectConfig) -> Self {
        Self {
            runner,
            project_dir: project_dir.to_path_buf(),
            config,
            report: BootstrapReport::default(),
        }
    }

    /// Run every step in order
    ///
    /// Stops at the first fatal condition: a missing manifest or build
    /// descriptor, a failed environment creation, or (under the propagate
    /// policy) any failed tool.
    pub fn run(mut self) -> Result<BootstrapReport> {
        self.create_environment()?;

        // Layout is only known for sure once the environment exists
        let env = VirtualEnv::new(&self.project_dir, &self.config);
        let activation = self.activate(&env);

        self.upgrade_installer(&env, &activation)?;
        self.install_dependencies(&env, &activation)?;
        self.ensure_packaging_helper(&env, &activation)?;
        self.build(&env, &activation)?;
        self.deactivate(activation);

        Ok(self.report)
    }

    fn create_environment(&mut self) -> Result<()> {
        let env = VirtualEnv::new(&self.project_dir, &self.config);
        if env.exists() {
            tracing::info!(path = %env.root().display(), "environment exists");
            ui::skipped(&format!("Environment '{}' already exists", self.config.env_dir));
            self.report.record(Step::CreateEnvironment, StepStatus::Skipped);
            return Ok(());
        }

        ui::step(&format!(
            "Creating environment '{}' with Python {}",
            self.config.env_dir, self.config.python
        ));
        let spec = environment::creation_command(&self.project_dir, &self.config);
        let outcome = self.runner.run(&spec, Capture::Inherit)?;
        if !outcome.succeeded() {
            self.report
                .record(Step::CreateEnvironment, StepStatus::Failed(outcome.exit_code()));
            return Err(EnvbootError::EnvCreationFailed {
                path: env.root().display().to_string(),
                code: outcome.exit_code(),
            });
        }

        self.report.record(Step::CreateEnvironment, StepStatus::Ran);
        Ok(())
    }

    fn activate(&mut self, env: &VirtualEnv) -> Activation {
        let hook = env.activation_hook();
        if !hook.exists() {
            tracing::warn!(hook = %hook.display(), "activation hook not found");
        }

        ui::step("Activating environment");
        let activation = env.activate();
        tracing::debug!(virtual_env = %activation.virtual_env().display(), "activated");
        self.report.record(Step::Activate, StepStatus::Ran);
        activation
    }

    fn upgrade_installer(&mut self, env: &VirtualEnv, activation: &Activation) -> Result<()> {
        ui::step("Upgrading pip");
        let spec = env.python_command(["-m", "pip", "install", "--upgrade", "pip"]);
        self.run_tool(Step::UpgradeInstaller, activation, spec)
    }

    fn install_dependencies(&mut self, env: &VirtualEnv, activation: &Activation) -> Result<()> {
        let manifest = self.project_dir.join(&self.config.manifest);
        if !manifest.is_file() {
            return Err(EnvbootError::ManifestMissing {
                path: self.config.manifest.clone(),
            });
        }

        ui::step(&format!("Installing dependencies from {}", self.config.manifest));
        let spec = env
            .python_command(["-m", "pip", "install", "--upgrade", "-r"])
            .arg(&self.config.manifest);
        self.run_tool(Step::InstallDependencies, activation, spec)
    }

    fn ensure_packaging_helper(
        &mut self,
        env: &VirtualEnv,
        activation: &Activation,
    ) -> Result<()> {
        let package = self.config.helper_package().to_string();
        if self.helper_installed(env, activation, &package) {
            ui::skipped(&format!("{package} is already installed"));
            self.report
                .record(Step::EnsurePackagingHelper, StepStatus::Skipped);
            return Ok(());
        }

        ui::step(&format!("Installing {package}"));
        let spec = env.python_command(["-m", "pip", "install"]).arg(&package);
        self.run_tool(Step::EnsurePackagingHelper, activation, spec)
    }

    /// `pip show` prints nothing on stdout for a package it does not know
    fn helper_installed(&mut self, env: &VirtualEnv, activation: &Activation, package: &str) -> bool {
        let spec = self.prepare(
            activation,
            env.python_command(["-m", "pip", "show"]).arg(package),
        );
        match self.runner.run(&spec, Capture::Output) {
            Ok(outcome) => !outcome.stdout.trim().is_empty(),
            Err(e) => {
                tracing::warn!(error = %e, "could not query installed packages");
                false
            }
        }
    }

    fn build(&mut self, env: &VirtualEnv, activation: &Activation) -> Result<()> {
        let descriptor = self.config.descriptor().to_string();
        if !self.project_dir.join(&descriptor).is_file() {
            return Err(EnvbootError::DescriptorMissing { path: descriptor });
        }

        ui::step(&format!("Building with {}", self.config.tool.package()));
        let spec = env.python_command(self.config.tool.build_args(&descriptor));
        self.run_tool(Step::Build, activation, spec)
    }

    fn deactivate(&mut self, activation: Activation) {
        drop(activation);
        tracing::debug!("deactivated");
        self.report.record(Step::Deactivate, StepStatus::Ran);
    }

    fn prepare(&self, activation: &Activation, spec: CommandSpec) -> CommandSpec {
        activation.apply(spec.current_dir(&self.project_dir))
    }

    /// Run a tool step and apply the failure policy to its exit status
    fn run_tool(&mut self, step: Step, activation: &Activation, spec: CommandSpec) -> Result<()> {
        let spec = self.prepare(activation, spec);
        let outcome = match self.runner.run(&spec, Capture::Inherit) {
            Ok(outcome) => outcome,
            Err(e) if self.config.on_tool_failure == FailurePolicy::Ignore => {
                tracing::warn!(step = %step, error = %e, "tool could not be started");
                ui::warning(&format!("{e}"));
                CommandOutcome::failure(NOT_FOUND_CODE)
            }
            Err(e) => return Err(e),
        };

        if outcome.succeeded() {
            self.report.record(step, StepStatus::Ran);
            return Ok(());
        }

        let code = outcome.exit_code();
        self.report.record(step, StepStatus::Failed(code));
        match self.config.on_tool_failure {
            FailurePolicy::Ignore => {
                tracing::warn!(step = %step, code, command = %spec, "tool failed, continuing");
                ui::warning(&format!("{step} exited with code {code}, continuing"));
                Ok(())
            }
            FailurePolicy::Propagate => Err(EnvbootError::ToolFailed {
                step: step.to_string(),
                command: spec.to_string(),
                code,
            }),
        }
    }
}
