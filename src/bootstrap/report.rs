//! Ordered record of a bootstrap run

use std::fmt;

/// Bootstrap steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateEnvironment,
    Activate,
    UpgradeInstaller,
    InstallDependencies,
    EnsurePackagingHelper,
    Build,
    Deactivate,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CreateEnvironment => "create environment",
            Step::Activate => "activate",
            Step::UpgradeInstaller => "upgrade pip",
            Step::InstallDependencies => "install dependencies",
            Step::EnsurePackagingHelper => "install packaging helper",
            Step::Build => "build",
            Step::Deactivate => "deactivate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Ran,
    Skipped,
    /// Tool exited with this code
    Failed(i32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub steps: Vec<(Step, StepStatus)>,
}

impl BootstrapReport {
    pub fn record(&mut self, step: Step, status: StepStatus) {
        tracing::trace!(step = %step, ?status, "step finished");
        self.steps.push((step, status));
    }

    #[cfg(test)]
    pub fn status(&self, step: Step) -> Option<StepStatus> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, status)| *status)
    }

    /// Steps whose tool exited non-zero but were let through
    pub fn failures(&self) -> impl Iterator<Item = (Step, i32)> + '_ {
        self.steps.iter().filter_map(|(step, status)| match status {
            StepStatus::Failed(code) => Some((*step, *code)),
            _ => None,
        })
    }
}
