//! Interactive session command lines
//!
//! The interactive shell itself runs the environment's activation hook, so
//! the session keeps the hook's prompt and `deactivate` function. PowerShell
//! takes the commands on its command line and stays open with `-NoExit`.
//! POSIX shells read them from a startup script written just before the
//! shell starts, after the operator's own rc file.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::exec::{CommandSpec, SessionSpec};

/// Shell the session is opened in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellFlavor {
    PowerShell,
    Posix { shell: String },
}

/// How a POSIX shell is pointed at the startup script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Startup {
    /// `bash --rcfile <script> -i`
    RcFile,
    /// `ZDOTDIR=<dir> zsh -i`, reading `<dir>/.zshrc`
    ZDotDir,
    /// `ENV=<script> sh -i`, read by sh, dash and ksh
    EnvFile,
}

impl Startup {
    fn for_shell(shell: &str) -> Self {
        let name = Path::new(shell)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match name.as_str() {
            "bash" => Startup::RcFile,
            "zsh" => Startup::ZDotDir,
            _ => Startup::EnvFile,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Startup::RcFile => "bashrc",
            Startup::ZDotDir => ".zshrc",
            Startup::EnvFile => "env.sh",
        }
    }

    /// Lines that load the operator's own configuration first
    fn user_rc(self) -> &'static [&'static str] {
        match self {
            Startup::RcFile => &[r#"if [ -f "$HOME/.bashrc" ]; then . "$HOME/.bashrc"; fi"#],
            Startup::ZDotDir => &[
                r#"ZDOTDIR="$HOME""#,
                r#"if [ -f "$ZDOTDIR/.zshrc" ]; then . "$ZDOTDIR/.zshrc"; fi"#,
            ],
            Startup::EnvFile => &[],
        }
    }
}

impl ShellFlavor {
    /// PowerShell on Windows, `$SHELL` (or `/bin/sh`) elsewhere
    pub fn host() -> Self {
        if cfg!(windows) {
            ShellFlavor::PowerShell
        } else {
            let shell = std::env::var("SHELL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "/bin/sh".to_string());
            ShellFlavor::Posix { shell }
        }
    }

    fn quote(&self, word: &str) -> String {
        match self {
            ShellFlavor::PowerShell => format!("'{}'", word.replace('\'', "''")),
            ShellFlavor::Posix { .. } => format!("'{}'", word.replace('\'', "'\\''")),
        }
    }
}

/// Work done inside the session before it turns interactive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPlan {
    /// Activate only
    Activate,
    /// Activate, upgrade pip, install the manifest
    ActivateAndInstall,
}

/// Directory holding this launcher's startup script
fn startup_dir() -> PathBuf {
    std::env::temp_dir().join(format!("envboot-session-{}", std::process::id()))
}

/// Commands the session runs, in order; each one runs whatever the
/// previous one returned
fn session_steps(flavor: &ShellFlavor, config: &ProjectConfig, plan: SessionPlan) -> Vec<String> {
    let mut steps = Vec::new();
    match flavor {
        ShellFlavor::PowerShell => {
            let hook = format!(".\\{}\\Scripts\\Activate.ps1", config.env_dir);
            steps.push(format!("& {}", flavor.quote(&hook)));
        }
        ShellFlavor::Posix { .. } => {
            let hook = format!("{}/bin/activate", config.env_dir);
            steps.push(format!(". {}", flavor.quote(&hook)));
        }
    }
    if plan == SessionPlan::ActivateAndInstall {
        steps.push("python -m pip install --upgrade pip".to_string());
        steps.push(format!(
            "python -m pip install -r {}",
            flavor.quote(&config.manifest)
        ));
    }
    steps
}

/// Build the session for `plan`
pub fn session_command(
    flavor: &ShellFlavor,
    project_dir: &Path,
    config: &ProjectConfig,
    plan: SessionPlan,
) -> SessionSpec {
    let steps = session_steps(flavor, config, plan);

    match flavor {
        ShellFlavor::PowerShell => SessionSpec::new(
            CommandSpec::new("powershell")
                .args(["-NoExit", "-Command"])
                .arg(steps.join("; "))
                .current_dir(project_dir),
        ),
        ShellFlavor::Posix { shell } => {
            let startup = Startup::for_shell(shell);
            let dir = startup_dir();
            let script = dir.join(startup.file_name());

            let mut lines: Vec<String> = startup.user_rc().iter().map(ToString::to_string).collect();
            // The operator's rc file may change directory
            lines.push(format!(
                "cd {}",
                flavor.quote(&project_dir.to_string_lossy())
            ));
            lines.extend(steps);
            let mut contents = lines.join("\n");
            contents.push('\n');
            tracing::debug!(script = %script.display(), "session startup script");

            let command = match startup {
                Startup::RcFile => CommandSpec::new(shell)
                    .arg("--rcfile")
                    .arg(&script)
                    .arg("-i"),
                Startup::ZDotDir => CommandSpec::new(shell).arg("-i").env("ZDOTDIR", &dir),
                Startup::EnvFile => CommandSpec::new(shell).arg("-i").env("ENV", &script),
            };
            SessionSpec::new(command.current_dir(project_dir)).with_startup(script, contents)
        }
    }
}
