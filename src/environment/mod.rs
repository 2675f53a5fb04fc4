//! Virtual environment layout and creation
//!
//! This module handles:
//! - Locating the environment directory and its platform layout
//! - Building the interpreter command that creates it
//! - Computing the activation overlay (see [`activation`])

pub mod activation;

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::exec::CommandSpec;

pub use activation::Activation;

/// Directory layout inside an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Scripts/python.exe`, `Scripts/Activate.ps1`
    Windows,
    /// `bin/python`, `bin/activate`
    Posix,
}

impl Layout {
    /// Layout venv produces on this host
    pub fn host() -> Self {
        if cfg!(windows) {
            Layout::Windows
        } else {
            Layout::Posix
        }
    }

    pub(crate) fn scripts_dir(self) -> &'static str {
        match self {
            Layout::Windows => "Scripts",
            Layout::Posix => "bin",
        }
    }

    fn python_exe(self) -> &'static str {
        match self {
            Layout::Windows => "python.exe",
            Layout::Posix => "python",
        }
    }

    fn hook(self) -> &'static str {
        match self {
            Layout::Windows => "Activate.ps1",
            Layout::Posix => "activate",
        }
    }
}

/// An isolated interpreter environment rooted in the project
#[derive(Debug, Clone)]
pub struct VirtualEnv {
    root: PathBuf,
    layout: Layout,
}

impl VirtualEnv {
    /// Environment for `config.env_dir` under `project_dir`
    ///
    /// An existing directory decides the layout; otherwise the host does.
    pub fn new(project_dir: &Path, config: &ProjectConfig) -> Self {
        let root = project_dir.join(&config.env_dir);
        let layout = detect_layout(&root).unwrap_or_else(Layout::host);
        Self { root, layout }
    }

    #[cfg(test)]
    pub fn with_layout(root: PathBuf, layout: Layout) -> Self {
        Self { root, layout }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join(self.layout.scripts_dir())
    }

    /// Interpreter inside the environment
    pub fn python(&self) -> PathBuf {
        self.scripts_dir().join(self.layout.python_exe())
    }

    /// Activation hook script for interactive shells
    pub fn activation_hook(&self) -> PathBuf {
        self.scripts_dir().join(self.layout.hook())
    }

    /// Overlay equivalent to running the activation hook
    pub fn activate(&self) -> Activation {
        Activation::for_env(self)
    }

    /// Command running the environment's interpreter with `args`
    pub fn python_command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<std::ffi::OsString>,
    {
        CommandSpec::new(self.python()).args(args)
    }
}

fn detect_layout(root: &Path) -> Option<Layout> {
    if root.join("Scripts").join("python.exe").exists() {
        Some(Layout::Windows)
    } else if root.join("bin").join("python").exists() {
        Some(Layout::Posix)
    } else {
        None
    }
}

/// Command that creates the environment with the configured interpreter
///
/// Windows goes through the `py` launcher (`py -3.12`), elsewhere the
/// versioned binary (`python3.12`). `interpreter` replaces either.
pub fn creation_command(project_dir: &Path, config: &ProjectConfig) -> CommandSpec {
    let base = match (&config.interpreter, Layout::host()) {
        (Some(interpreter), _) => CommandSpec::new(interpreter),
        (None, Layout::Windows) => CommandSpec::new("py").arg(format!("-{}", config.python)),
        (None, Layout::Posix) => CommandSpec::new(format!("python{}", config.python)),
    };
    base.args(["-m", "venv"])
        .arg(&config.env_dir)
        .current_dir(project_dir)
}
