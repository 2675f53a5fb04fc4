//! Activation overlay
//!
//! A native process cannot source `activate`/`Activate.ps1` into itself.
//! Instead the variables those hooks export are computed here and applied
//! to every child command while the environment is active. Deactivating
//! is dropping the overlay.

use std::ffi::OsString;
use std::path::PathBuf;

use super::VirtualEnv;
use crate::exec::CommandSpec;

/// Environment variables an activation hook would set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    virtual_env: PathBuf,
    prompt: String,
    path: Option<OsString>,
}

impl Activation {
    /// Activation for `env` on top of this process's `PATH`
    pub fn for_env(env: &VirtualEnv) -> Self {
        Self::with_base_path(env, std::env::var_os("PATH"))
    }

    /// Activation for `env` on top of an explicit `PATH`
    pub fn with_base_path(env: &VirtualEnv, base_path: Option<OsString>) -> Self {
        let root = std::path::absolute(env.root()).unwrap_or_else(|_| env.root().to_path_buf());
        let scripts = root.join(env.layout().scripts_dir());

        let mut entries = vec![scripts];
        if let Some(ref base) = base_path {
            entries.extend(std::env::split_paths(base));
        }
        let path = match std::env::join_paths(entries) {
            Ok(joined) => Some(joined),
            Err(e) => {
                tracing::warn!(error = %e, "cannot prefix PATH, leaving it unchanged");
                None
            }
        };

        let prompt = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            virtual_env: root,
            prompt,
            path,
        }
    }

    pub fn virtual_env(&self) -> &PathBuf {
        &self.virtual_env
    }

    /// Apply the overlay to a command
    pub fn apply(&self, spec: CommandSpec) -> CommandSpec {
        let mut spec = spec
            .env("VIRTUAL_ENV", self.virtual_env.as_os_str())
            .env("VIRTUAL_ENV_PROMPT", &self.prompt)
            .env_remove("PYTHONHOME");
        if let Some(ref path) = self.path {
            spec = spec.env("PATH", path);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Layout;

    fn posix_env() -> VirtualEnv {
        VirtualEnv::with_layout(PathBuf::from("/work/app/venv"), Layout::Posix)
    }

    #[cfg(unix)]
    #[test]
    fn test_apply_sets_virtual_env() {
        let activation = Activation::with_base_path(&posix_env(), None);
        let spec = activation.apply(CommandSpec::new("python"));

        assert_eq!(
            spec.env_value("VIRTUAL_ENV"),
            Some(&OsString::from("/work/app/venv"))
        );
        assert_eq!(
            spec.env_value("VIRTUAL_ENV_PROMPT"),
            Some(&OsString::from("venv"))
        );
        assert!(spec.env_remove.contains(&OsString::from("PYTHONHOME")));
    }

    #[cfg(unix)]
    #[test]
    fn test_path_is_prefixed_with_scripts_dir() {
        let activation =
            Activation::with_base_path(&posix_env(), Some(OsString::from("/usr/bin:/bin")));
        let spec = activation.apply(CommandSpec::new("python"));

        assert_eq!(
            spec.env_value("PATH"),
            Some(&OsString::from("/work/app/venv/bin:/usr/bin:/bin"))
        );
    }

    #[test]
    fn test_apply_leaves_program_and_args() {
        let activation = Activation::with_base_path(&posix_env(), None);
        let spec = activation.apply(CommandSpec::new("python").args(["-m", "pip"]));
        assert_eq!(spec.to_string(), "python -m pip");
    }
}
