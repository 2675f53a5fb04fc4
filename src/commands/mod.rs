//! Command implementations for envboot CLI

pub mod build;
pub mod completions;
pub mod init;
pub mod shell;
pub mod version;

use std::path::{Path, PathBuf};

use crate::config::{self, ConfigOverrides, ProjectConfig};
use crate::error::{EnvbootError, Result};

/// State shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub project_dir: PathBuf,
    pub dry_run: bool,
}

impl Context {
    /// Resolve the project directory, defaulting to the current one
    pub fn new(project: Option<PathBuf>, dry_run: bool) -> Result<Self> {
        let project_dir = match project {
            Some(dir) => std::path::absolute(dir)?,
            None => std::env::current_dir()?,
        };

        if !project_dir.is_dir() {
            return Err(EnvbootError::ProjectNotFound {
                path: project_dir.display().to_string(),
            });
        }

        Ok(Self {
            project_dir,
            dry_run,
        })
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Load envboot.yaml and layer `overrides` on top
    pub fn config(&self, overrides: &ConfigOverrides) -> Result<ProjectConfig> {
        let config = config::load(&self.project_dir)?.with_overrides(overrides);
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_rejects_missing_project() {
        let temp = TempDir::new().unwrap();
        let result = Context::new(Some(temp.path().join("missing")), false);
        assert!(matches!(
            result,
            Err(EnvbootError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn test_context_config_applies_overrides() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(config::CONFIG_FILE), "env_dir: .venv\n").unwrap();

        let ctx = Context::new(Some(temp.path().to_path_buf()), false).unwrap();
        let config = ctx
            .config(&ConfigOverrides {
                manifest: Some("requirements-dev.txt".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.env_dir, ".venv");
        assert_eq!(config.manifest, "requirements-dev.txt");
    }
}
