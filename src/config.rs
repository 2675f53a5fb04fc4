//! Project configuration (envboot.yaml)
//!
//! The file is optional. Values are layered as defaults, then the file,
//! then command line flags and `ENVBOOT_*` environment variables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnvbootError, Result};

/// Config filename, looked up in the project directory
pub const CONFIG_FILE: &str = "envboot.yaml";

/// Packaging helper used to freeze the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildTool {
    /// cx_Freeze, driven by `python setup.py build`
    CxFreeze,
    /// PyInstaller, driven by a `.spec` file
    Pyinstaller,
}

impl BuildTool {
    /// Distribution name as pip knows it
    pub fn package(self) -> &'static str {
        match self {
            BuildTool::CxFreeze => "cx_Freeze",
            BuildTool::Pyinstaller => "pyinstaller",
        }
    }

    /// Descriptor used when the config does not name one
    pub fn default_descriptor(self) -> &'static str {
        match self {
            BuildTool::CxFreeze => "setup.py",
            BuildTool::Pyinstaller => "main.spec",
        }
    }

    /// Interpreter arguments that run the build for `descriptor`
    pub fn build_args(self, descriptor: &str) -> Vec<String> {
        match self {
            BuildTool::CxFreeze => vec![descriptor.to_string(), "build".to_string()],
            BuildTool::Pyinstaller => vec![
                "-m".to_string(),
                "PyInstaller".to_string(),
                descriptor.to_string(),
            ],
        }
    }
}

/// What to do when an external tool exits non-zero after activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Warn and keep going
    #[default]
    Ignore,
    /// Abort with the tool's exit code
    Propagate,
}

/// Resolved project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Environment directory, relative to the project
    pub env_dir: String,

    /// Interpreter version used to create the environment
    pub python: String,

    /// Explicit interpreter program, replacing the version-based lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Dependency manifest
    pub manifest: String,

    /// Packaging helper
    pub tool: BuildTool,

    /// Build descriptor; falls back to the tool's default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,

    /// Package to install for the packaging helper, when it differs from the tool's
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_package: Option<String>,

    pub on_tool_failure: FailurePolicy,

    /// Terminal title set by the launcher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            env_dir: "venv".to_string(),
            python: "3.12".to_string(),
            interpreter: None,
            manifest: "requirements.txt".to_string(),
            tool: BuildTool::CxFreeze,
            descriptor: None,
            helper_package: None,
            on_tool_failure: FailurePolicy::Ignore,
            title: None,
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub env_dir: Option<String>,
    pub python: Option<String>,
    pub manifest: Option<String>,
    pub descriptor: Option<String>,
    pub tool: Option<BuildTool>,
    pub strict: bool,
}

impl ProjectConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Layer overrides on top of this config
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(ref env_dir) = overrides.env_dir {
            self.env_dir.clone_from(env_dir);
        }
        if let Some(ref python) = overrides.python {
            self.python.clone_from(python);
        }
        if let Some(ref manifest) = overrides.manifest {
            self.manifest.clone_from(manifest);
        }
        if let Some(tool) = overrides.tool {
            self.tool = tool;
        }
        if let Some(ref descriptor) = overrides.descriptor {
            self.descriptor = Some(descriptor.clone());
        }
        if overrides.strict {
            self.on_tool_failure = FailurePolicy::Propagate;
        }
        self
    }

    /// Build descriptor to use
    pub fn descriptor(&self) -> &str {
        self.descriptor
            .as_deref()
            .unwrap_or_else(|| self.tool.default_descriptor())
    }

    /// Package pip installs for the packaging helper
    pub fn helper_package(&self) -> &str {
        self.helper_package
            .as_deref()
            .unwrap_or_else(|| self.tool.package())
    }
}

/// Load configuration from a project directory
///
/// Returns the default config if envboot.yaml does not exist.
pub fn load(project_dir: &Path) -> Result<ProjectConfig> {
    let path = project_dir.join(CONFIG_FILE);

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ProjectConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| EnvbootError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    ProjectConfig::from_yaml(&content).map_err(|e| EnvbootError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Save configuration to a project directory
pub fn save(project_dir: &Path, config: &ProjectConfig) -> Result<()> {
    let path = project_dir.join(CONFIG_FILE);
    let content = config.to_yaml()?;

    fs::write(&path, content).map_err(|e| EnvbootError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
