//! Error types and handling for envboot
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for envboot operations
#[derive(Error, Diagnostic, Debug)]
pub enum EnvbootError {
    // Required project files
    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(envboot::manifest::missing),
        help("Create the manifest or point to it with --manifest")
    )]
    ManifestMissing { path: String },

    #[error("Build descriptor not found: {path}")]
    #[diagnostic(
        code(envboot::descriptor::missing),
        help("Create the build descriptor or point to it with --descriptor")
    )]
    DescriptorMissing { path: String },

    // Environment errors
    #[error("Failed to create environment at {path} (exit code {code})")]
    #[diagnostic(
        code(envboot::env::create_failed),
        help("Check that the requested interpreter version is installed")
    )]
    EnvCreationFailed { path: String, code: i32 },

    // External tool errors
    #[error("Failed to start '{program}': {reason}")]
    #[diagnostic(
        code(envboot::exec::spawn_failed),
        help("Make sure the program is installed and on PATH")
    )]
    CommandSpawnFailed { program: String, reason: String },

    #[error("Step '{step}' failed: {command} exited with code {code}")]
    #[diagnostic(
        code(envboot::exec::tool_failed),
        help("Re-run without --strict to continue past tool failures")
    )]
    ToolFailed {
        step: String,
        command: String,
        code: i32,
    },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(envboot::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(envboot::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Configuration file already exists: {path}")]
    #[diagnostic(
        code(envboot::config::exists),
        help("Pass --force to overwrite it")
    )]
    ConfigExists { path: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(envboot::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Project directory not found: {path}")]
    #[diagnostic(code(envboot::project::not_found))]
    ProjectNotFound { path: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(envboot::completions::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(envboot::io))]
    IoError { message: String },
}

impl EnvbootError {
    /// Process exit code for this error.
    ///
    /// Tool failures hand their own status through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvbootError::EnvCreationFailed { code, .. } | EnvbootError::ToolFailed { code, .. } => {
                *code
            }
            _ => 1,
        }
    }
}

impl From<std::io::Error> for EnvbootError {
    fn from(err: std::io::Error) -> Self {
        EnvbootError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for EnvbootError {
    fn from(err: serde_yaml::Error) -> Self {
        EnvbootError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for EnvbootError {
    fn from(err: inquire::InquireError) -> Self {
        EnvbootError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, EnvbootError>;
