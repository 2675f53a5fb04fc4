//! Common test utilities for envboot integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project directory
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Project with a manifest and a cx_Freeze descriptor
    #[allow(dead_code)]
    pub fn buildable() -> Self {
        let project = Self::new();
        project.write_file("requirements.txt", "PyQt6\nrequests\n");
        project.write_file("setup.py", "from cx_Freeze import setup\n");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Create the environment directory without a real interpreter
    #[allow(dead_code)]
    pub fn create_env_dir(&self, name: &str) {
        std::fs::create_dir_all(self.path.join(name)).expect("Failed to create env directory");
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// envboot command pointed at this project, isolated from ENVBOOT_* in the caller's environment
    pub fn envboot(&self) -> Command {
        let mut cmd = envboot_cmd();
        cmd.arg("-C").arg(&self.path);
        cmd
    }

    /// envboot command in dry-run mode
    #[allow(dead_code)]
    pub fn dry_run(&self) -> Command {
        let mut cmd = self.envboot();
        cmd.arg("--dry-run");
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// envboot binary with a clean ENVBOOT_* environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn envboot_cmd() -> Command {
    let mut cmd = Command::cargo_bin("envboot").expect("envboot binary should be built");
    for var in [
        "ENVBOOT_PROJECT",
        "ENVBOOT_ENV_DIR",
        "ENVBOOT_PYTHON",
        "ENVBOOT_MANIFEST",
        "ENVBOOT_DESCRIPTOR",
        "ENVBOOT_TOOL",
        "ENVBOOT_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Byte offset of `needle` in `haystack`, panicking when absent
#[allow(dead_code)]
pub fn position_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in:\n{haystack}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
    }

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("nested/file.txt", "hello");
        assert!(project.file_exists("nested/file.txt"));
        assert_eq!(project.read_file("nested/file.txt"), "hello");
    }
}
