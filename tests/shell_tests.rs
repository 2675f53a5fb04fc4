//! Integration tests for `envboot shell`, run in dry-run mode so no
//! session is actually opened

mod common;

use common::TestProject;
use predicates::prelude::*;

#[test]
fn test_shell_rejects_invalid_choice() {
    let project = TestProject::new();

    project
        .dry_run()
        .args(["shell", "--choice", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid choice"))
        .stdout(predicate::str::contains("session:").not());
}

#[test]
fn test_shell_create_choice_is_case_insensitive() {
    for choice in ["c", "C"] {
        let project = TestProject::new();
        project.write_file("requirements.txt", "requests\n");

        project
            .dry_run()
            .args(["shell", "--choice", choice])
            .assert()
            .success()
            .stdout(predicate::str::contains("-m venv venv"))
            .stdout(predicate::str::contains("session:"))
            .stdout(predicate::str::contains("pip install -r"));
    }
}

#[test]
fn test_shell_activate_choice() {
    for choice in ["a", "A"] {
        let project = TestProject::new();
        project.create_env_dir("venv");

        project
            .dry_run()
            .args(["shell", "--choice", choice])
            .assert()
            .success()
            .stdout(predicate::str::contains("session:"))
            .stdout(predicate::str::contains("activate"))
            .stdout(predicate::str::contains("-m venv").not())
            .stdout(predicate::str::contains("pip install").not());
    }
}

#[test]
fn test_shell_reads_choice_from_stdin() {
    let project = TestProject::new();

    project
        .dry_run()
        .arg("shell")
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("session:"));
}

#[test]
fn test_shell_invalid_choice_from_stdin() {
    let project = TestProject::new();

    project
        .dry_run()
        .arg("shell")
        .write_stdin("x\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid choice"))
        .stdout(predicate::str::contains("session:").not());
}

#[test]
fn test_shell_multi_letter_answer_is_invalid() {
    let project = TestProject::new();

    project
        .dry_run()
        .args(["shell", "--choice", "create"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid choice"));
}

#[cfg(unix)]
#[test]
fn test_shell_session_reads_startup_script() {
    let project = TestProject::new();
    project.write_file("requirements.txt", "requests\n");

    let output = project
        .dry_run()
        .env("SHELL", "/bin/bash")
        .args(["shell", "--choice", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rcfile"))
        .stdout(predicate::str::contains("startup script"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);

    let lines: Vec<&str> = stdout.lines().map(str::trim).collect();
    assert!(lines.contains(&". 'venv/bin/activate'"), "{stdout}");
    assert!(lines.contains(&"python -m pip install --upgrade pip"), "{stdout}");
    assert!(lines.contains(&"python -m pip install -r 'requirements.txt'"), "{stdout}");
}
