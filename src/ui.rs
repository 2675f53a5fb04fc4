//! Console output
//!
//! Operator-facing messages. Diagnostics for developers go through
//! `tracing` instead.

use std::io::IsTerminal;

use console::{Style, Term};

/// Announce a step that is about to run
pub fn step(message: &str) {
    println!("{} {}", Style::new().cyan().bold().apply_to("==>"), message);
}

/// Note a step that was not needed
pub fn skipped(message: &str) {
    println!("{} {}", Style::new().dim().apply_to("--"), message);
}

pub fn success(message: &str) {
    println!("{}", Style::new().green().bold().apply_to(message));
}

pub fn warning(message: &str) {
    eprintln!("{}", Style::new().yellow().apply_to(message));
}

pub fn error(message: &str) {
    eprintln!("{}", Style::new().red().bold().apply_to(message));
}

/// Wait for Enter, only when a person is at the terminal
pub fn pause(message: &str) {
    let term = Term::stdout();
    if !term.is_term() || !std::io::stdin().is_terminal() {
        return;
    }
    let _ = term.write_line(message);
    let _ = term.read_line();
}
