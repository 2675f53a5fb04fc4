//! Reading the operator's choice

use std::io::{BufRead, IsTerminal};

use inquire::Text;

use crate::error::Result;

const QUESTION: &str = "Create a new environment or activate the existing one? [C/A]";

/// Read one answer from the operator
///
/// Uses an inquire prompt on a terminal and a plain line from stdin
/// otherwise, so the launcher can be scripted.
pub fn read_answer() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        let answer = Text::new(QUESTION)
            .with_help_message("C = create and install dependencies, A = activate only")
            .prompt()?;
        return Ok(answer);
    }

    println!("{QUESTION}");
    read_line(stdin.lock())
}

fn read_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}
