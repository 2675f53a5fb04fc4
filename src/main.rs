//! envboot - Python environment bootstrapper
//!
//! Creates a project's virtual environment, installs its dependencies and
//! freezes it into a distributable, or opens a shell bound to it.

use clap::Parser;
use console::Style;

mod bootstrap;
mod cli;
mod commands;
mod config;
mod environment;
mod error;
mod exec;
mod launcher;
mod logging;
mod ui;

use cli::{Cli, Commands};
use commands::Context;
use error::Result;

fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        project,
        dry_run,
        command,
        ..
    } = cli;

    match command {
        Commands::Build(args) => commands::build::run(&Context::new(project, dry_run)?, &args),
        Commands::Shell(args) => commands::shell::run(&Context::new(project, dry_run)?, &args),
        Commands::Init(args) => commands::init::run(&Context::new(project, dry_run)?, &args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = dispatch(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{} {}", Style::new().red().bold().apply_to("Error:"), e);
        if let Some(help) = miette::Diagnostic::help(&e) {
            eprintln!("  {} {}", Style::new().dim().apply_to("help:"), help);
        }
        std::process::exit(e.exit_code());
    }
}
