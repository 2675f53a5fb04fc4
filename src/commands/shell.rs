//! Shell command implementation

use console::Term;

use crate::cli::ShellArgs;
use crate::commands::Context;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::exec::{CommandRunner, DryRunRunner, SystemRunner};
use crate::launcher::{LaunchChoice, Launcher, prompt, window_title};
use crate::ui;

/// Run shell command
pub fn run(ctx: &Context, args: &ShellArgs) -> Result<()> {
    let config = ctx.config(&args.env.overrides())?;

    let term = Term::stdout();
    if term.is_term() {
        term.set_title(window_title(ctx.project_dir(), &config));
    }
    std::env::set_current_dir(ctx.project_dir())?;

    let answer = match args.choice {
        Some(ref choice) => choice.clone(),
        None => prompt::read_answer()?,
    };

    let Some(choice) = LaunchChoice::parse(&answer) else {
        tracing::info!(answer = %answer.trim(), "rejected launcher choice");
        ui::error("Invalid choice. Please enter C to create or A to activate.");
        return Ok(());
    };

    if ctx.dry_run {
        launch(&mut DryRunRunner::new(), ctx, config, choice)
    } else {
        launch(&mut SystemRunner::new(), ctx, config, choice)
    }
}

fn launch<R: CommandRunner>(
    runner: &mut R,
    ctx: &Context,
    config: ProjectConfig,
    choice: LaunchChoice,
) -> Result<()> {
    Launcher::new(runner, ctx.project_dir(), config).launch(choice)
}
