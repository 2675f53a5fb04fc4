//! Build command implementation

use crate::bootstrap::{BootstrapReport, Bootstrapper};
use crate::cli::BuildArgs;
use crate::commands::Context;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::exec::{CommandRunner, DryRunRunner, SystemRunner};
use crate::ui;

/// Run build command
pub fn run(ctx: &Context, args: &BuildArgs) -> Result<()> {
    let config = ctx.config(&args.overrides())?;
    tracing::info!(project = %ctx.project_dir().display(), "bootstrapping");

    let report = if ctx.dry_run {
        bootstrap(&mut DryRunRunner::new(), ctx, config)?
    } else {
        bootstrap(&mut SystemRunner::new(), ctx, config)?
    };

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        let list = failures
            .iter()
            .map(|(step, code)| format!("{step} ({code})"))
            .collect::<Vec<_>>()
            .join(", ");
        ui::warning(&format!("Finished with ignored failures: {list}"));
    }

    ui::success("Environment deactivated. Build completed successfully.");

    if !args.no_pause && !ctx.dry_run {
        ui::pause("Press Enter to exit...");
    }

    Ok(())
}

fn bootstrap<R: CommandRunner>(
    runner: &mut R,
    ctx: &Context,
    config: ProjectConfig,
) -> Result<BootstrapReport> {
    Bootstrapper::new(runner, ctx.project_dir(), config).run()
}
