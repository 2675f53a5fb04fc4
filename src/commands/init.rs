//! Init command implementation

use crate::cli::InitArgs;
use crate::commands::Context;
use crate::config::{self, CONFIG_FILE, ProjectConfig};
use crate::error::{EnvbootError, Result};
use crate::ui;

/// Write envboot.yaml with default settings
pub fn run(ctx: &Context, args: &InitArgs) -> Result<()> {
    let path = ctx.project_dir().join(CONFIG_FILE);
    if path.exists() && !args.force {
        return Err(EnvbootError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    config::save(ctx.project_dir(), &ProjectConfig::default())?;
    ui::success(&format!("Wrote {}", path.display()));
    Ok(())
}
