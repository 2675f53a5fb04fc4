//! Version command implementation

use clap::CommandFactory;

use crate::cli::Cli;
use crate::error::Result;

/// Same text as `envboot --version`
fn version_text() -> String {
    Cli::command().render_long_version()
}

/// Run version command
pub fn run() -> Result<()> {
    print!("{}", version_text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_includes_build_info() {
        let text = version_text();
        assert!(text.starts_with(&format!("envboot {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("Build info:"));
        assert!(text.contains(std::env::consts::OS));
    }
}
