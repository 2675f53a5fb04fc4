//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{BuildTool, ConfigOverrides};

/// envboot - Python environment bootstrapper
///
/// Create a project's virtual environment, install its dependencies and
/// freeze it into a distributable, or open a shell bound to it.
#[derive(Parser, Debug)]
#[command(
    name = "envboot",
    author,
    version,
    long_version = long_version(),
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bootstrap a Python virtual environment and build a distributable",
    long_about = "envboot creates a project's virtual environment, installs the dependency \
                  manifest, makes sure the packaging helper is present and freezes the project. \
                  It can also open an interactive shell bound to the environment.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  envboot build\n    \
                  envboot build --tool pyinstaller --descriptor app.spec\n    \
                  envboot shell --choice a\n    \
                  envboot -C ../albayan --dry-run build"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "ENVBOOT_PROJECT")]
    pub project: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Version line plus how this binary was built
fn long_version() -> String {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    format!(
        "{}\n\nBuild info:\n  Rust version: {}\n  Profile: {profile}\n  Target OS: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION"),
        std::env::consts::OS,
    )
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the environment, install dependencies and build
    Build(BuildArgs),

    /// Open an interactive shell bound to the environment
    Shell(ShellArgs),

    /// Write envboot.yaml with the default settings
    Init(InitArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings shared by commands that touch the environment
#[derive(Args, Debug, Default, Clone)]
pub struct EnvArgs {
    /// Environment directory, relative to the project
    #[arg(long, value_name = "DIR", env = "ENVBOOT_ENV_DIR")]
    pub env_dir: Option<String>,

    /// Interpreter version used to create the environment (e.g. 3.12)
    #[arg(long, value_name = "VERSION", env = "ENVBOOT_PYTHON")]
    pub python: Option<String>,

    /// Dependency manifest
    #[arg(long, value_name = "FILE", env = "ENVBOOT_MANIFEST")]
    pub manifest: Option<String>,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build with the defaults (venv, requirements.txt, setup.py):\n    envboot build\n\n\
                  Stop at the first failing tool:\n    envboot build --strict\n\n\
                  Build with PyInstaller:\n    envboot build --tool pyinstaller --descriptor app.spec\n\n\
                  Run unattended:\n    envboot build --no-pause")]
pub struct BuildArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Build descriptor (setup.py or a .spec file)
    #[arg(long, value_name = "FILE", env = "ENVBOOT_DESCRIPTOR")]
    pub descriptor: Option<String>,

    /// Packaging helper
    #[arg(long, value_enum, env = "ENVBOOT_TOOL")]
    pub tool: Option<BuildTool>,

    /// Abort when any tool exits with a non-zero status
    #[arg(long)]
    pub strict: bool,

    /// Do not wait for Enter after a successful build
    #[arg(long)]
    pub no_pause: bool,
}

/// Arguments for the shell command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Ask interactively:\n    envboot shell\n\n\
                  Create the environment and install dependencies:\n    envboot shell --choice c\n\n\
                  Activate the existing environment:\n    envboot shell --choice a")]
pub struct ShellArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Answer the prompt up front: C (create) or A (activate)
    #[arg(long, value_name = "C|A")]
    pub choice: Option<String>,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing envboot.yaml
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    envboot completions --shell bash > ~/.bash_completion.d/envboot\n\n\
                  Generate PowerShell completions:\n    envboot completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

impl EnvArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            env_dir: self.env_dir.clone(),
            python: self.python.clone(),
            manifest: self.manifest.clone(),
            ..Default::default()
        }
    }
}

impl BuildArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            descriptor: self.descriptor.clone(),
            tool: self.tool,
            strict: self.strict,
            ..self.env.overrides()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_build_defaults() {
        let cli = Cli::try_parse_from(["envboot", "build"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert!(!args.strict);
                assert!(!args.no_pause);
                assert!(args.tool.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_build_flags() {
        let cli = Cli::try_parse_from([
            "envboot",
            "build",
            "--strict",
            "--no-pause",
            "--tool",
            "pyinstaller",
            "--descriptor",
            "app.spec",
            "--python",
            "3.11",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                let overrides = args.overrides();
                assert!(overrides.strict);
                assert_eq!(overrides.tool, Some(BuildTool::Pyinstaller));
                assert_eq!(overrides.descriptor.as_deref(), Some("app.spec"));
                assert_eq!(overrides.python.as_deref(), Some("3.11"));
                assert!(args.no_pause);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_shell_choice() {
        let cli = Cli::try_parse_from(["envboot", "shell", "--choice", "a"]).unwrap();
        match cli.command {
            Commands::Shell(args) => assert_eq!(args.choice.as_deref(), Some("a")),
            _ => panic!("Expected Shell command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli =
            Cli::try_parse_from(["envboot", "build", "-vv", "--dry-run", "-C", "/tmp/app"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.dry_run);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/app")));
    }

    #[test]
    fn test_cli_rejects_unknown_tool() {
        let result = Cli::try_parse_from(["envboot", "build", "--tool", "nuitka"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_init_force() {
        let cli = Cli::try_parse_from(["envboot", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init(InitArgs { force: true })));
    }
}
