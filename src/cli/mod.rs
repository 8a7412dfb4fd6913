//! Command-line interface for revendor

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod generate;

/// Generate a shell script that re-vendors Go dependencies
#[derive(Parser)]
#[command(name = "revendor")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Directory to analyse dependencies for and vendor into
    #[arg(short, long, value_name = "PATH", default_value = "./")]
    directory: PathBuf,

    /// Whether the project is analysed recursively [default: true]
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    recursive: Option<bool>,

    /// Whether the generated script adds dependencies as Git submodules [default: true]
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    submodules: Option<bool>,

    /// Path to config file (.revendor.toml or .revendor.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "revendor", &mut std::io::stdout());
        return Ok(());
    }

    generate::run(cli)
}
