//! Command-line interface for mysql2pg-config
//!
//! Provides `show` and `check` subcommands over the shared resolver.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use crate::config::resolve::Resolver;

mod check;
mod show;

/// Resolve and validate migration pipeline configuration
#[derive(Parser)]
#[command(name = "mysql2pg-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read this env file instead of auto-discovering ./.env
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Show(show::ShowArgs),

    /// Validate the configuration and exit non-zero on failure
    Check(check::CheckArgs),
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

    let mut resolver = Resolver::new(std::env::current_dir()?);
    if let Some(path) = cli.env_file {
        resolver = resolver.env_file(path);
    }

    match cli.command {
        Commands::Show(args) => show::run(args, &resolver),
        Commands::Check(args) => check::run(args, &resolver),
    }
}

/// Copy of a connection URL safe for terminal output.
pub(crate) fn redacted(url: &Url) -> Url {
    let mut shown = url.clone();
    if shown.password().is_some() {
        let _ = shown.set_password(Some("****"));
    }
    shown
}
