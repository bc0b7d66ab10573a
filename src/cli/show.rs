//! Show command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::redacted;
use crate::config::resolve::Resolver;
use crate::config::types::ResolvedConfig;

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with secrets redacted
    Text,
    /// Machine-readable JSON
    Json,
    /// KEY=VALUE pairs that re-resolve to the same configuration
    Env,
}

pub fn run(args: ShowArgs, resolver: &Resolver) -> Result<()> {
    let cfg = resolver.load().context("configuration is invalid")?;

    match args.format {
        OutputFormat::Text => print_text(&cfg)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cfg)?),
        OutputFormat::Env => {
            for (key, value) in cfg.to_env_pairs() {
                println!("{key}={value}");
            }
        }
    }

    Ok(())
}

fn print_text(cfg: &ResolvedConfig) -> Result<()> {
    println!("Source database (MySQL):");
    println!("  Host: {}:{}", cfg.source.host, cfg.source.port);
    println!("  User: {}", cfg.source.user);
    println!("  Password: {}", mask(&cfg.source.password));
    println!("  Database: {}", cfg.source.database);
    println!("  URL: {}", redacted(&cfg.source_url()?));

    println!("Target database (PostgreSQL):");
    let target = cfg.target.connection();
    match &target {
        Ok(target) => {
            println!("  Host: {}:{}", target.host, target.port);
            println!("  User: {}", target.user);
            println!("  Password: {}", mask(&target.password));
            println!("  Database: {}", target.database);
            println!("  URL: {}", redacted(&target.postgres_url()?));
        }
        Err(err) => {
            println!("  Not configured ({})", err);
        }
    }

    println!("Dump file: {}", cfg.dump_file_path.display());
    println!("Source data encoding: {}", cfg.source_encoding);

    // Matches the exporter's closing hint for importing the produced dump.
    if let Ok(target) = &target {
        println!(
            "\nImport with:\n  psql -U {} -d {} -f {}",
            target.user,
            target.database,
            cfg.dump_file_path.display()
        );
    }

    Ok(())
}

fn mask(password: &str) -> &'static str {
    if password.is_empty() {
        "(none)"
    } else {
        "********"
    }
}
