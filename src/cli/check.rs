//! Check command implementation
//!
//! Validates the configuration eagerly and reports what the pipeline would
//! connect to, without opening any database connection.

use anyhow::{Context, Result};
use clap::Args;

use super::redacted;
use crate::config::resolve::Resolver;

#[derive(Args)]
pub struct CheckArgs {
    /// Also require complete PostgreSQL target settings
    #[arg(long)]
    pub target: bool,
}

pub fn run(args: CheckArgs, resolver: &Resolver) -> Result<()> {
    let cfg = resolver.load().context("configuration is invalid")?;

    println!("Source OK: {}", redacted(&cfg.source_url()?));
    println!("Dump file: {}", cfg.dump_file_path.display());
    println!("Source data encoding: {}", cfg.source_encoding);

    if args.target {
        let target = cfg.target.connection().context("target configuration is invalid")?;
        println!("Target OK: {}", redacted(&target.postgres_url()?));
    }

    println!("Configuration OK");
    Ok(())
}
