//! mysql2pg-config: resolve and validate migration pipeline configuration
//!
//! Reads the env-style configuration consumed by the MySQL-to-PostgreSQL
//! export pipeline, applies prefix precedence, validates it eagerly, and
//! reports the resolved settings.

use anyhow::Result;

fn main() -> Result<()> {
    mysql2pg_config::cli::run()
}
