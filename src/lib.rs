//! Configuration resolver for the GAR MySQL-to-PostgreSQL migration pipeline.
//!
//! The pipeline's surrounding tools (dump importer, exporter, data checker)
//! all read the same env-style configuration: source MySQL credentials under
//! two alternative prefixes (`SOURCE_DB_*` as the base, `IMPORT_DB_*` as
//! per-field overrides), optional target PostgreSQL credentials under
//! `TARGET_DB_*`, a required dump file path, and a source data encoding flag.
//! This crate owns the parsing, precedence, and validation rules so every
//! consumer sees the same resolved settings.

pub mod cli;
pub mod config;
pub mod error;

pub use config::encoding::SourceEncoding;
pub use config::env_file::EnvMap;
pub use config::resolve::{resolve, Resolver};
pub use config::types::{ConnectionSettings, ResolvedConfig, TargetSettings};
pub use error::{ConfigError, TargetUnavailable};
