//! Configuration loading and resolution
//!
//! Handles env-file parsing, the IMPORT_DB_*/SOURCE_DB_* prefix precedence
//! merge, eager validation, and serialization of the resolved settings.

pub mod encoding;
pub mod env_file;
pub mod resolve;
pub mod types;

pub use encoding::SourceEncoding;
pub use env_file::EnvMap;
pub use resolve::{resolve, Resolver};
pub use types::{ConnectionSettings, ResolvedConfig, TargetSettings};
