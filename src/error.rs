//! Error taxonomy for configuration loading.
//!
//! `ConfigError` covers everything the resolver itself can reject: it is
//! raised eagerly at load time and is fatal to startup. `TargetUnavailable`
//! is raised only by consumers that actually need the PostgreSQL target
//! (e.g. `check --target`); the resolver never enforces target completeness.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key is missing or empty after prefix precedence is applied.
    #[error("required configuration key {key} is missing or empty")]
    MissingKey { key: &'static str },

    /// A recognized port key holds a value that is not a valid TCP port.
    #[error("configuration key {key} holds an invalid port value: {value:?}")]
    InvalidPort { key: &'static str, value: String },

    /// SOURCE_DATA_ENCODING holds a label outside the recognized set.
    #[error(
        "unrecognized SOURCE_DATA_ENCODING {value:?} (expected utf8, win1251 or cp1251)"
    )]
    UnknownEncoding { value: String },

    /// A host value that cannot be assembled into a connection URL.
    #[error("cannot build a connection URL for host {host:?}")]
    UrlAssembly { host: String },

    /// An explicitly named env file could not be read or parsed.
    #[error("failed to read env file {}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// The PostgreSQL target settings were requested but are not fully
/// configured. Carries every missing key so the operator can fix the file
/// in one pass.
#[derive(Debug, Error)]
#[error("PostgreSQL target configuration is incomplete: missing {}", missing.join(", "))]
pub struct TargetUnavailable {
    pub missing: Vec<&'static str>,
}
