//! Prefix precedence and validation.
//!
//! Source credentials come under two naming schemes: `SOURCE_DB_*` is the
//! base, `IMPORT_DB_*` overrides it field by field. An `IMPORT_DB_*` value
//! only wins when it is present and non-empty, so a blank override falls
//! back to the base value rather than blanking the field.
//!
//! All validation is eager. A configuration that loads is usable for the
//! whole run; nothing is re-checked later except target completeness, which
//! is deferred to [`TargetSettings::connection`] by design.

use std::path::PathBuf;

use crate::config::encoding::SourceEncoding;
use crate::config::env_file::EnvMap;
use crate::config::types::{
    ConnectionSettings, ResolvedConfig, TargetSettings, SOURCE_DEFAULT_PORT,
};
use crate::error::ConfigError;

/// Recognized configuration keys.
pub mod keys {
    pub const SOURCE_DB_HOST: &str = "SOURCE_DB_HOST";
    pub const SOURCE_DB_PORT: &str = "SOURCE_DB_PORT";
    pub const SOURCE_DB_USER: &str = "SOURCE_DB_USER";
    pub const SOURCE_DB_PASSWORD: &str = "SOURCE_DB_PASSWORD";
    pub const SOURCE_DB_NAME: &str = "SOURCE_DB_NAME";

    pub const IMPORT_DB_HOST: &str = "IMPORT_DB_HOST";
    pub const IMPORT_DB_PORT: &str = "IMPORT_DB_PORT";
    pub const IMPORT_DB_USER: &str = "IMPORT_DB_USER";
    pub const IMPORT_DB_PASSWORD: &str = "IMPORT_DB_PASSWORD";
    pub const IMPORT_DB_NAME: &str = "IMPORT_DB_NAME";

    pub const TARGET_DB_HOST: &str = "TARGET_DB_HOST";
    pub const TARGET_DB_PORT: &str = "TARGET_DB_PORT";
    pub const TARGET_DB_USER: &str = "TARGET_DB_USER";
    pub const TARGET_DB_PASSWORD: &str = "TARGET_DB_PASSWORD";
    pub const TARGET_DB_NAME: &str = "TARGET_DB_NAME";

    pub const DUMP_FILE_PATH: &str = "DUMP_FILE_PATH";
    pub const SOURCE_DATA_ENCODING: &str = "SOURCE_DATA_ENCODING";

    pub const ALL: [&str; 17] = [
        SOURCE_DB_HOST,
        SOURCE_DB_PORT,
        SOURCE_DB_USER,
        SOURCE_DB_PASSWORD,
        SOURCE_DB_NAME,
        IMPORT_DB_HOST,
        IMPORT_DB_PORT,
        IMPORT_DB_USER,
        IMPORT_DB_PASSWORD,
        IMPORT_DB_NAME,
        TARGET_DB_HOST,
        TARGET_DB_PORT,
        TARGET_DB_USER,
        TARGET_DB_PASSWORD,
        TARGET_DB_NAME,
        DUMP_FILE_PATH,
        SOURCE_DATA_ENCODING,
    ];
}

/// Loads and resolves the configuration for one run.
pub struct Resolver {
    work_dir: PathBuf,
    env_file: Option<PathBuf>,
}

impl Resolver {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Resolver { work_dir: work_dir.into(), env_file: None }
    }

    /// Use an explicit env file instead of auto-discovering `./.env`.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ResolvedConfig, ConfigError> {
        let env = EnvMap::load(&self.work_dir, self.env_file.as_deref())?;
        resolve(&env)
    }
}

/// Resolve a configuration snapshot into validated settings.
pub fn resolve(env: &EnvMap) -> Result<ResolvedConfig, ConfigError> {
    let source = resolve_source(env)?;
    let target = resolve_target(env)?;

    let dump_file_path = env
        .non_empty(keys::DUMP_FILE_PATH)
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingKey { key: keys::DUMP_FILE_PATH })?;

    let source_encoding = match env.non_empty(keys::SOURCE_DATA_ENCODING) {
        Some(label) => label.parse()?,
        None => SourceEncoding::default(),
    };

    Ok(ResolvedConfig { source, target, dump_file_path, source_encoding })
}

fn resolve_source(env: &EnvMap) -> Result<ConnectionSettings, ConfigError> {
    let host = pick(env, keys::IMPORT_DB_HOST, keys::SOURCE_DB_HOST)
        .ok_or(ConfigError::MissingKey { key: keys::SOURCE_DB_HOST })?;
    let user = pick(env, keys::IMPORT_DB_USER, keys::SOURCE_DB_USER)
        .ok_or(ConfigError::MissingKey { key: keys::SOURCE_DB_USER })?;
    let database = pick(env, keys::IMPORT_DB_NAME, keys::SOURCE_DB_NAME)
        .ok_or(ConfigError::MissingKey { key: keys::SOURCE_DB_NAME })?;

    let port = match pick_keyed(env, keys::IMPORT_DB_PORT, keys::SOURCE_DB_PORT) {
        Some((key, value)) => parse_port(key, value)?,
        None => SOURCE_DEFAULT_PORT,
    };

    // A blank password is legitimate; only host/user/database are required.
    let password =
        pick(env, keys::IMPORT_DB_PASSWORD, keys::SOURCE_DB_PASSWORD).unwrap_or_default();

    Ok(ConnectionSettings {
        host: host.to_string(),
        port,
        user: user.to_string(),
        password: password.to_string(),
        database: database.to_string(),
    })
}

fn resolve_target(env: &EnvMap) -> Result<TargetSettings, ConfigError> {
    let port = match env.non_empty(keys::TARGET_DB_PORT) {
        Some(value) => Some(parse_port(keys::TARGET_DB_PORT, value)?),
        None => None,
    };

    Ok(TargetSettings {
        host: env.non_empty(keys::TARGET_DB_HOST).map(str::to_string),
        port,
        user: env.non_empty(keys::TARGET_DB_USER).map(str::to_string),
        password: env.non_empty(keys::TARGET_DB_PASSWORD).map(str::to_string),
        database: env.non_empty(keys::TARGET_DB_NAME).map(str::to_string),
    })
}

fn pick<'a>(env: &'a EnvMap, import_key: &'static str, source_key: &'static str) -> Option<&'a str> {
    pick_keyed(env, import_key, source_key).map(|(_, value)| value)
}

// Returns the winning value together with the key that supplied it, so
// validation errors name the key the operator actually set.
fn pick_keyed<'a>(
    env: &'a EnvMap,
    import_key: &'static str,
    source_key: &'static str,
) -> Option<(&'static str, &'a str)> {
    if let Some(value) = env.non_empty(import_key) {
        return Some((import_key, value));
    }
    env.non_empty(source_key).map(|value| (source_key, value))
}

fn parse_port(key: &'static str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort { key, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        EnvMap::from_pairs(pairs.iter().copied())
    }

    fn base_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SOURCE_DB_HOST", "localhost"),
            ("SOURCE_DB_PORT", "3306"),
            ("SOURCE_DB_USER", "root"),
            ("SOURCE_DB_PASSWORD", "root"),
            ("SOURCE_DB_NAME", "gar_address"),
            ("DUMP_FILE_PATH", "/tmp/dump.sql"),
        ]
    }

    #[test]
    fn test_source_only_resolves_verbatim() {
        let cfg = resolve(&env(&base_pairs())).expect("config");
        assert_eq!(cfg.source.host, "localhost");
        assert_eq!(cfg.source.port, 3306);
        assert_eq!(cfg.source.user, "root");
        assert_eq!(cfg.source.password, "root");
        assert_eq!(cfg.source.database, "gar_address");
    }

    #[test]
    fn test_import_prefix_overrides_every_field() {
        let mut pairs = base_pairs();
        pairs.extend([
            ("IMPORT_DB_HOST", "import.host"),
            ("IMPORT_DB_PORT", "3307"),
            ("IMPORT_DB_USER", "importer"),
            ("IMPORT_DB_PASSWORD", "secret"),
            ("IMPORT_DB_NAME", "gar_import"),
        ]);

        let cfg = resolve(&env(&pairs)).expect("config");
        assert_eq!(cfg.source.host, "import.host");
        assert_eq!(cfg.source.port, 3307);
        assert_eq!(cfg.source.user, "importer");
        assert_eq!(cfg.source.password, "secret");
        assert_eq!(cfg.source.database, "gar_import");
    }

    #[test]
    fn test_override_is_per_field_not_all_or_nothing() {
        let mut pairs = base_pairs();
        pairs.extend([("IMPORT_DB_HOST", "import.host"), ("IMPORT_DB_USER", "")]);

        let cfg = resolve(&env(&pairs)).expect("config");
        assert_eq!(cfg.source.host, "import.host");
        assert_eq!(cfg.source.user, "root");
    }

    #[test]
    fn test_missing_dump_file_path_fails() {
        let pairs: Vec<_> =
            base_pairs().into_iter().filter(|(k, _)| *k != "DUMP_FILE_PATH").collect();
        let err = resolve(&env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "DUMP_FILE_PATH" }));
    }

    #[test]
    fn test_missing_source_host_fails() {
        let pairs: Vec<_> =
            base_pairs().into_iter().filter(|(k, _)| *k != "SOURCE_DB_HOST").collect();
        let err = resolve(&env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "SOURCE_DB_HOST" }));
    }

    #[test]
    fn test_port_defaults_when_unset() {
        let pairs: Vec<_> =
            base_pairs().into_iter().filter(|(k, _)| *k != "SOURCE_DB_PORT").collect();
        let cfg = resolve(&env(&pairs)).expect("config");
        assert_eq!(cfg.source.port, 3306);
    }

    #[test]
    fn test_unparsable_port_names_the_winning_key() {
        let mut pairs = base_pairs();
        pairs.push(("IMPORT_DB_PORT", "not-a-port"));
        let err = resolve(&env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { key: "IMPORT_DB_PORT", .. }));
    }

    #[test]
    fn test_encoding_defaults_to_utf8() {
        let cfg = resolve(&env(&base_pairs())).expect("config");
        assert_eq!(cfg.source_encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_mixed_case_encoding_normalizes() {
        let mut pairs = base_pairs();
        pairs.push(("SOURCE_DATA_ENCODING", "CP1251"));
        let cfg = resolve(&env(&pairs)).expect("config");
        assert_eq!(cfg.source_encoding, SourceEncoding::Cp1251);
    }

    #[test]
    fn test_unrecognized_encoding_fails() {
        let mut pairs = base_pairs();
        pairs.push(("SOURCE_DATA_ENCODING", "latin1"));
        let err = resolve(&env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEncoding { .. }));
    }

    #[test]
    fn test_absent_target_is_empty_but_loads() {
        let cfg = resolve(&env(&base_pairs())).expect("config");
        assert!(cfg.target.is_empty());
        assert!(cfg.target.connection().is_err());
    }

    #[test]
    fn test_target_fields_resolve_independently() {
        let mut pairs = base_pairs();
        pairs.extend([
            ("TARGET_DB_HOST", "pg.internal"),
            ("TARGET_DB_PORT", "5433"),
            ("TARGET_DB_USER", "postgres"),
            ("TARGET_DB_PASSWORD", "postgres"),
            ("TARGET_DB_NAME", "gar_simple_db"),
        ]);

        let cfg = resolve(&env(&pairs)).expect("config");
        let conn = cfg.target.connection().expect("target connection");
        assert_eq!(conn.host, "pg.internal");
        assert_eq!(conn.port, 5433);
        assert_eq!(conn.database, "gar_simple_db");
    }

    #[test]
    fn test_resolved_config_round_trips_through_env_pairs() {
        let mut pairs = base_pairs();
        pairs.extend([
            ("IMPORT_DB_NAME", "gar_simple_db"),
            ("TARGET_DB_HOST", "pg.internal"),
            ("TARGET_DB_USER", "postgres"),
            ("SOURCE_DATA_ENCODING", "win1251"),
        ]);

        let cfg = resolve(&env(&pairs)).expect("config");
        let serialized = cfg.to_env_pairs();
        let reparsed = resolve(&EnvMap::from_pairs(serialized)).expect("reparsed config");
        assert_eq!(cfg, reparsed);
    }

    #[test]
    fn test_example_scenario() {
        let cfg = resolve(&env(&[
            ("SOURCE_DB_HOST", "localhost"),
            ("SOURCE_DB_USER", "root"),
            ("SOURCE_DB_NAME", "gar_address"),
            ("IMPORT_DB_NAME", "gar_simple_db"),
            ("DUMP_FILE_PATH", "/tmp/dump.sql"),
        ]))
        .expect("config");

        assert_eq!(cfg.source.host, "localhost");
        assert_eq!(cfg.source.database, "gar_simple_db");
        assert_eq!(cfg.source_encoding, SourceEncoding::Utf8);
        assert_eq!(cfg.dump_file_path, PathBuf::from("/tmp/dump.sql"));
    }
}
