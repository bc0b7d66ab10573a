//! Env file loading
//!
//! The pipeline reads its settings from an env-style key/value file (`.env`
//! by convention) overlaid with the process environment, process environment
//! winning for any key present in both. Malformed lines are skipped with a
//! warning so one stray entry never takes down the whole file.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::resolve::keys;
use crate::error::ConfigError;

/// An immutable snapshot of configuration key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    values: BTreeMap<String, String>,
}

impl EnvMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        EnvMap { values }
    }

    /// Load the configuration snapshot for a run.
    ///
    /// An explicitly provided file must be readable; an auto-discovered
    /// `.env` under `work_dir` is best-effort, and its absence simply yields
    /// the process environment alone.
    pub fn load(work_dir: &Path, env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut map = match env_file {
            Some(path) => Self::from_file(path, true)?,
            None => {
                let discovered = work_dir.join(".env");
                if discovered.is_file() {
                    Self::from_file(&discovered, false)?
                } else {
                    EnvMap::default()
                }
            }
        };
        map.overlay_process_env();
        Ok(map)
    }

    /// Parse an env file into a map.
    ///
    /// Parse errors on individual lines are never fatal: the offending line
    /// is skipped with a warning and the rest of the file is honored. Only
    /// failing to open an explicitly named file aborts the load.
    pub fn from_file(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(source) if explicit => {
                return Err(ConfigError::EnvFile { path: path.to_path_buf(), source });
            }
            Err(source) => {
                tracing::warn!("skipping unreadable env file {}: {}", path.display(), source);
                return Ok(EnvMap::default());
            }
        };

        let mut values = BTreeMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    if !keys::ALL.contains(&key.as_str()) {
                        tracing::warn!(
                            "ignoring unrecognized key {} in {}",
                            key,
                            path.display()
                        );
                    }
                    values.insert(key, value);
                }
                Err(err) => {
                    tracing::warn!("skipping malformed line in {}: {}", path.display(), err);
                }
            }
        }

        Ok(EnvMap { values })
    }

    /// Overlay recognized keys from the process environment.
    ///
    /// Matches python-dotenv's no-override default: a variable already set
    /// in the environment beats the value from the file.
    fn overlay_process_env(&mut self) {
        for key in keys::ALL {
            if let Ok(value) = std::env::var(key) {
                self.values.insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The value under `key`, treating empty and whitespace-only values as
    /// absent. Override precedence and required-field checks both use this
    /// view.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }
}
