//! Source data encoding flag.
//!
//! The GAR source database predates its own UTF-8 migration, so dumps may
//! carry windows-1251 text. The flag only records which one the operator
//! declared; actual transcoding happens downstream in the exporter.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Declared encoding of the source data.
///
/// `win1251` and `windows-1251` are accepted as labels and normalize to
/// `Cp1251`; any other non-empty label is rejected at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    #[default]
    Utf8,
    Cp1251,
}

impl SourceEncoding {
    /// Canonical label, as written back by [`super::types::ResolvedConfig::to_env_pairs`].
    pub fn label(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf8",
            SourceEncoding::Cp1251 => "cp1251",
        }
    }

    /// Charset parameter for the MySQL connection URL.
    pub fn mysql_charset(self) -> &'static str {
        self.label()
    }

    /// The matching `encoding_rs` encoding, for decoding source bytes.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            SourceEncoding::Utf8 => UTF_8,
            SourceEncoding::Cp1251 => WINDOWS_1251,
        }
    }
}

impl FromStr for SourceEncoding {
    type Err = ConfigError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf8" => Ok(SourceEncoding::Utf8),
            "cp1251" | "win1251" | "windows-1251" => Ok(SourceEncoding::Cp1251),
            _ => Err(ConfigError::UnknownEncoding { value: label.to_string() }),
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
