//! Runtime configuration.
//!
//! Values come from an optional TOML file, then `ROSTER_*` environment
//! variables override individual keys.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";

const DEFAULT_DB_PATH: &str = "roster.sqlite3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid log level: {0}")]
    LogLevel(#[from] LoggingError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling log directory; stderr logging when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Loads `path` (or defaults) and applies process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup` and normalizes the log level.
    ///
    /// Empty override values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(db_path) = present(ENV_DB_PATH) {
            self.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = present(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(log_dir) = present(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(log_dir));
        }
        self.log_level = normalize_level(&self.log_level)?.to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RosterConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config = RosterConfig::default().with_overrides(env(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("roster.sqlite3"));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "db_path = \"/var/lib/roster/db.sqlite3\"\nlog_level = \"warn\"\nlog_dir = \"/var/log/roster\""
        )
        .unwrap();

        let config = RosterConfig::from_file(file.path())
            .unwrap()
            .with_overrides(env(&[(ENV_LOG_LEVEL, "ERROR"), (ENV_DB_PATH, "")]))
            .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/roster/db.sqlite3"));
        assert_eq!(config.log_level, "error");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/roster")));
    }

    #[test]
    fn env_can_set_log_dir() {
        let config = RosterConfig::default()
            .with_overrides(env(&[(ENV_LOG_DIR, "/tmp/roster-logs")]))
            .unwrap();
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/roster-logs")));
    }

    #[test]
    fn unknown_keys_and_bad_levels_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database = \"x\"").unwrap();
        assert!(matches!(
            RosterConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));

        let err = RosterConfig::default()
            .with_overrides(env(&[(ENV_LOG_LEVEL, "chatty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RosterConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
