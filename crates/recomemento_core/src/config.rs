//! Process configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve the database path, log settings and seeding switch.
//! - Reject malformed values before any storage work starts.
//!
//! # Invariants
//! - An unset or empty variable falls back to its default.
//! - Resolution is pure given the lookup function; it never touches disk.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::path::PathBuf;
use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const LOG_LEVEL_VAR: &str = "RECOMEMENTO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "RECOMEMENTO_LOG_DIR";
pub const SEED_VAR: &str = "RECOMEMENTO_SEED";

pub const DEFAULT_DATABASE_PATH: &str = "./data/books.db";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

/// Resolved settings for one catalog process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub database_path: PathBuf,
    pub log_level: &'static str,
    /// Rolling log directory; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    pub seed_on_start: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_level: default_log_level(),
            log_dir: None,
            seed_on_start: true,
        }
    }
}

impl CatalogConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = read(DATABASE_URL_VAR) {
            config.database_path = database_path_from_url(&url);
        }

        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = normalize_level(&level).map_err(|message| {
                ConfigError::InvalidValue {
                    var: LOG_LEVEL_VAR,
                    message,
                }
            })?;
        }

        if let Some(dir) = read(LOG_DIR_VAR) {
            config.log_dir = Some(normalize_log_dir(&dir).map_err(|message| {
                ConfigError::InvalidValue {
                    var: LOG_DIR_VAR,
                    message,
                }
            })?);
        }

        if let Some(flag) = read(SEED_VAR) {
            config.seed_on_start = parse_flag(SEED_VAR, &flag)?;
        }

        Ok(config)
    }
}

/// Maps a `DATABASE_URL` value to a filesystem path.
///
/// SQLite URLs of the form `file:<path>` are accepted and stripped; anything
/// else is taken as a plain path.
pub fn database_path_from_url(url: &str) -> PathBuf {
    let trimmed = url.trim();
    PathBuf::from(trimmed.strip_prefix("file:").unwrap_or(trimmed))
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            var,
            message: format!("expected a boolean flag, got `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        database_path_from_url, CatalogConfig, ConfigError, DATABASE_URL_VAR,
        DEFAULT_DATABASE_PATH, LOG_DIR_VAR, LOG_LEVEL_VAR, SEED_VAR,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert!(config.seed_on_start);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn database_url_strips_file_scheme() {
        assert_eq!(
            database_path_from_url("file:./prisma/dev.db"),
            PathBuf::from("./prisma/dev.db")
        );
        assert_eq!(
            database_path_from_url("/srv/books.db"),
            PathBuf::from("/srv/books.db")
        );

        let config = config_from(&[(DATABASE_URL_VAR, "file:./prisma/dev.db")]).unwrap();
        assert_eq!(config.database_path, PathBuf::from("./prisma/dev.db"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[(DATABASE_URL_VAR, ""), (LOG_LEVEL_VAR, "  ")]).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn log_settings_are_normalized() {
        let config = config_from(&[(LOG_LEVEL_VAR, "WARNING"), (LOG_DIR_VAR, "/tmp/books-logs")])
            .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/books-logs")));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[(LOG_DIR_VAR, "relative/logs")]).unwrap_err();
        assert!(err.to_string().starts_with(LOG_DIR_VAR));

        let err = config_from(&[(SEED_VAR, "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: SEED_VAR, .. }));
    }

    #[test]
    fn seed_flag_can_be_disabled() {
        let config = config_from(&[(SEED_VAR, "off")]).unwrap();
        assert!(!config.seed_on_start);
    }
}
