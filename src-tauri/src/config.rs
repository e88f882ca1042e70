//! Runtime configuration loaded from the environment (and `.env`)

use log::LevelFilter;
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DB_FILE_VAR: &str = "NUTRITRACK_DB_FILE";
const DB_MAX_CONNECTIONS_VAR: &str = "NUTRITRACK_DB_MAX_CONNECTIONS";
const LOG_LEVEL_VAR: &str = "NUTRITRACK_LOG_LEVEL";
const LOG_CONFIG_VAR: &str = "NUTRITRACK_LOG_CONFIG";

const DEFAULT_DB_FILE: &str = "nutritrack.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, thiserror::Error, Serialize, PartialEq)]
pub enum ConfigError {
  #[error("{var} is not a valid value: {value}")]
  Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  /// Database file name, created inside the app data dir
  pub db_file: String,
  pub db_max_connections: u32,
  pub log_level: LevelFilter,
  /// Optional log4rs YAML file; console logging is used when it is absent
  pub log_config: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      db_file: DEFAULT_DB_FILE.to_string(),
      db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
      log_level: LevelFilter::Info,
      log_config: DEFAULT_LOG_CONFIG.to_string(),
    }
  }
}

impl AppConfig {
  /// Load `.env` if present, then read the environment
  pub fn load() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }

  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let db_max_connections = match non_blank_var(DB_MAX_CONNECTIONS_VAR) {
      Some(raw) => match raw.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(invalid(DB_MAX_CONNECTIONS_VAR, raw)),
      },
      None => defaults.db_max_connections,
    };

    let log_level = match non_blank_var(LOG_LEVEL_VAR) {
      Some(raw) => LevelFilter::from_str(&raw).map_err(|_| invalid(LOG_LEVEL_VAR, raw))?,
      None => defaults.log_level,
    };

    Ok(Self {
      db_file: non_blank_var(DB_FILE_VAR).unwrap_or(defaults.db_file),
      db_max_connections,
      log_level,
      log_config: non_blank_var(LOG_CONFIG_VAR).unwrap_or(defaults.log_config),
    })
  }
}

fn non_blank_var(name: &str) -> Option<String> {
  env::var(name)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

fn invalid(var: &'static str, value: String) -> ConfigError {
  ConfigError::Invalid { var, value }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const ALL_VARS: [&str; 4] = [DB_FILE_VAR, DB_MAX_CONNECTIONS_VAR, LOG_LEVEL_VAR, LOG_CONFIG_VAR];

  #[test]
  #[serial]
  fn test_defaults_when_unset() {
    temp_env::with_vars_unset(ALL_VARS, || {
      let config = AppConfig::from_env().unwrap();
      assert_eq!(config, AppConfig::default());
    });
  }

  #[test]
  #[serial]
  fn test_env_overrides() {
    temp_env::with_vars(
      [
        (DB_FILE_VAR, Some("test.db")),
        (DB_MAX_CONNECTIONS_VAR, Some("2")),
        (LOG_LEVEL_VAR, Some("debug")),
        (LOG_CONFIG_VAR, Some("  ")),
      ],
      || {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.db_file, "test.db");
        assert_eq!(config.db_max_connections, 2);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_config, DEFAULT_LOG_CONFIG);
      },
    );
  }

  #[test]
  #[serial]
  fn test_rejects_zero_connections() {
    temp_env::with_vars([(DB_MAX_CONNECTIONS_VAR, Some("0"))], || {
      let err = AppConfig::from_env().unwrap_err();
      assert_eq!(
        err,
        ConfigError::Invalid {
          var: DB_MAX_CONNECTIONS_VAR,
          value: "0".into()
        }
      );
    });
  }

  #[test]
  #[serial]
  fn test_rejects_unknown_log_level() {
    temp_env::with_vars([(LOG_LEVEL_VAR, Some("loud"))], || {
      assert!(AppConfig::from_env().is_err());
    });
  }
}
