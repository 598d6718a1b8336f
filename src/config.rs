//! Environment-driven configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::logging::LoggingConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PATH: &str = "students.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug)]
pub struct Config {
    /// Port bound on all interfaces (`PORT`).
    pub port: u16,
    /// SQLite file holding the `students` table (`STUDENTS_DB`).
    pub database_path: PathBuf,
    pub logging: LoggingConfig,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset or blank keys
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidValue {
                    field: "PORT",
                    reason: format!("`{raw}` is not a valid port ({err})"),
                })?,
            None => DEFAULT_PORT,
        };

        let database_path = get("STUDENTS_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let mut logging = LoggingConfig::default();
        if let Some(format) = get("LOG_FORMAT") {
            match format.trim() {
                "json" | "pretty" => logging.format = format.trim().to_string(),
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "LOG_FORMAT",
                        reason: format!("expected `pretty` or `json`, got `{other}`"),
                    })
                }
            }
        }

        Ok(Self {
            port,
            database_path,
            logging,
        })
    }
}
