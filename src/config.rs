//! Environment-derived configuration for the MIT MCP server.

use crate::mit::services::DEFAULT_DAILY_LIMIT;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding the database file location.
pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";

/// Environment variable configuring the daily creation cap.
pub const DAILY_LIMIT_VAR: &str = "MAX_MITS_PER_DAY";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform data directory could be determined for the database.
    #[error("no platform data directory available for the database file")]
    NoDataDirectory,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Location of the SQLite database file.
    pub database_path: PathBuf,
    /// Maximum number of MITs per calendar date.
    pub daily_limit: usize,
}

impl ServerConfig {
    /// Resolves configuration from the process environment.
    ///
    /// The database lives at `DATABASE_PATH` when set, otherwise under the
    /// platform data directory (`$XDG_DATA_HOME`, `~/Library/Application
    /// Support`, or `%LOCALAPPDATA%` by platform convention). The daily
    /// limit comes from `MAX_MITS_PER_DAY`: default 3, floored at 1, with
    /// unparsable values falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDirectory`] when no override is set and
    /// the platform exposes no data directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_path = env::var_os(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .map_or_else(default_database_path, Ok)?;
        let daily_limit = daily_limit_from(env::var(DAILY_LIMIT_VAR).ok().as_deref());

        Ok(Self {
            database_path,
            daily_limit,
        })
    }
}

fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("", "", "mit-mcp").ok_or(ConfigError::NoDataDirectory)?;
    Ok(dirs.data_dir().join("data.db"))
}

fn daily_limit_from(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .map_or(DEFAULT_DAILY_LIMIT, |value| value.max(1))
}
