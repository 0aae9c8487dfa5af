//! Layered configuration loading.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`TASKBOARD_*` prefix, `__` between sections)
//! 2. `taskboard.toml` in the working directory
//! 3. Built-in defaults
//!
//! `TASKBOARD_DATABASE__URL` maps to `database.url`,
//! `TASKBOARD_CALENDAR__UTC_OFFSET_MINUTES` to `calendar.utc_offset_minutes`.

mod calendar;
mod database;
mod error;
mod logging;

pub use calendar::CalendarConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use logging::LoggingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = "taskboard.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskboardConfig {
    /// `PostgreSQL` connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Calendar used for day-window filters.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TaskboardConfig {
    /// Loads configuration from the TOML file and environment.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Loads `.env` from the working directory, then the regular sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Builds the provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
