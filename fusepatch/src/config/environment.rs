//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `FUSEPATCH_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::Result;
use std::env;
use std::path::PathBuf;

/// Overrides `server_home`.
pub const SERVER_HOME_ENV: &str = "FUSEPATCH_SERVER_HOME";

/// Overrides `repository`.
pub const REPOSITORY_ENV: &str = "FUSEPATCH_REPOSITORY";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use fusepatch::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for typed variables.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(home) = Self::non_empty(SERVER_HOME_ENV) {
            config.server_home = Some(PathBuf::from(home));
        }

        if let Some(repository) = Self::non_empty(REPOSITORY_ENV) {
            config.repository = Some(repository);
        }

        Ok(())
    }

    fn non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}
