//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use fusepatch::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `server_home` is relative or
    /// `repository` is blank.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref home) = config.server_home {
            if !home.is_absolute() {
                return Err(Error::Validation {
                    field: "server_home".into(),
                    message: format!("must be an absolute path, got {}", home.display()),
                });
            }
        }

        if let Some(ref repository) = config.repository {
            if repository.trim().is_empty() {
                return Err(Error::Validation {
                    field: "repository".into(),
                    message: "must not be empty".into(),
                });
            }
        }

        Ok(())
    }
}
