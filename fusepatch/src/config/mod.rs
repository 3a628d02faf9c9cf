//! Configuration system for fusepatch.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `fusepatch.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`FUSEPATCH_SERVER_HOME`, `FUSEPATCH_REPOSITORY`)
//! 3. Project config (`fusepatch.yaml`, nearest one above the working dir)
//! 4. User config (`~/.fusepatch/config.yaml`)
//!
//! # Examples
//!
//! ```no_run
//! use fusepatch::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/opt/wildfly"))
//!     .build()
//!     .unwrap();
//!
//! if let Some(home) = &config.server_home {
//!     println!("server home: {}", home.display());
//! }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{default_data_dir, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::Config;
pub use validator::ConfigValidator;
