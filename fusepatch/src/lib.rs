#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fusepatch
//!
//! A library for tracking which patches own which files of a server
//! installation.
//!
//! When a patch adds a file it claims ownership of that path. Paths that
//! already existed before any patch touched them are co-owned by the
//! server itself, so removing the last patch restores rather than deletes
//! them. The registry answers "who owns this path?" and keeps that answer
//! consistent as patches are installed, upgraded, and uninstalled.
//!
//! ## Core Types
//!
//! - [`ManagedPaths`] and [`ManagedPath`]: The path ownership registry
//! - [`PatchId`], [`Version`] and [`SERVER_ID`]: Patch identities
//! - [`Record`], [`Action`] and [`Patch`]: Patch content descriptions
//! - [`PathOracle`]: Filesystem queries the registry relies on
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use fusepatch::oracle::MockOracle;
//! use fusepatch::{Action, ManagedPaths, PatchId, Record};
//! use std::path::Path;
//!
//! let root = Path::new("/srv/server");
//! // `lib` is not on disk yet, so the patch owns the directory as well
//! let oracle = MockOracle::new().with_dir("/srv/server");
//! let owner: PatchId = "patch-1.0.0".parse().unwrap();
//!
//! let mut paths = ManagedPaths::default();
//! paths
//!     .update_paths(
//!         &oracle,
//!         root,
//!         &[Record::new("lib/x.jar", Action::Add, owner).unwrap()],
//!         &[Action::Add, Action::Update],
//!     )
//!     .unwrap();
//!
//! assert_eq!(paths.len(), 2);
//! assert_eq!(paths.get("lib").unwrap().to_string(), "lib [patch-1.0.0]");
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod managed;
pub mod oracle;
pub mod path;
pub mod record;
pub mod tool;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use identity::{PatchId, Version, SERVER_ID};
pub use logging::{init_logger, LogLevel, Logger};
pub use managed::{ManagedPath, ManagedPaths};
pub use oracle::{FsOracle, PathOracle};
pub use record::{Action, Patch, Record};
pub use tool::{parse_version_resource, tool_version, PatchTool};
