//! Error types for the fusepatch library.
//!
//! This module provides the error hierarchy for path ownership tracking,
//! identity parsing, configuration, and the filesystem queries made while
//! updating the registry, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a fusepatch error.
///
/// # Examples
///
/// ```
/// use fusepatch::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fusepatch library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path is not usable as a managed (installation-relative) path.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A managed path was constructed without any owner.
    #[error("managed path {} has no owners", path.display())]
    EmptyOwners {
        /// The path that was left without owners.
        path: PathBuf,
    },

    /// Two owners of the same path share a patch name.
    #[error("managed path {} lists owner '{name}' more than once", path.display())]
    DuplicateOwner {
        /// The managed path.
        path: PathBuf,
        /// The duplicated patch name.
        name: String,
    },

    /// The same path appears twice in the initial registry entries.
    #[error("duplicate managed path: {}", path.display())]
    DuplicatePath {
        /// The duplicated path.
        path: PathBuf,
    },

    /// A version string could not be parsed.
    #[error("invalid version '{value}': {reason}")]
    InvalidVersion {
        /// The rejected input.
        value: String,
        /// The reason the version is invalid.
        reason: String,
    },

    /// A patch identity string could not be parsed.
    #[error("invalid patch id '{value}': {reason}")]
    InvalidPatchId {
        /// The rejected input.
        value: String,
        /// The reason the identity is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// Permission denied while querying a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// A filesystem query failed for a reason other than absence.
    #[error("cannot query {}: {source}", path.display())]
    PathQuery {
        /// The path that was queried.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// The bundled tool version resource is missing or malformed.
    #[error("cannot obtain fusepatch version: {reason}")]
    VersionResource {
        /// Why the version could not be resolved.
        reason: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },
}

impl Error {
    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use fusepatch::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error originated from filesystem access.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::PathQuery { .. } | Self::PermissionDenied { .. }
        )
    }
}
