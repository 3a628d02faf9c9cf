//! Installation-relative path handling.
//!
//! Every path tracked by the registry, and every path carried by a change
//! record, is relative to the server installation root. This module turns
//! user-provided paths into that canonical relative form.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize a path to the relative form used as a registry key.
///
/// `.` components are dropped. Absolute paths, Windows prefixes, and `..`
/// components are rejected, as is a path with no components left.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path cannot be expressed as a
/// normalized path below the installation root.
///
/// # Examples
///
/// ```
/// use fusepatch::path::normalize_relative;
/// use std::path::{Path, PathBuf};
///
/// let path = normalize_relative(Path::new("./modules/./system")).unwrap();
/// assert_eq!(path, PathBuf::from("modules/system"));
///
/// assert!(normalize_relative(Path::new("/etc/passwd")).is_err());
/// assert!(normalize_relative(Path::new("modules/../bin")).is_err());
/// assert!(normalize_relative(Path::new(".")).is_err());
/// ```
pub fn normalize_relative(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(invalid(path, "parent directory references are not allowed"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid(path, "path must be relative to the installation root"));
            }
        }
    }

    if result.as_os_str().is_empty() {
        return Err(invalid(path, "path must not be empty"));
    }

    Ok(result)
}

/// Returns the parent of a relative path, if it has one.
///
/// Unlike [`Path::parent`], a single-component path has no parent here: the
/// installation root itself is never a managed path.
///
/// # Examples
///
/// ```
/// use fusepatch::path::parent_of;
/// use std::path::Path;
///
/// assert_eq!(parent_of(Path::new("a/b/file.txt")), Some(Path::new("a/b")));
/// assert_eq!(parent_of(Path::new("a")), None);
/// ```
#[must_use]
pub fn parent_of(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn invalid(path: &Path, reason: &str) -> Error {
    Error::InvalidPath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
