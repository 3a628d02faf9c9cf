//! Read-only filesystem queries used to infer path ownership.
//!
//! The registry never touches file content. It only asks whether a path
//! exists and whether it is a regular file. The queries are behind a trait
//! so tests can simulate any on-disk state without real storage.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Trait for answering existence and type questions about absolute paths.
///
/// Absence is an answer, not an error: both queries return `Ok(false)` for a
/// path that does not exist. Any other failure (permissions, transient I/O)
/// is returned as an error and must not be treated as absence.
///
/// # Examples
///
/// ```
/// use fusepatch::oracle::{MockOracle, PathOracle};
/// use std::path::Path;
///
/// let oracle = MockOracle::new().with_file("/srv/conf/settings.xml");
///
/// assert!(oracle.exists(Path::new("/srv/conf")).unwrap());
/// assert!(oracle.is_regular_file(Path::new("/srv/conf/settings.xml")).unwrap());
/// assert!(!oracle.exists(Path::new("/srv/lib")).unwrap());
/// ```
pub trait PathOracle {
    /// Returns `true` if something exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be queried.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Returns `true` if `path` exists and is a regular file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be queried.
    fn is_regular_file(&self, path: &Path) -> Result<bool>;
}

/// Oracle backed by the real filesystem.
///
/// Symlinks are followed, so a link to a regular file counts as one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOracle;

impl FsOracle {
    fn metadata(path: &Path) -> Result<Option<fs::Metadata>> {
        log::trace!("querying {}", path.display());
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Err(Error::PermissionDenied {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(Error::PathQuery {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

impl PathOracle for FsOracle {
    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(Self::metadata(path)?.is_some())
    }

    fn is_regular_file(&self, path: &Path) -> Result<bool> {
        Ok(Self::metadata(path)?.is_some_and(|meta| meta.is_file()))
    }
}

/// In-memory oracle for deterministic tests.
///
/// Adding a file or directory implicitly makes all of its ancestors exist as
/// directories. Individual paths can be made to fail with a chosen I/O error
/// kind to exercise error propagation.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    failures: HashMap<PathBuf, io::ErrorKind>,
}

impl MockOracle {
    /// Create an empty oracle in which nothing exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MockOracle::add_dir`].
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Builder form of [`MockOracle::add_file`].
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.add_file(path);
        self
    }

    /// Builder form of [`MockOracle::fail_on`].
    #[must_use]
    pub fn with_failure(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.fail_on(path, kind);
        self
    }

    /// Make `path` and its ancestors exist as directories.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.files.remove(path);
        for dir in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            self.dirs.insert(dir.to_path_buf());
        }
    }

    /// Make `path` exist as a regular file, creating its ancestors.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.dirs.remove(path);
        self.files.insert(path.to_path_buf());
    }

    /// Remove `path` and everything below it.
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.dirs.retain(|p| !p.starts_with(path));
        self.files.retain(|p| !p.starts_with(path));
    }

    /// Make every query for `path` fail with the given error kind.
    pub fn fail_on(&mut self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.failures.insert(path.as_ref().to_path_buf(), kind);
    }

    fn check(&self, path: &Path) -> Result<()> {
        match self.failures.get(path) {
            Some(io::ErrorKind::PermissionDenied) => Err(Error::PermissionDenied {
                path: path.to_path_buf(),
            }),
            Some(kind) => Err(Error::PathQuery {
                path: path.to_path_buf(),
                source: io::Error::new(*kind, "simulated failure"),
            }),
            None => Ok(()),
        }
    }
}

impl PathOracle for MockOracle {
    fn exists(&self, path: &Path) -> Result<bool> {
        self.check(path)?;
        Ok(self.dirs.contains(path) || self.files.contains(path))
    }

    fn is_regular_file(&self, path: &Path) -> Result<bool> {
        self.check(path)?;
        Ok(self.files.contains(path))
    }
}
