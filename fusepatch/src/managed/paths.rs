//! The path ownership registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::identity::{PatchId, SERVER_ID};
use crate::managed::path::{remove_owner, ManagedPath};
use crate::oracle::PathOracle;
use crate::path::parent_of;
use crate::record::{Action, Record};

/// The set of managed paths of a server installation.
///
/// Maps each installation-relative path to the [`ManagedPath`] recording
/// which patches own it. Paths that no patch claims are absent.
///
/// The registry is not synchronized. Callers serialize calls to
/// [`ManagedPaths::update_paths`] for the duration of one patch operation.
///
/// # Examples
///
/// ```
/// use fusepatch::oracle::MockOracle;
/// use fusepatch::{Action, ManagedPaths, PatchId, Record};
/// use std::path::Path;
///
/// let owner: PatchId = "patch-1-1.0.0".parse().unwrap();
/// let records = vec![Record::new("a/b/file.txt", Action::Add, owner.clone()).unwrap()];
///
/// // Nothing below the root exists yet, so `a` and `a/b` become managed too.
/// let oracle = MockOracle::new().with_dir("/srv");
/// let mut paths = ManagedPaths::default();
/// paths
///     .update_paths(&oracle, Path::new("/srv"), &records, &[Action::Add])
///     .unwrap();
///
/// assert_eq!(paths.len(), 3);
/// assert_eq!(paths.get("a").unwrap().owners(), &[owner]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedPaths {
    paths: HashMap<PathBuf, ManagedPath>,
}

impl ManagedPaths {
    /// Creates a registry from previously persisted entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePath`] if two entries share a path.
    pub fn new(entries: Vec<ManagedPath>) -> Result<Self> {
        let mut paths = HashMap::with_capacity(entries.len());
        for mpath in entries {
            let key = mpath.path().to_path_buf();
            if paths.contains_key(&key) {
                return Err(Error::DuplicatePath { path: key });
            }
            paths.insert(key, mpath);
        }
        Ok(Self { paths })
    }

    /// Returns the ownership entry for `path`, if the path is managed.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&ManagedPath> {
        self.paths.get(path.as_ref())
    }

    /// Returns a snapshot of all entries, sorted by path.
    ///
    /// The snapshot is detached from the registry.
    #[must_use]
    pub fn list(&self) -> Vec<ManagedPath> {
        let mut result: Vec<ManagedPath> = self.paths.values().cloned().collect();
        result.sort_by(|a, b| a.path().cmp(b.path()));
        result
    }

    /// Returns the number of managed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no path is managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Applies change records to the registry.
    ///
    /// Records whose action is not in `actions` are skipped; the rest are
    /// processed in order. `ADD` and `UPD` give the record's owner the path,
    /// `DEL` takes it away. Directory ownership is inferred by querying
    /// `oracle` for paths resolved against `root`: claims are applied before
    /// the files are copied, removals after the files are gone.
    ///
    /// The update is all-or-nothing: if any query or ownership change fails,
    /// the registry is left exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns oracle errors (permission denied, other I/O failures) and
    /// ownership validation errors.
    pub fn update_paths<O>(
        &mut self,
        oracle: &O,
        root: &Path,
        records: &[Record],
        actions: &[Action],
    ) -> Result<&mut Self>
    where
        O: PathOracle + ?Sized,
    {
        let snapshot = self.paths.clone();
        let mut updater = Updater {
            paths: &mut self.paths,
            oracle,
            root,
        };

        for rec in records.iter().filter(|rec| actions.contains(&rec.action())) {
            let result = if rec.action().claims_path() {
                updater.add_path_owner(rec.path(), rec.owner())
            } else {
                updater.remove_path_owner(rec.path(), rec.owner())
            };
            if let Err(err) = result {
                log::warn!("rolling back ownership changes after '{rec}': {err}");
                self.paths = snapshot;
                return Err(err);
            }
        }

        Ok(self)
    }
}

impl IntoIterator for ManagedPaths {
    type Item = ManagedPath;
    type IntoIter = std::vec::IntoIter<ManagedPath>;

    /// Consumes the registry, yielding entries sorted by path.
    fn into_iter(self) -> Self::IntoIter {
        let mut entries: Vec<ManagedPath> = self.paths.into_values().collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        entries.into_iter()
    }
}

struct Updater<'a, O: ?Sized> {
    paths: &'a mut HashMap<PathBuf, ManagedPath>,
    oracle: &'a O,
    root: &'a Path,
}

impl<O: PathOracle + ?Sized> Updater<'_, O> {
    /// Gives `owner` the path, after first attributing any parent directory
    /// that is missing on disk or already managed.
    fn add_path_owner(&mut self, path: &Path, owner: &PatchId) -> Result<()> {
        if let Some(parent) = parent_of(path) {
            if self.paths.contains_key(parent) || !self.oracle.exists(&self.root.join(parent))? {
                self.add_path_owner(parent, owner)?;
            }
        }

        let owners = match self.paths.get(path) {
            Some(mpath) => {
                let mut owners = mpath.owners().to_vec();
                remove_owner(&mut owners, owner);
                owners.push(owner.clone());
                owners
            }
            None if self.oracle.is_regular_file(&self.root.join(path))? => {
                vec![SERVER_ID, owner.clone()]
            }
            None => vec![owner.clone()],
        };

        let mpath = ManagedPath::new(path, owners)?;
        log::debug!("managed: {mpath}");
        self.paths.insert(path.to_path_buf(), mpath);
        Ok(())
    }

    /// Takes the path away from `owner`, then walks up through parent
    /// directories that no longer exist on disk.
    fn remove_path_owner(&mut self, path: &Path, owner: &PatchId) -> Result<()> {
        if let Some(mpath) = self.paths.get(path) {
            let mut owners = mpath.owners().to_vec();
            remove_owner(&mut owners, owner);

            // only the server is left, nothing is patched anymore
            if owners.len() == 1 && owners[0].is_server() {
                owners.clear();
            }

            if owners.is_empty() {
                log::debug!("unmanaged: {}", path.display());
                self.paths.remove(path);
            } else {
                let mpath = ManagedPath::new(path, owners)?;
                log::debug!("managed: {mpath}");
                self.paths.insert(path.to_path_buf(), mpath);
            }
        }

        if let Some(parent) = parent_of(path) {
            if !self.oracle.exists(&self.root.join(parent))? {
                self.remove_path_owner(parent, owner)?;
            }
        }

        Ok(())
    }
}
