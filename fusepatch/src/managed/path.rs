//! The ownership value stored per managed path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::PatchId;
use crate::path::normalize_relative;

/// A path together with the patches that own it.
///
/// Owners are kept in application order, oldest first. A `ManagedPath` is
/// immutable: the registry replaces the whole value whenever ownership
/// changes.
///
/// Construction enforces the ownership invariants:
/// - at least one owner,
/// - no two owners with the same name,
/// - the server sentinel, if present, comes first.
///
/// # Examples
///
/// ```
/// use fusepatch::{ManagedPath, PatchId, SERVER_ID};
///
/// let patch: PatchId = "patch-2-1.0.0".parse().unwrap();
/// let mpath = ManagedPath::new("conf/settings.xml", vec![SERVER_ID, patch]).unwrap();
///
/// assert_eq!(mpath.to_string(), "conf/settings.xml [server-0.0.0, patch-2-1.0.0]");
/// assert!(mpath.has_server_owner());
///
/// assert!(ManagedPath::new("conf/settings.xml", vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawManagedPath")]
pub struct ManagedPath {
    path: PathBuf,
    owners: Vec<PatchId>,
}

#[derive(Deserialize)]
struct RawManagedPath {
    path: PathBuf,
    owners: Vec<PatchId>,
}

impl TryFrom<RawManagedPath> for ManagedPath {
    type Error = Error;

    fn try_from(raw: RawManagedPath) -> Result<Self> {
        Self::new(raw.path, raw.owners)
    }
}

impl ManagedPath {
    /// Creates a managed path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a normalized relative path, if
    /// `owners` is empty, if two owners share a name, or if the server
    /// sentinel is anywhere but first.
    pub fn new(path: impl AsRef<Path>, owners: Vec<PatchId>) -> Result<Self> {
        let path = normalize_relative(path.as_ref())?;

        if owners.is_empty() {
            return Err(Error::EmptyOwners { path });
        }

        for (idx, owner) in owners.iter().enumerate() {
            if owners[..idx].iter().any(|prev| prev.same_name(owner)) {
                return Err(Error::DuplicateOwner {
                    path,
                    name: owner.name().to_string(),
                });
            }
            if idx > 0 && owner.is_server() {
                return Err(Error::Validation {
                    field: "owners".into(),
                    message: format!(
                        "server owner must come first for {}",
                        path.display()
                    ),
                });
            }
        }

        Ok(Self { path, owners })
    }

    /// Returns the installation-relative path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the owners, oldest first.
    #[must_use]
    pub fn owners(&self) -> &[PatchId] {
        &self.owners
    }

    /// Returns the most recently applied owner.
    #[must_use]
    pub fn latest_owner(&self) -> &PatchId {
        // never empty, checked in `new`
        &self.owners[self.owners.len() - 1]
    }

    /// Returns `true` if the path existed before any patch claimed it.
    #[must_use]
    pub fn has_server_owner(&self) -> bool {
        self.owners.first().is_some_and(PatchId::is_server)
    }

    /// Returns `true` if a patch with the same name as `owner` owns this path.
    #[must_use]
    pub fn is_owned_by(&self, owner: &PatchId) -> bool {
        self.owners.iter().any(|o| o.same_name(owner))
    }
}

impl fmt::Display for ManagedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.path.display())?;
        for (idx, owner) in self.owners.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{owner}")?;
        }
        write!(f, "]")
    }
}

/// Removes the first owner that has the same name as `owner`.
///
/// Returns `true` if an owner was removed. Versions are ignored, so this
/// also removes an older or newer revision of the same patch.
pub fn remove_owner(owners: &mut Vec<PatchId>, owner: &PatchId) -> bool {
    match owners.iter().position(|o| o.same_name(owner)) {
        Some(idx) => {
            owners.remove(idx);
            true
        }
        None => false,
    }
}
