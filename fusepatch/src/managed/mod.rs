//! Path ownership tracking.
//!
//! [`ManagedPaths`] records, for every path below a server installation
//! that some patch has touched, which patches own it. Ownership is updated
//! from the change records of each install, update, or uninstall:
//!
//! - Adding a path gives the patch ownership of it. Parent directories that
//!   are missing on disk, or already managed, are claimed first, so every
//!   managed path has a managed chain of ancestors up to the first directory
//!   that pre-existed.
//! - A file that already existed before any patch claimed it keeps the
//!   server sentinel as its first owner.
//! - Removing a path drops the patch from its owners. An entry left with no
//!   owners, or with only the server sentinel, is removed. Parent
//!   directories are released once they no longer exist on disk.
//!
//! # Examples
//!
//! ```
//! use fusepatch::oracle::MockOracle;
//! use fusepatch::{Action, ManagedPaths, PatchId, Record, SERVER_ID};
//! use std::path::Path;
//!
//! let root = Path::new("/opt/server");
//! let patch: PatchId = "patch-2-1.0.0".parse().unwrap();
//! let oracle = MockOracle::new().with_file("/opt/server/conf/settings.xml");
//!
//! let mut paths = ManagedPaths::default();
//! let add = [Record::new("conf/settings.xml", Action::Update, patch.clone()).unwrap()];
//! paths.update_paths(&oracle, root, &add, &[Action::Update]).unwrap();
//! assert_eq!(
//!     paths.get("conf/settings.xml").unwrap().owners(),
//!     &[SERVER_ID, patch.clone()]
//! );
//!
//! let del = [Record::new("conf/settings.xml", Action::Delete, patch).unwrap()];
//! paths.update_paths(&oracle, root, &del, &[Action::Delete]).unwrap();
//! assert!(paths.get("conf/settings.xml").is_none());
//! ```

mod path;
mod paths;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use path::{remove_owner, ManagedPath};
pub use paths::ManagedPaths;
