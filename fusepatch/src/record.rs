//! Change records describing one patch operation.
//!
//! A [`Patch`] is the ordered list of [`Record`]s produced by diffing patch
//! content. The registry consumes these records to keep path ownership in
//! step with what was written to or removed from the installation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::PatchId;
use crate::path::normalize_relative;

/// What a change record does to its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// The path is new in this patch.
    #[serde(rename = "ADD")]
    Add,
    /// The path already exists and its content is replaced.
    #[serde(rename = "UPD")]
    Update,
    /// The path is removed.
    #[serde(rename = "DEL")]
    Delete,
}

impl Action {
    /// Every action, in the order the facade usually applies them.
    pub const ALL: [Self; 3] = [Self::Add, Self::Update, Self::Delete];

    /// Returns `true` for actions that give the record's owner a claim on
    /// its path.
    #[must_use]
    pub const fn claims_path(self) -> bool {
        matches!(self, Self::Add | Self::Update)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Update => write!(f, "UPD"),
            Self::Delete => write!(f, "DEL"),
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Accepts the short tokens as well as the spelled-out names,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADD" => Ok(Self::Add),
            "UPD" | "UPDATE" => Ok(Self::Update),
            "DEL" | "DELETE" => Ok(Self::Delete),
            _ => Err(Error::Validation {
                field: "action".into(),
                message: format!("unknown action '{s}'"),
            }),
        }
    }
}

/// One `(path, action, owner)` instruction derived from patch content.
///
/// # Examples
///
/// ```
/// use fusepatch::{Action, PatchId, Record};
///
/// let owner: PatchId = "patch-1-1.0.0".parse().unwrap();
/// let record = Record::new("./modules/foo.jar", Action::Add, owner).unwrap();
/// assert_eq!(record.path().to_str(), Some("modules/foo.jar"));
/// assert_eq!(record.to_string(), "ADD modules/foo.jar patch-1-1.0.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    path: PathBuf,
    action: Action,
    owner: PatchId,
}

#[derive(Deserialize)]
struct RawRecord {
    path: PathBuf,
    action: Action,
    owner: PatchId,
}

impl TryFrom<RawRecord> for Record {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Self::new(raw.path, raw.action, raw.owner)
    }
}

impl Record {
    /// Creates a change record for an installation-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is not a normalized
    /// relative path.
    pub fn new(path: impl AsRef<Path>, action: Action, owner: PatchId) -> Result<Self> {
        Ok(Self {
            path: normalize_relative(path.as_ref())?,
            action,
            owner,
        })
    }

    /// Returns the installation-relative path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the action.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Returns the identity of the patch the record belongs to.
    #[must_use]
    pub const fn owner(&self) -> &PatchId {
        &self.owner
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.action, self.path.display(), self.owner)
    }
}

/// The outcome of a patch operation: the patch identity and the ordered
/// change records that were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    id: PatchId,
    records: Vec<Record>,
}

impl Patch {
    /// Creates a patch from its identity and ordered records.
    #[must_use]
    pub fn new(id: PatchId, records: Vec<Record>) -> Self {
        Self { id, records }
    }

    /// Returns the patch identity.
    #[must_use]
    pub const fn id(&self) -> &PatchId {
        &self.id
    }

    /// Returns the change records in application order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the records whose action is one of `actions`, keeping order.
    pub fn records_for<'a>(&'a self, actions: &'a [Action]) -> impl Iterator<Item = &'a Record> {
        self.records
            .iter()
            .filter(move |rec| actions.contains(&rec.action))
    }
}
