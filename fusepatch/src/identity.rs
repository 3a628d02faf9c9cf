//! Patch identities and versions.
//!
//! A [`PatchId`] names a patch family and one revision of it. The registry
//! treats two identities as the same owner when their names match, so an
//! upgraded patch replaces its predecessor instead of adding a second entry.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the sentinel identity that marks pre-existing server content.
pub const SERVER_NAME: &str = "server";

/// The owner recorded for content that shipped with the server itself.
///
/// It only ever appears first in an owners list.
///
/// # Examples
///
/// ```
/// use fusepatch::SERVER_ID;
///
/// assert!(SERVER_ID.is_server());
/// assert_eq!(SERVER_ID.to_string(), "server-0.0.0");
/// ```
pub const SERVER_ID: PatchId = PatchId {
    name: Cow::Borrowed(SERVER_NAME),
    version: Version::EMPTY,
};

/// A dotted version: `major[.minor[.micro[.qualifier]]]`.
///
/// Missing numeric parts default to zero. Versions order by their numeric
/// parts first, then by qualifier, with no qualifier sorting first.
///
/// # Examples
///
/// ```
/// use fusepatch::Version;
///
/// let version: Version = "2.1".parse().unwrap();
/// assert_eq!(version.to_string(), "2.1.0");
///
/// let snapshot: Version = "2.1.0.SNAPSHOT".parse().unwrap();
/// assert!(version < snapshot);
/// assert_eq!(snapshot.qualifier(), "SNAPSHOT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    micro: u32,
    qualifier: Cow<'static, str>,
}

impl Version {
    /// The empty version, `0.0.0`.
    pub const EMPTY: Self = Self {
        major: 0,
        minor: 0,
        micro: 0,
        qualifier: Cow::Borrowed(""),
    };

    /// Creates a version without a qualifier.
    #[must_use]
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: Cow::Borrowed(""),
        }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns the micro component.
    #[must_use]
    pub const fn micro(&self) -> u32 {
        self.micro
    }

    /// Returns the qualifier, or `""` if there is none.
    #[must_use]
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    fn parse_number(input: &str, label: &str, part: &str) -> Result<u32> {
        part.parse().map_err(|_| Error::InvalidVersion {
            value: input.to_string(),
            reason: format!("{label} component '{part}' is not a number"),
        })
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidVersion {
                value: s.to_string(),
                reason: "version must not be empty".to_string(),
            });
        }

        let mut parts = trimmed.splitn(4, '.');
        let major = Self::parse_number(s, "major", parts.next().unwrap_or_default())?;
        let minor = match parts.next() {
            Some(part) => Self::parse_number(s, "minor", part)?,
            None => 0,
        };
        let micro = match parts.next() {
            Some(part) => Self::parse_number(s, "micro", part)?,
            None => 0,
        };
        let qualifier = match parts.next() {
            Some(q) => {
                let valid = !q.is_empty()
                    && q
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if !valid {
                    return Err(Error::InvalidVersion {
                        value: s.to_string(),
                        reason: format!("invalid qualifier '{q}'"),
                    });
                }
                Cow::Owned(q.to_string())
            }
            None => Cow::Borrowed(""),
        };

        Ok(Self {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

/// Identity of a patch: a family name plus a version.
///
/// The textual form is `name-version`, e.g. `fuse-patch-core-1.2.0`.
///
/// # Examples
///
/// ```
/// use fusepatch::{PatchId, Version};
///
/// let id: PatchId = "camel-patch-2.15.1".parse().unwrap();
/// assert_eq!(id.name(), "camel-patch");
/// assert_eq!(id.version(), &Version::new(2, 15, 1));
///
/// let next = PatchId::new("camel-patch", Version::new(2, 16, 0)).unwrap();
/// assert!(id.same_name(&next));
/// assert_ne!(id, next);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatchId {
    name: Cow<'static, str>,
    version: Version,
}

impl PatchId {
    /// Creates a patch identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPatchId`] if the name is empty or contains
    /// whitespace.
    pub fn new(name: impl Into<String>, version: Version) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidPatchId {
                value: format!("{name}-{version}"),
                reason: "name must be non-empty and must not contain whitespace".to_string(),
            });
        }
        Ok(Self {
            name: Cow::Owned(name),
            version,
        })
    }

    /// Returns the patch family name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// Returns `true` if both identities belong to the same patch family.
    #[must_use]
    pub fn same_name(&self, other: &Self) -> bool {
        self.name == other.name
    }

    /// Returns `true` if this is the server sentinel.
    #[must_use]
    pub fn is_server(&self) -> bool {
        self.name == SERVER_NAME
    }
}

impl FromStr for PatchId {
    type Err = Error;

    /// Splits at the first `-` that starts a parseable version.
    fn from_str(s: &str) -> Result<Self> {
        for (idx, _) in s.match_indices('-') {
            let (name, rest) = (&s[..idx], &s[idx + 1..]);
            if name.is_empty() || !rest.starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }
            if let Ok(version) = rest.parse::<Version>() {
                return Self::new(name, version);
            }
        }
        Err(Error::InvalidPatchId {
            value: s.to_string(),
            reason: "expected <name>-<version>".to_string(),
        })
    }
}

impl TryFrom<String> for PatchId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PatchId> for String {
    fn from(id: PatchId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for PatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defaults_missing_parts() {
        let v: Version = "3".parse().unwrap();
        assert_eq!((v.major(), v.minor(), v.micro()), (3, 0, 0));
        assert_eq!(v.qualifier(), "");
        assert_eq!(v.to_string(), "3.0.0");
    }

    #[test]
    fn test_version_with_qualifier() {
        let v: Version = "1.2.3.redhat-00001".parse().unwrap();
        assert_eq!(v.qualifier(), "redhat-00001");
        assert_eq!(v.to_string(), "1.2.3.redhat-00001");
    }

    #[test]
    fn test_version_rejects_garbage() {
        assert!("".parse::<Version>().is_err());
        assert!("1.x".parse::<Version>().is_err());
        assert!("1..2".parse::<Version>().is_err());
        assert!("1.2.3.".parse::<Version>().is_err());
        assert!("1.2.3.bad qualifier".parse::<Version>().is_err());
        assert!("-1".parse::<Version>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        let a: Version = "1.0.0".parse().unwrap();
        let b: Version = "1.0.0.Beta1".parse().unwrap();
        let c: Version = "1.0.1".parse().unwrap();
        let d: Version = "1.10.0".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_empty_version() {
        assert_eq!(Version::EMPTY, Version::new(0, 0, 0));
        assert_eq!(Version::EMPTY.to_string(), "0.0.0");
    }

    #[test]
    fn test_patch_id_parse_simple() {
        let id: PatchId = "foo-1.0.0".parse().unwrap();
        assert_eq!(id.name(), "foo");
        assert_eq!(id.version().to_string(), "1.0.0");
    }

    #[test]
    fn test_patch_id_parse_hyphenated_name() {
        let id: PatchId = "fuse-patch-core-2.0.0.SP1".parse().unwrap();
        assert_eq!(id.name(), "fuse-patch-core");
        assert_eq!(id.version().qualifier(), "SP1");
    }

    #[test]
    fn test_patch_id_parse_skips_non_version_suffix() {
        // "7x" is not a version, so the split happens at the later hyphen
        let id: PatchId = "jdk-7x-1.1".parse().unwrap();
        assert_eq!(id.name(), "jdk-7x");
        assert_eq!(id.version(), &Version::new(1, 1, 0));
    }

    #[test]
    fn test_patch_id_parse_errors() {
        assert!("foo".parse::<PatchId>().is_err());
        assert!("-1.0".parse::<PatchId>().is_err());
        assert!("foo-".parse::<PatchId>().is_err());
        assert!("foo-bar".parse::<PatchId>().is_err());
    }

    #[test]
    fn test_patch_id_new_validates_name() {
        assert!(PatchId::new("", Version::EMPTY).is_err());
        assert!(PatchId::new("has space", Version::EMPTY).is_err());
        assert!(PatchId::new("ok", Version::EMPTY).is_ok());
    }

    #[test]
    fn test_patch_id_display_roundtrip() {
        let id = PatchId::new("patch-1", Version::new(1, 2, 0)).unwrap();
        assert_eq!(id.to_string(), "patch-1-1.2.0");
        assert_eq!(id.to_string().parse::<PatchId>().unwrap(), id);
    }

    #[test]
    fn test_same_name_ignores_version() {
        let old: PatchId = "patch-1-1.0".parse().unwrap();
        let new: PatchId = "patch-1-2.0".parse().unwrap();
        let other: PatchId = "patch-2-1.0".parse().unwrap();
        assert!(old.same_name(&new));
        assert!(!old.same_name(&other));
    }

    #[test]
    fn test_server_sentinel() {
        assert!(SERVER_ID.is_server());
        let parsed: PatchId = "server-0.0.0".parse().unwrap();
        assert_eq!(parsed, SERVER_ID);
        let patch: PatchId = "patch-1-1.0".parse().unwrap();
        assert!(!patch.is_server());
    }

    #[test]
    fn test_serde_as_string() {
        let id: PatchId = "patch-1-1.0.0".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"patch-1-1.0.0\"");
        let back: PatchId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<PatchId>("\"nope\"").is_err());
    }
}
