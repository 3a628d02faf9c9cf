//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration structure.
///
/// Every field is optional so that partial configurations from several
/// sources can be merged.
///
/// # Examples
///
/// ```
/// use fusepatch::config::Config;
/// use std::path::PathBuf;
///
/// let config: Config = serde_yaml::from_str(
///     "server_home: /opt/wildfly\nrepository: file:///var/fusepatch/repo\n",
/// )
/// .unwrap();
/// assert_eq!(config.server_home, Some(PathBuf::from("/opt/wildfly")));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory of the server installation that patches are applied to.
    pub server_home: Option<PathBuf>,

    /// Location of the patch repository.
    pub repository: Option<String>,
}
