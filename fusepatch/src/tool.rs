//! The patch tool facade and startup version resolution.
//!
//! The facade sequences the actual file changes of an install, update, or
//! uninstall and then brings the [`ManagedPaths`](crate::ManagedPaths)
//! registry in line with the disk. Only its interface lives here.

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::identity::{PatchId, Version};
use crate::record::Patch;

/// The bundled version resource.
const VERSION_RESOURCE: &str = include_str!("../resources/version.properties");

static TOOL_VERSION: OnceLock<Version> = OnceLock::new();

/// Operations of the patch tool.
///
/// Implementations call
/// [`ManagedPaths::update_paths`](crate::ManagedPaths::update_paths) once
/// with `ADD`/`UPD` while the disk still shows the pre-copy state, so that
/// new directories and taken-over server files are told apart, and once with
/// `DEL` after the files were removed.
pub trait PatchTool {
    /// The server installation the tool operates on.
    type Server;

    /// The repository patches are taken from.
    type Repository;

    /// Returns the server installation.
    fn server(&self) -> &Self::Server;

    /// Returns the patch repository.
    fn repository(&self) -> &Self::Repository;

    /// Installs the given patch on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch is unknown or a file cannot be written.
    fn install(&mut self, patch_id: &PatchId, force: bool) -> Result<Patch>;

    /// Updates the server to the latest patch of the given family.
    ///
    /// # Errors
    ///
    /// Returns an error if no such family exists or a file cannot be written.
    fn update(&mut self, name: &str, force: bool) -> Result<Patch>;

    /// Uninstalls the given patch from the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch is not installed or a file cannot be
    /// removed.
    fn uninstall(&mut self, patch_id: &PatchId) -> Result<Patch>;
}

/// Returns the version of this tool.
///
/// The version is read from the bundled `version.properties` on first use.
///
/// # Errors
///
/// Returns [`Error::VersionResource`] if the resource holds no version line or
/// the line does not parse.
///
/// # Examples
///
/// ```
/// let version = fusepatch::tool_version().unwrap();
/// assert_eq!(version.to_string(), "0.1.0");
/// ```
pub fn tool_version() -> Result<&'static Version> {
    if let Some(version) = TOOL_VERSION.get() {
        return Ok(version);
    }
    let version = parse_version_resource(VERSION_RESOURCE)?;
    Ok(TOOL_VERSION.get_or_init(|| version))
}

/// Parses a version resource: the first line that is neither blank nor a
/// `#` comment holds the version.
///
/// # Errors
///
/// Returns [`Error::VersionResource`] if there is no such line or it is not a
/// valid version.
///
/// # Examples
///
/// ```
/// use fusepatch::parse_version_resource;
///
/// let version = parse_version_resource("# comment\n\n  2.3.1  \n9.9.9\n").unwrap();
/// assert_eq!(version.to_string(), "2.3.1");
///
/// assert!(parse_version_resource("# nothing here\n").is_err());
/// ```
pub fn parse_version_resource(text: &str) -> Result<Version> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or_else(|| Error::VersionResource {
            reason: "no version line found".to_string(),
        })?;

    line.parse().map_err(|e| Error::VersionResource {
        reason: format!("{e}"),
    })
}
