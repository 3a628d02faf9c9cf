//! Common test utilities for integration tests.
//!
//! This module provides a throwaway server installation on disk and a small
//! in-memory patch tool that drives the registry the way a real one does.

pub mod server;

use fusepatch::{Action, PatchId, Record};

/// Parses a patch id, panicking on bad test input.
#[allow(dead_code)]
pub fn id(s: &str) -> PatchId {
    s.parse().unwrap()
}

/// Builds a record, panicking on bad test input.
#[allow(dead_code)]
pub fn rec(path: &str, action: Action, owner: &str) -> Record {
    Record::new(path, action, id(owner)).unwrap()
}

/// Renders a registry listing as `path [owners]` lines.
#[allow(dead_code)]
pub fn render(paths: &fusepatch::ManagedPaths) -> Vec<String> {
    paths.list().iter().map(ToString::to_string).collect()
}
