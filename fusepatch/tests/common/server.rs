//! A minimal patch tool over a temporary server directory.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use fusepatch::{
    Action, Error, FsOracle, ManagedPaths, Patch, PatchId, PatchTool, Record, Result,
};
use tempfile::TempDir;

/// Server installation rooted in a temporary directory.
pub struct TestServer {
    dir: TempDir,
    pub paths: ManagedPaths,
    installed: Vec<PatchId>,
}

impl TestServer {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            paths: ManagedPaths::default(),
            installed: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file that is part of the unpatched server.
    #[allow(dead_code)]
    pub fn seed_file(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn read(&self, rel: &str) -> Option<String> {
        fs::read_to_string(self.root().join(rel)).ok()
    }
}

/// In-memory repository of patches keyed by id.
#[derive(Default)]
pub struct TestRepository {
    patches: HashMap<PatchId, Vec<(String, String)>>,
}

impl TestRepository {
    /// Registers a patch made of `(path, content)` pairs.
    pub fn add(&mut self, patch_id: &PatchId, files: &[(&str, &str)]) {
        self.patches.insert(
            patch_id.clone(),
            files
                .iter()
                .map(|(p, c)| ((*p).to_string(), (*c).to_string()))
                .collect(),
        );
    }

    fn latest(&self, name: &str) -> Option<&PatchId> {
        self.patches
            .keys()
            .filter(|id| id.name() == name)
            .max_by(|a, b| a.version().cmp(b.version()))
    }

    fn files(&self, patch_id: &PatchId) -> Result<&[(String, String)]> {
        self.patches
            .get(patch_id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::NotFound {
                resource: patch_id.to_string(),
            })
    }
}

/// Patch tool that keeps the registry in step with the files it copies.
pub struct TestTool {
    pub server: TestServer,
    pub repository: TestRepository,
}

impl TestTool {
    pub fn new(server: TestServer, repository: TestRepository) -> Self {
        Self { server, repository }
    }

    fn installed_of(&self, name: &str) -> Option<PatchId> {
        self.server
            .installed
            .iter()
            .find(|id| id.name() == name)
            .cloned()
    }

    fn apply(&mut self, patch_id: &PatchId) -> Result<Patch> {
        let files = self.repository.files(patch_id)?.to_vec();
        let previous = self.installed_of(patch_id.name());

        let root = self.server.root().to_path_buf();
        let mut records = Vec::new();
        for (rel, _) in &files {
            let action = if root.join(rel).exists() {
                Action::Update
            } else {
                Action::Add
            };
            records.push(Record::new(rel, action, patch_id.clone())?);
        }

        // claims see the disk as it was before the copy
        self.server
            .paths
            .update_paths(&FsOracle, &root, &records, &[Action::Add, Action::Update])?;

        for (rel, content) in &files {
            let target = root.join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
        }

        // files the previous revision had but this one dropped
        if let Some(previous) = previous {
            let stale: Vec<String> = self
                .repository
                .files(&previous)?
                .iter()
                .map(|(p, _)| p.clone())
                .filter(|p| !files.iter().any(|(f, _)| f == p))
                .collect();
            let deleted = self.remove_files(&root, &stale, &previous)?;
            records.extend(deleted);
            self.server.installed.retain(|id| !id.same_name(patch_id));
        }

        self.server.installed.push(patch_id.clone());
        Ok(Patch::new(patch_id.clone(), records))
    }

    fn remove_files(&mut self, root: &Path, rels: &[String], owner: &PatchId) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for rel in rels {
            let still_owned = self
                .server
                .paths
                .get(rel)
                .is_some_and(|m| m.owners().iter().any(|o| !o.same_name(owner)));
            if !still_owned {
                let target: PathBuf = root.join(rel);
                if target.exists() {
                    fs::remove_file(&target)?;
                }
                prune_empty_dirs(root, &target);
            }
            records.push(Record::new(rel, Action::Delete, owner.clone())?);
        }
        self.server
            .paths
            .update_paths(&FsOracle, root, &records, &[Action::Delete])?;
        Ok(records)
    }
}

fn prune_empty_dirs(root: &Path, removed: &Path) {
    let mut dir = removed.parent();
    while let Some(d) = dir {
        if d == root || fs::remove_dir(d).is_err() {
            break;
        }
        dir = d.parent();
    }
}

impl PatchTool for TestTool {
    type Server = TestServer;
    type Repository = TestRepository;

    fn server(&self) -> &TestServer {
        &self.server
    }

    fn repository(&self) -> &TestRepository {
        &self.repository
    }

    fn install(&mut self, patch_id: &PatchId, force: bool) -> Result<Patch> {
        if !force && self.server.installed.contains(patch_id) {
            return Ok(Patch::new(patch_id.clone(), Vec::new()));
        }
        self.apply(patch_id)
    }

    fn update(&mut self, name: &str, force: bool) -> Result<Patch> {
        let latest = self
            .repository
            .latest(name)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: name.to_string(),
            })?;
        self.install(&latest, force)
    }

    fn uninstall(&mut self, patch_id: &PatchId) -> Result<Patch> {
        if !self.server.installed.contains(patch_id) {
            return Err(Error::NotFound {
                resource: patch_id.to_string(),
            });
        }
        let rels: Vec<String> = self
            .repository
            .files(patch_id)?
            .iter()
            .map(|(p, _)| p.clone())
            .collect();
        let root = self.server.root().to_path_buf();
        let records = self.remove_files(&root, &rels, patch_id)?;
        self.server.installed.retain(|id| id != patch_id);
        Ok(Patch::new(patch_id.clone(), records))
    }
}
