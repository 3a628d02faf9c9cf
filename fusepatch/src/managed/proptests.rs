//! Property-based tests for the ownership registry.
//!
//! Each case drives the registry the way the patch tool does: claims are
//! applied before the simulated copy, removals after the simulated delete.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use super::{ManagedPath, ManagedPaths};
use crate::identity::{PatchId, Version};
use crate::oracle::MockOracle;
use crate::record::{Action, Record};

const ROOT: &str = "/srv/server";

const FILES: [&str; 6] = [
    "a/b/c.txt",
    "a/b/d.txt",
    "a/e.txt",
    "f.txt",
    "g/h/i/j.txt",
    "bin/run.sh",
];

const OWNERS: [&str; 3] = ["alpha", "beta", "gamma"];

#[derive(Debug, Clone)]
struct Op {
    file: usize,
    owner: usize,
    version: u32,
    add: bool,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    (0..FILES.len(), 0..OWNERS.len(), 1u32..4, any::<bool>()).prop_map(
        |(file, owner, version, add)| Op {
            file,
            owner,
            version,
            add,
        },
    )
}

fn oracle_for(on_disk: &BTreeSet<&str>) -> MockOracle {
    let mut oracle = MockOracle::new().with_dir(ROOT);
    for file in on_disk {
        oracle.add_file(Path::new(ROOT).join(file));
    }
    oracle
}

fn owner(op: &Op) -> PatchId {
    PatchId::new(OWNERS[op.owner], Version::new(op.version, 0, 0)).unwrap()
}

fn check_invariants(paths: &ManagedPaths) -> Result<(), TestCaseError> {
    let listed = paths.list();
    prop_assert_eq!(listed.len(), paths.len());
    for pair in listed.windows(2) {
        prop_assert!(pair[0].path() < pair[1].path());
    }
    for mpath in &listed {
        prop_assert!(!mpath.owners().is_empty());
        for (idx, o) in mpath.owners().iter().enumerate() {
            prop_assert!(idx == 0 || !o.is_server());
        }
    }
    let rebuilt = ManagedPaths::new(listed).unwrap();
    prop_assert_eq!(&rebuilt, paths);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Any facade-like sequence keeps every entry valid, sorted, and
    // rebuildable from its own listing
    #[test]
    fn registry_invariants_hold(
        preexisting in prop::collection::btree_set(0..FILES.len(), 0..3),
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let root = PathBuf::from(ROOT);
        let mut on_disk: BTreeSet<&str> = preexisting.iter().map(|&i| FILES[i]).collect();
        let mut paths = ManagedPaths::default();

        for op in &ops {
            let file = FILES[op.file];
            let owner = owner(op);

            if op.add {
                let record = Record::new(file, Action::Add, owner.clone()).unwrap();
                paths
                    .update_paths(&oracle_for(&on_disk), &root, &[record], &[Action::Add])
                    .unwrap();
                on_disk.insert(file);

                let mpath = paths.get(file).unwrap();
                prop_assert_eq!(mpath.latest_owner(), &owner);
                let same = mpath.owners().iter().filter(|o| o.same_name(&owner)).count();
                prop_assert_eq!(same, 1);
            } else {
                on_disk.remove(file);
                let record = Record::new(file, Action::Delete, owner.clone()).unwrap();
                paths
                    .update_paths(&oracle_for(&on_disk), &root, &[record], &[Action::Delete])
                    .unwrap();

                if let Some(mpath) = paths.get(file) {
                    prop_assert!(!mpath.is_owned_by(&owner));
                }
            }

            check_invariants(&paths)?;
        }
    }

    // Re-adding an owner under a new version never duplicates it
    #[test]
    fn upgrade_replaces_owner(
        file in 0..FILES.len(),
        first in 1u32..10,
        second in 1u32..10,
        other in any::<bool>(),
    ) {
        let root = PathBuf::from(ROOT);
        let oracle = MockOracle::new().with_dir(ROOT);
        let old = PatchId::new("alpha", Version::new(first, 0, 0)).unwrap();
        let new = PatchId::new("alpha", Version::new(second, 0, 0)).unwrap();
        let mut paths = ManagedPaths::default();

        let mut records = vec![Record::new(FILES[file], Action::Add, old).unwrap()];
        if other {
            let beta = PatchId::new("beta", Version::new(1, 0, 0)).unwrap();
            records.push(Record::new(FILES[file], Action::Add, beta).unwrap());
        }
        records.push(Record::new(FILES[file], Action::Update, new.clone()).unwrap());

        paths.update_paths(&oracle, &root, &records, &Action::ALL).unwrap();

        let mpath: &ManagedPath = paths.get(FILES[file]).unwrap();
        prop_assert_eq!(mpath.owners().len(), if other { 2 } else { 1 });
        prop_assert_eq!(mpath.latest_owner(), &new);
    }
}
