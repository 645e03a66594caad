//! Module and root directory reconciliation.
//!
//! Whether a module changed is decided on root directory fq_name identity.
//! The breakdown of a changed module uses presentation names, so a root that
//! moved on disk but kept its relative path shows up as unchanged.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::delta::model::{ModuleDelta, WorkspaceDelta};
use crate::model::{Module, RootDirectory};

/// Compare module sets of two snapshots, keyed by module name.
pub fn reconcile_workspace(
    baseline: &BTreeMap<String, Module>,
    current: &BTreeMap<String, Module>,
) -> WorkspaceDelta {
    let mut delta = WorkspaceDelta::default();

    for (name, module) in baseline {
        match current.get(name) {
            None => delta.removed_modules.push(module.clone()),
            Some(next) if module.root_fq_names() != next.root_fq_names() => {
                delta.changed_modules.push(module_delta(module, next));
            }
            Some(_) => {}
        }
    }

    delta.added_modules = current
        .iter()
        .filter(|(name, _)| !baseline.contains_key(*name))
        .map(|(_, module)| module.clone())
        .collect();

    debug!(
        component = module_path!(),
        op = "reconcile_workspace",
        added = delta.added_modules.len(),
        removed = delta.removed_modules.len(),
        changed = delta.changed_modules.len(),
    );
    delta
}

/// Root directories keyed by presentation name, first occurrence wins.
fn by_presentation_name(roots: &[RootDirectory]) -> Vec<&RootDirectory> {
    let mut seen = BTreeSet::new();
    roots
        .iter()
        .filter(|r| seen.insert(r.presentation_name.as_str()))
        .collect()
}

fn module_delta(baseline: &Module, current: &Module) -> ModuleDelta {
    let baseline_roots = by_presentation_name(&baseline.root_directories);
    let current_roots = by_presentation_name(&current.root_directories);

    let current_names: BTreeSet<&str> = current_roots
        .iter()
        .map(|r| r.presentation_name.as_str())
        .collect();
    let baseline_names: BTreeSet<&str> = baseline_roots
        .iter()
        .map(|r| r.presentation_name.as_str())
        .collect();

    let (unchanged, removed): (Vec<&RootDirectory>, Vec<&RootDirectory>) = baseline_roots
        .into_iter()
        .partition(|r| current_names.contains(r.presentation_name.as_str()));
    let added = current_roots
        .into_iter()
        .filter(|r| !baseline_names.contains(r.presentation_name.as_str()))
        .cloned()
        .collect();

    ModuleDelta {
        module: baseline.clone(),
        unchanged: unchanged.into_iter().cloned().collect(),
        added,
        removed: removed.into_iter().cloned().collect(),
    }
}
