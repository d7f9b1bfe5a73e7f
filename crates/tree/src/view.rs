// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only snapshots of the tree for callers that render it, and a
//! structural consistency check.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Write as _;

use crate::error::{Result, TreeError};
use crate::node::{NodeFlags, NodeId};
use crate::tree_core::TreeCore;
use jt_core::{Job, JobId};

/// One node's job, relations and flags, detached from the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub job: Job,
    /// Logical parent; `None` for Home.
    pub parent: Option<JobId>,
    pub children: Vec<JobId>,
    pub real_child_jobs: Vec<JobId>,
    pub canvas_size_updates: Vec<JobId>,
    pub flags: NodeFlags,
}

pub(crate) fn node_view(core: &TreeCore, id: NodeId) -> Result<NodeView> {
    let node = core.node(id)?;
    let job = node.job().cloned().ok_or(TreeError::RootSentinel)?;
    let ids = |nodes: &[NodeId]| nodes.iter().filter_map(|&n| core.job_id_of(n).ok()).collect::<Vec<_>>();
    Ok(NodeView {
        job,
        parent: node.parent.and_then(|p| core.job_id_of(p).ok()),
        children: ids(&node.children),
        real_child_jobs: node.real_child_jobs.iter().cloned().collect(),
        canvas_size_updates: ids(&node.alternate_disp_sizes),
        flags: node.flags,
    })
}

/// Indented outline of the tree: one line per node with its branch flags.
///
/// Selection flags are left out so two trees with the same shape render
/// identically regardless of what is selected.
pub fn render(core: &TreeCore) -> String {
    let mut out = String::new();
    render_into(core, core.root(), 0, &mut out);
    out
}

fn render_into(core: &TreeCore, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = core.arena.get(id) else { return };
    if let Some(job) = node.job() {
        let mut marks = String::new();
        if node.flags.is_home {
            marks.push_str(" home");
        }
        if node.flags.is_active_alternate {
            marks.push_str(" active");
        }
        if node.flags.is_parked_alternate {
            marks.push_str(" parked");
        }
        if node.is_canvas_size_update() {
            marks.push_str(" csu");
        }
        let _ = writeln!(out, "{:indent$}{} {}{}", "", job.id, job.transform, marks, indent = depth * 2);
    }
    let depth = if node.flags.is_root { depth } else { depth + 1 };
    for &proxy in &node.alternate_disp_sizes {
        render_into(core, proxy, depth, out);
    }
    for &child in &node.children {
        render_into(core, child, depth, out);
    }
}

/// Verify the structural invariants, reporting the first violation.
pub(crate) fn check_invariants(core: &TreeCore) -> Result<()> {
    let fail = |msg: String| Err(TreeError::InvariantViolation(msg));
    let root = core.node(core.root())?;
    if root.job().is_some() || !root.flags.is_root {
        return fail("root sentinel holds a job".into());
    }
    if !root.real_child_jobs.is_empty() || !root.alternate_disp_sizes.is_empty() {
        return fail("root sentinel has real children or proxies".into());
    }
    if let Some(&first) = root.children.first() {
        if !core.node(first)?.flags.is_home {
            return fail("first child of the root is not home".into());
        }
    }

    check_children(core, core.root(), "the root")?;

    let reachable: HashSet<NodeId> = core.descendants(core.root()).into_iter().collect();
    let mut homes = 0;
    let mut seen: HashSet<JobId> = HashSet::new();
    let mut expected_real: BTreeMap<JobId, BTreeSet<JobId>> = BTreeMap::new();

    for (id, node) in core.arena.iter() {
        if id == core.root() {
            continue;
        }
        let Some(job) = node.job() else {
            return fail("non-root node without a job".into());
        };
        let name = &job.id;
        if !reachable.contains(&id) {
            return fail(format!("{name} is not reachable from the root"));
        }
        if !seen.insert(name.clone()) {
            return fail(format!("{name} appears twice"));
        }
        if node.flags.is_home {
            homes += 1;
        }
        let flags = node.flags;
        if flags.is_active_alternate && flags.is_parked_alternate {
            return fail(format!("{name} is both active and parked"));
        }
        if flags.is_active_alternate && node.children.is_empty() {
            return fail(format!("{name} is active with nothing parked under it"));
        }

        let Some(parent) = node.parent else {
            return fail(format!("{name} has no parent"));
        };
        let parent_node = core.node(parent)?;
        if node.is_canvas_size_update() {
            if !parent_node.alternate_disp_sizes.contains(&id) || parent_node.children.contains(&id) {
                return fail(format!("canvas size update {name} is not in its owner's side list"));
            }
            if !node.children.is_empty() || !node.alternate_disp_sizes.is_empty() {
                return fail(format!("canvas size update {name} has children"));
            }
        } else {
            if !parent_node.children.contains(&id) {
                return fail(format!("{name} is missing from its parent's children"));
            }
            if let Some(parent_id) = &job.parent_job_id {
                expected_real.entry(parent_id.clone()).or_default().insert(name.clone());
            }
        }
        if flags.is_parked_alternate && !parent_node.flags.is_active_alternate {
            return fail(format!("parked {name} is not under an active alternate"));
        }
        if parent_node.flags.is_active_alternate && !flags.is_parked_alternate && !node.is_canvas_size_update() {
            return fail(format!("{name} is under an active alternate without being parked"));
        }
        check_children(core, id, name.as_str())?;
    }
    if homes != usize::from(!root.children.is_empty()) {
        return fail(format!("expected exactly one home, found {homes}"));
    }

    for (_, node) in core.arena.iter() {
        let Some(job) = node.job() else { continue };
        let expected = expected_real.remove(&job.id).unwrap_or_default();
        if node.real_child_jobs != expected {
            return fail(format!("real children of {} are out of date", job.id));
        }
    }
    if let Some((parent, _)) = expected_real.into_iter().next() {
        return fail(format!("jobs name {parent} as parent but it is not in the tree"));
    }
    Ok(())
}

/// Children point back to `id` and are strictly ordered by job id.
fn check_children(core: &TreeCore, id: NodeId, name: &str) -> Result<()> {
    let mut previous: Option<&JobId> = None;
    for &child in &core.node(id)?.children {
        let child_node = core.node(child)?;
        if child_node.parent != Some(id) {
            return Err(TreeError::InvariantViolation(format!("child of {name} does not point back to it")));
        }
        let child_id = child_node.job_id().ok_or(TreeError::RootSentinel)?;
        if previous.is_some_and(|p| p >= child_id) {
            return Err(TreeError::InvariantViolation(format!("children of {name} are out of order")));
        }
        previous = Some(child_id);
    }
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
