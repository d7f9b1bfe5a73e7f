// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selection propagation: which nodes light up around the selected one.
//!
//! Collection reads the tree; application writes flags into an arena it
//! is handed. Neither reaches for tree state on its own.

use crate::config::SelectionMode;
use crate::error::{Result, TreeError};
use crate::node::{Arena, NodeId};
use crate::policy::Policy;
use crate::tree_core::TreeCore;

/// The nodes marked by selecting `selected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    pub selected: Option<NodeId>,
    pub parents: Vec<NodeId>,
    pub siblings: Vec<NodeId>,
    pub children: Vec<NodeId>,
}

pub fn collect<P: Policy + ?Sized>(
    core: &TreeCore,
    policy: &P,
    selected: NodeId,
    mode: SelectionMode,
) -> Result<SelectionSet> {
    let node = core.node(selected)?;
    let job = node.job().ok_or(TreeError::RootSentinel)?;
    if job.is_canvas_size_update() {
        return Err(TreeError::CanvasSizeUpdateUnsupported(job.id.clone()));
    }
    let real_children: Vec<NodeId> =
        node.real_child_jobs.iter().filter_map(|id| core.find_node_by_id(id, core.root())).collect();

    let set = match mode {
        SelectionMode::Real => {
            let parent = job.parent_job_id.as_ref().and_then(|p| core.find_node_by_id(p, core.root()));
            let siblings = match parent {
                Some(p) => core
                    .node(p)?
                    .real_child_jobs
                    .iter()
                    .filter(|&id| *id != job.id)
                    .filter_map(|id| core.find_node_by_id(id, core.root()))
                    .collect(),
                None => Vec::new(),
            };
            SelectionSet { selected: Some(selected), parents: parent.into_iter().collect(), siblings, children: real_children }
        }
        SelectionMode::Logical => {
            let parents = policy.previous(core, selected, true).into_iter().collect();
            let children = if real_children.is_empty() {
                policy.next(core, selected, false).into_iter().collect()
            } else {
                real_children
            };
            let siblings = if node.flags.is_active_alternate {
                node.children.clone()
            } else if node.flags.is_parked_alternate {
                match node.parent {
                    Some(active) => std::iter::once(active)
                        .chain(core.node(active)?.children.iter().copied().filter(|&c| c != selected))
                        .collect(),
                    None => Vec::new(),
                }
            } else {
                Vec::new()
            };
            SelectionSet { selected: Some(selected), parents, siblings, children }
        }
    };
    Ok(set)
}

/// Set (or clear, with `on == false`) the flags named by `set`.
pub fn apply(arena: &mut Arena, set: &SelectionSet, on: bool) {
    for &id in &set.parents {
        if let Some(node) = arena.get_mut(id) {
            node.flags.is_parent_of_selected = on;
        }
    }
    for &id in &set.siblings {
        if let Some(node) = arena.get_mut(id) {
            node.flags.is_sibling_of_selected = on;
        }
    }
    for &id in &set.children {
        if let Some(node) = arena.get_mut(id) {
            node.flags.is_child_of_selected = on;
        }
    }
    if let Some(node) = set.selected.and_then(|id| arena.get_mut(id)) {
        node.flags.is_selected = on;
    }
}

/// Clear all four selection flags on every node.
pub fn clear(arena: &mut Arena) {
    for (_, node) in arena.iter_mut() {
        node.flags.clear_selection();
    }
}

/// Recompute flags for the tree's current selection.
pub(crate) fn refresh<P: Policy + ?Sized>(core: &mut TreeCore, policy: &P, mode: SelectionMode) -> Result<()> {
    clear(&mut core.arena);
    let Some(selected) = core.selected else { return Ok(()) };
    if !core.arena.contains(selected) {
        core.selected = None;
        return Ok(());
    }
    let set = collect(core, policy, selected, mode)?;
    apply(&mut core.arena, &set, true);
    Ok(())
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
