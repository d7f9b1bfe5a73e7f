// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single forward/backward steps through the tree.
//!
//! A forward step enters the node's preferred child, else moves to the next
//! sibling, else jumps to one of the node's real children. A backward step
//! moves to the previous sibling, else up to the parent. Every step lands
//! strictly later (next) or earlier (previous) in depth-first order, so
//! repeated stepping always reaches a boundary.

use std::collections::HashMap;

use crate::node::{Node, NodeId};
use crate::tree_core::TreeCore;

/// Canvas-size proxies navigate as their owner.
fn anchor(core: &TreeCore, from: NodeId) -> Option<NodeId> {
    let node = core.arena.get(from)?;
    if node.is_canvas_size_update() {
        node.parent
    } else {
        Some(from)
    }
}

/// Position of every node in a depth-first walk from the root.
pub(crate) fn depth_first_order(core: &TreeCore) -> HashMap<NodeId, usize> {
    core.descendants(core.root).into_iter().enumerate().map(|(pos, id)| (id, pos)).collect()
}

/// The child a forward step enters: for an active alternate the parked
/// alternate on the preferred path, else the newest one; for a parked
/// alternate its first follower.
pub(crate) fn preferred_child(core: &TreeCore, node: &Node) -> Option<NodeId> {
    if node.flags.is_active_alternate {
        node.children
            .iter()
            .copied()
            .find(|&c| core.arena.get(c).is_some_and(|c| c.flags.is_on_preferred_path))
            .or_else(|| node.children.last().copied())
    } else {
        node.children.first().copied()
    }
}

pub(crate) fn step_next(core: &TreeCore, from: NodeId) -> Option<NodeId> {
    let from = anchor(core, from)?;
    let node = core.arena.get(from)?;
    if let Some(child) = preferred_child(core, node) {
        return Some(child);
    }
    let sibling = core
        .position_in_parent(from)
        .and_then(|(parent, pos)| core.arena.get(parent)?.children.get(pos + 1).copied());
    sibling.or_else(|| real_child_fallback(core, from, node))
}

/// A real child placed further on: the preferred one, else the newest.
fn real_child_fallback(core: &TreeCore, from: NodeId, node: &Node) -> Option<NodeId> {
    let order = depth_first_order(core);
    let at = *order.get(&from)?;
    node.real_child_jobs
        .iter()
        .filter_map(|id| core.find_node_by_id(id, core.root))
        .filter(|n| order.get(n).is_some_and(|&pos| pos > at))
        .filter_map(|n| core.arena.get(n).map(|child| (n, child)))
        .max_by(|(_, a), (_, b)| {
            (a.flags.is_on_preferred_path, a.job_id()).cmp(&(b.flags.is_on_preferred_path, b.job_id()))
        })
        .map(|(n, _)| n)
}

pub(crate) fn step_previous(core: &TreeCore, from: NodeId) -> Option<NodeId> {
    let from = anchor(core, from)?;
    let (parent, pos) = core.position_in_parent(from)?;
    let parent_node = core.arena.get(parent)?;
    match pos.checked_sub(1) {
        Some(prev) => parent_node.children.get(prev).copied(),
        None if parent_node.flags.is_root => None,
        None => Some(parent),
    }
}

#[cfg(test)]
#[path = "navigate_tests.rs"]
mod tests;
