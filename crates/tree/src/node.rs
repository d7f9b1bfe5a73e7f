// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tree nodes and the arena that owns them.
//!
//! Nodes refer to each other by [`NodeId`] handles. A handle carries the
//! generation of its slot, so a handle kept across a removal is detected
//! as stale instead of silently naming whatever reused the slot.

use jt_core::{Job, JobId};
use std::collections::BTreeSet;

/// Handle to a node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Branch-state and selection-class flags of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFlags {
    pub is_root: bool,
    pub is_home: bool,
    pub is_active_alternate: bool,
    pub is_parked_alternate: bool,
    pub is_on_preferred_path: bool,
    pub is_selected: bool,
    pub is_parent_of_selected: bool,
    pub is_sibling_of_selected: bool,
    pub is_child_of_selected: bool,
}

impl NodeFlags {
    pub(crate) fn clear_selection(&mut self) {
        self.is_selected = false;
        self.is_parent_of_selected = false;
        self.is_sibling_of_selected = false;
        self.is_child_of_selected = false;
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// `None` only for the root sentinel.
    pub(crate) job: Option<Job>,
    pub(crate) parent: Option<NodeId>,
    /// Logical children, ordered by job id.
    pub(crate) children: Vec<NodeId>,
    /// Ids of the jobs naming this node's job as parent, wherever they sit.
    pub(crate) real_child_jobs: BTreeSet<JobId>,
    /// Canvas-size proxies; never part of `children`.
    pub(crate) alternate_disp_sizes: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            job: None,
            parent: None,
            children: Vec::new(),
            real_child_jobs: BTreeSet::new(),
            alternate_disp_sizes: Vec::new(),
            flags: NodeFlags { is_root: true, ..NodeFlags::default() },
        }
    }

    pub(crate) fn new(job: Job, parent: NodeId) -> Self {
        let flags = NodeFlags { is_on_preferred_path: job.is_on_preferred_path, ..NodeFlags::default() };
        Self {
            job: Some(job),
            parent: Some(parent),
            children: Vec::new(),
            real_child_jobs: BTreeSet::new(),
            alternate_disp_sizes: Vec::new(),
            flags,
        }
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job.as_ref().map(|j| &j.id)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn real_child_jobs(&self) -> &BTreeSet<JobId> {
        &self.real_child_jobs
    }

    pub fn alternate_disp_sizes(&self) -> &[NodeId] {
        &self.alternate_disp_sizes
    }

    pub fn flags(&self) -> &NodeFlags {
        &self.flags
    }

    pub fn is_canvas_size_update(&self) -> bool {
        self.job.as_ref().is_some_and(Job::is_canvas_size_update)
    }

    pub fn is_zoom(&self) -> bool {
        self.job.as_ref().is_some_and(|j| j.transform.is_zoom())
    }

    pub fn is_branch_defining(&self) -> bool {
        self.job.as_ref().is_some_and(|j| j.transform.is_branch_defining())
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Generational slot storage for nodes.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.node = Some(node);
                return NodeId { index, generation: slot.generation };
            }
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, node: Some(node) });
        NodeId { index, generation: 0 }
    }

    /// Release a slot, returning its node. Stale handles return `None`.
    pub fn free(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let id = NodeId { index: index as u32, generation: slot.generation };
            slot.node.as_ref().map(|node| (id, node))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let id = NodeId { index: index as u32, generation: slot.generation };
            slot.node.as_mut().map(|node| (id, node))
        })
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
