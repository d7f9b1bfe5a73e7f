// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generic tree container: the root sentinel, the node arena and the
//! cursor, plus find/insert/move primitives that know nothing about
//! branch alternation.

use crate::error::{Result, TreeError};
use crate::node::{Arena, Node, NodeId};
use crate::path::Path;
use jt_core::{Job, JobId};

#[derive(Debug, Clone)]
pub struct TreeCore {
    pub(crate) arena: Arena,
    pub(crate) root: NodeId,
    pub(crate) current: Option<NodeId>,
    pub(crate) selected: Option<NodeId>,
    pub(crate) dirty: bool,
}

impl Default for TreeCore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeCore {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::root());
        Self { arena, root, current: None, selected: None, dirty: false }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.arena.get(id).ok_or(TreeError::StaleNode)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.arena.get_mut(id).ok_or(TreeError::StaleNode)
    }

    pub fn job_of(&self, id: NodeId) -> Result<&Job> {
        self.node(id)?.job().ok_or(TreeError::RootSentinel)
    }

    pub fn job_id_of(&self, id: NodeId) -> Result<JobId> {
        Ok(self.job_of(id)?.id.clone())
    }

    /// The Home node, if the tree has been populated.
    pub fn home(&self) -> Option<NodeId> {
        self.arena.get(self.root)?.children.first().copied()
    }

    /// Path from the root to `id`, found by walking parent links.
    pub fn path_to(&self, id: NodeId) -> Path {
        let mut terms = Vec::new();
        let mut at = Some(id);
        while let Some(node_id) = at {
            if node_id == self.root {
                break;
            }
            let Some(node) = self.arena.get(node_id) else { break };
            terms.push(node_id);
            at = node.parent;
        }
        terms.reverse();
        Path::from_terms(terms)
    }

    /// Depth-first search for a job below (and including) `scope`.
    ///
    /// Canvas-size proxies are searched as well as logical children.
    pub fn find_node_by_id(&self, id: &JobId, scope: NodeId) -> Option<NodeId> {
        let mut stack = vec![scope];
        while let Some(at) = stack.pop() {
            let Some(node) = self.arena.get(at) else { continue };
            if node.job_id() == Some(id) {
                return Some(at);
            }
            stack.extend(node.alternate_disp_sizes.iter().rev());
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Like [`TreeCore::find_node_by_id`], scoped by a path (the empty path
    /// searches from the root).
    pub fn find_path_by_id(&self, id: &JobId, scope: &Path) -> Option<Path> {
        let start = scope.node().unwrap_or(self.root);
        self.find_node_by_id(id, start).map(|found| self.path_to(found))
    }

    /// Resolve a job's parent id to a path.
    pub fn find_parent_path(&self, job: &Job, scope: &Path) -> Result<Path> {
        let parent = job.parent_job_id.as_ref().ok_or_else(|| TreeError::MissingParentId(job.id.clone()))?;
        let path = self.find_path_by_id(parent, scope).ok_or_else(|| TreeError::ParentNotFound {
            job: job.id.clone(),
            parent: parent.clone(),
        })?;
        let parent_node = path.node().ok_or(TreeError::RootSentinel)?;
        if self.node(parent_node)?.is_canvas_size_update() {
            return Err(TreeError::CanvasSizeUpdateUnsupported(parent.clone()));
        }
        Ok(path)
    }

    /// Create a node for `job` under `parent`, keeping children sorted.
    ///
    /// The first child of the root becomes Home; a child of an active
    /// alternate is parked.
    pub fn insert_child(&mut self, parent: NodeId, job: Job) -> Result<NodeId> {
        if job.is_canvas_size_update() {
            return Err(TreeError::CanvasSizeUpdateUnsupported(job.id));
        }
        let parent_node = self.node(parent)?;
        let is_home = parent_node.flags.is_root && parent_node.children.is_empty();
        let is_parked = parent_node.flags.is_active_alternate;

        let mut node = Node::new(job, parent);
        node.flags.is_home = is_home;
        node.flags.is_parked_alternate = is_parked;
        let child = self.arena.alloc(node);
        self.attach_sorted(parent, child)?;
        self.dirty = true;
        Ok(child)
    }

    /// Hang a canvas-size proxy off `owner`; it never joins `children`.
    pub fn insert_canvas_size_update(&mut self, owner: NodeId, job: Job) -> Result<NodeId> {
        if self.node(owner)?.flags.is_root {
            return Err(TreeError::RootSentinel);
        }
        let key = job.id.clone();
        let proxy = self.arena.alloc(Node::new(job, owner));
        let pos = {
            let proxies = &self.node(owner)?.alternate_disp_sizes;
            proxies.partition_point(|&p| self.arena.get(p).and_then(Node::job_id).is_some_and(|id| *id < key))
        };
        self.node_mut(owner)?.alternate_disp_sizes.insert(pos, proxy);
        self.dirty = true;
        Ok(proxy)
    }

    /// Re-parent `node` under `new_parent`. Flags are left untouched.
    pub fn move_node(&mut self, node: NodeId, new_parent: NodeId) -> Result<()> {
        self.detach(node)?;
        self.attach_sorted(new_parent, node)
    }

    /// Unlink `node` from its parent, returning the former parent.
    pub(crate) fn detach(&mut self, node: NodeId) -> Result<NodeId> {
        let parent = match self.node(node)?.parent {
            Some(parent) => parent,
            None => return Err(TreeError::NoParent(self.job_id_of(node)?)),
        };
        let parent_node = self.node_mut(parent)?;
        parent_node.children.retain(|&c| c != node);
        parent_node.alternate_disp_sizes.retain(|&c| c != node);
        self.node_mut(node)?.parent = None;
        Ok(parent)
    }

    pub(crate) fn attach_sorted(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let key = self.job_id_of(child)?;
        let pos = {
            let siblings = &self.node(parent)?.children;
            siblings.partition_point(|&s| self.arena.get(s).and_then(Node::job_id).is_some_and(|id| *id < key))
        };
        self.node_mut(parent)?.children.insert(pos, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Record `job` as a real child of `parent`; returns its position among them.
    pub fn add_real_child(&mut self, parent: NodeId, job: JobId) -> Result<usize> {
        let real = &mut self.node_mut(parent)?.real_child_jobs;
        let index = real.range::<JobId, _>(..&job).count();
        real.insert(job);
        Ok(index)
    }

    /// Position of `node` among its parent's logical children.
    pub fn position_in_parent(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.arena.get(node)?.parent?;
        let pos = self.arena.get(parent)?.children.iter().position(|&c| c == node)?;
        Some((parent, pos))
    }

    /// `node` and everything below it, proxies included, in depth-first order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(at) = stack.pop() {
            let Some(n) = self.arena.get(at) else { continue };
            out.push(at);
            stack.extend(n.children.iter().rev());
            stack.extend(n.alternate_disp_sizes.iter().rev());
        }
        out
    }

    /// Every job in depth-first logical order.
    pub fn jobs(&self) -> Vec<Job> {
        self.descendants(self.root)
            .into_iter()
            .filter_map(|id| self.arena.get(id).and_then(|n| n.job.clone()))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
#[path = "tree_core_tests.rs"]
mod tests;
