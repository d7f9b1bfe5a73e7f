// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The seam between the generic [`TreeCore`] and the rules deciding where
//! jobs attach and how the cursor moves.

use crate::alternate;
use crate::error::{Result, TreeError};
use crate::navigate;
use crate::node::{Node, NodeId};
use crate::path::Path;
use crate::tree_core::TreeCore;
use jt_core::Job;

/// Insertion and navigation rules layered on a [`TreeCore`].
///
/// Implementations must keep children sorted, keep real-child sets exact
/// and make every navigation step move strictly forward or backward in
/// depth-first order.
pub trait Policy: Send + Sync {
    /// Place `job` given the path to its real parent.
    fn insert_at_parent(&self, core: &mut TreeCore, job: Job, parent_path: &Path) -> Result<Path>;

    /// Promote the parked alternate at the end of `path`.
    fn make_branch_active(&self, core: &mut TreeCore, path: &Path) -> Result<Path>;

    /// Unlink the node at the end of `path`; returns the new cursor.
    fn remove_branch(&self, core: &mut TreeCore, path: &Path) -> Result<Path>;

    fn step_next(&self, core: &TreeCore, from: NodeId) -> Option<NodeId>;

    fn step_previous(&self, core: &TreeCore, from: NodeId) -> Option<NodeId>;

    /// Insert a job that is not Home.
    fn insert(&self, core: &mut TreeCore, job: Job) -> Result<Path> {
        if core.find_node_by_id(&job.id, core.root()).is_some() {
            return Err(TreeError::DuplicateJob(job.id));
        }
        let parent_path = core.find_parent_path(&job, &Path::root())?;
        if job.is_canvas_size_update() {
            let owner = parent_path.node().ok_or(TreeError::RootSentinel)?;
            let proxy = core.insert_canvas_size_update(owner, job)?;
            return Ok(core.path_to(proxy));
        }
        self.insert_at_parent(core, job, &parent_path)
    }

    /// Step forward, optionally past jobs that are not branch-defining.
    fn next(&self, core: &TreeCore, from: NodeId, skip_non_branch: bool) -> Option<NodeId> {
        walk(core, from, skip_non_branch, |at| self.step_next(core, at))
    }

    fn previous(&self, core: &TreeCore, from: NodeId, skip_non_branch: bool) -> Option<NodeId> {
        walk(core, from, skip_non_branch, |at| self.step_previous(core, at))
    }
}

fn walk(
    core: &TreeCore,
    from: NodeId,
    skip_non_branch: bool,
    step: impl Fn(NodeId) -> Option<NodeId>,
) -> Option<NodeId> {
    let mut at = from;
    loop {
        at = step(at)?;
        if !skip_non_branch || core.arena.get(at).is_some_and(Node::is_branch_defining) {
            return Some(at);
        }
    }
}

/// New jobs win: a job that diverges after a zoom becomes the active line
/// and the line it diverged from is parked beneath it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternatingPolicy;

impl Policy for AlternatingPolicy {
    fn insert_at_parent(&self, core: &mut TreeCore, job: Job, parent_path: &Path) -> Result<Path> {
        alternate::insert_at_parent(core, job, parent_path)
    }

    fn make_branch_active(&self, core: &mut TreeCore, path: &Path) -> Result<Path> {
        alternate::make_branch_active(core, path)
    }

    fn remove_branch(&self, core: &mut TreeCore, path: &Path) -> Result<Path> {
        alternate::remove_branch(core, path)
    }

    fn step_next(&self, core: &TreeCore, from: NodeId) -> Option<NodeId> {
        navigate::step_next(core, from)
    }

    fn step_previous(&self, core: &TreeCore, from: NodeId) -> Option<NodeId> {
        navigate::step_previous(core, from)
    }
}
