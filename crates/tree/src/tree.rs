// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`JobTree`]: the thread-safe history tree callers hold.

use crate::build;
use crate::config::{SelectionMode, TreeConfig};
use crate::error::{Result, TreeError};
use crate::lock::TreeLock;
use crate::node::NodeId;
use crate::path::Path;
use crate::policy::{AlternatingPolicy, Policy};
use crate::selection;
use crate::tree_core::TreeCore;
use crate::view::{self, NodeView};
use jt_core::{Job, JobId, SizeInt};

#[derive(Debug)]
struct TreeState {
    core: TreeCore,
    config: TreeConfig,
}

/// History of jobs with branch alternation, cursor and selection.
///
/// Every structural change takes the write lock for its whole duration,
/// so readers see the tree either before or after it.
pub struct JobTree<P: Policy = AlternatingPolicy> {
    policy: P,
    state: TreeLock<TreeState>,
}

impl JobTree<AlternatingPolicy> {
    /// Build from an unordered job list.
    ///
    /// With `require_explicit_home`, Home is the first job of kind Home;
    /// otherwise it is the oldest job.
    pub fn new(jobs: Vec<Job>, require_explicit_home: bool) -> Result<Self> {
        Self::with_config(jobs, TreeConfig::default().require_explicit_home(require_explicit_home))
    }

    pub fn with_config(jobs: Vec<Job>, config: TreeConfig) -> Result<Self> {
        Self::with_policy(AlternatingPolicy, jobs, config)
    }
}

impl<P: Policy> JobTree<P> {
    pub fn with_policy(policy: P, jobs: Vec<Job>, config: TreeConfig) -> Result<Self> {
        let core = build::build(&policy, jobs, config.require_explicit_home)?;
        Ok(Self { policy, state: TreeLock::new(TreeState { core, config }) })
    }

    pub fn config(&self) -> TreeConfig {
        self.state.read(|s| s.config.clone())
    }

    fn read<R>(&self, f: impl FnOnce(&TreeCore) -> R) -> R {
        self.state.read(|s| f(&s.core))
    }

    /// Run a structural change, then recompute selection flags.
    ///
    /// The change runs on a staged copy that replaces the tree only once
    /// everything succeeded; a failure leaves the tree untouched.
    fn mutate<R>(&self, f: impl FnOnce(&P, &mut TreeCore) -> Result<R>) -> Result<R> {
        self.state.write(|s| {
            let mut staged = s.core.clone();
            let out = f(&self.policy, &mut staged)?;
            selection::refresh(&mut staged, &self.policy, s.config.selection_mode)?;
            s.core = staged;
            Ok(out)
        })
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Insert a new job; with `select_after_add` the cursor moves to it.
    pub fn add(&self, job: Job, select_after_add: bool) -> Result<Path> {
        let id = job.id.clone();
        let path = self.mutate(|policy, core| {
            let path = policy.insert(core, job)?;
            if select_after_add {
                core.current = path.node();
            }
            Ok(path)
        })?;
        tracing::debug!(job = %id, depth = path.len(), "added job");
        Ok(path)
    }

    /// Remove the node at the end of `path` and everything hanging off it.
    /// Returns the new cursor.
    pub fn remove_branch(&self, path: &Path) -> Result<Path> {
        self.mutate(|policy, core| policy.remove_branch(core, path))
    }

    /// Like [`JobTree::remove_branch`]; `Ok(false)` if the job is unknown.
    pub fn remove_branch_by_id(&self, id: &JobId) -> Result<bool> {
        self.mutate(|policy, core| match core.find_path_by_id(id, &Path::root()) {
            Some(path) => policy.remove_branch(core, &path).map(|_| true),
            None => Ok(false),
        })
    }

    /// Activate the nearest parked alternate at or above `id` (repeating
    /// outward until the job is on an active line). Returns the job's path.
    pub fn restore_branch(&self, id: &JobId) -> Result<Path> {
        self.state.upgradable(|guard| {
            let node = guard.core.find_node_by_id(id, guard.core.root()).ok_or_else(|| TreeError::JobNotFound(id.clone()))?;
            if nearest_parked(&guard.core, node).is_none() {
                return Err(TreeError::NotParkedAlternate(id.clone()));
            }
            let mut staged = guard.core.clone();
            while let Some(parked) = nearest_parked(&staged, node) {
                let path = staged.path_to(parked);
                self.policy.make_branch_active(&mut staged, &path)?;
            }
            selection::refresh(&mut staged, &self.policy, guard.config.selection_mode)?;
            let path = staged.path_to(node);
            guard.upgrade().core = staged;
            Ok(path)
        })
    }

    pub fn restore_branch_path(&self, path: &Path) -> Result<Path> {
        let id = self.read(|core| core.job_id_of(path.node().ok_or(TreeError::EmptyPath)?))?;
        self.restore_branch(&id)
    }

    /// Mark root→`id` as the preferred path, resetting any previous one.
    pub fn make_preferred(&self, id: &JobId) -> Result<()> {
        self.mutate(|_, core| {
            let node = core.find_node_by_id(id, core.root()).ok_or_else(|| TreeError::JobNotFound(id.clone()))?;
            set_preferred(core, Some(node))
        })
    }

    pub fn make_preferred_path(&self, path: &Path) -> Result<()> {
        self.mutate(|_, core| set_preferred(core, Some(path.node().ok_or(TreeError::EmptyPath)?)))
    }

    pub fn clear_preferred(&self) -> Result<()> {
        self.mutate(|_, core| set_preferred(core, None))
    }

    // ── Cursor and navigation ───────────────────────────────────────────

    pub fn current_job(&self) -> Option<Job> {
        self.read(|core| core.current.and_then(|c| core.job_of(c).ok().cloned()))
    }

    pub fn current_path(&self) -> Path {
        self.read(|core| core.current.map(|c| core.path_to(c)).unwrap_or_default())
    }

    pub fn set_current_job(&self, id: &JobId) -> Result<()> {
        self.state.upgradable(|guard| {
            let node = guard.core.find_node_by_id(id, guard.core.root()).ok_or_else(|| TreeError::JobNotFound(id.clone()))?;
            if guard.core.current != Some(node) {
                guard.upgrade().core.current = Some(node);
            }
            Ok(())
        })
    }

    /// The job after the cursor, without moving it.
    pub fn try_get_next_job(&self, skip_non_branch: bool) -> Option<Job> {
        self.read(|core| {
            let to = self.policy.next(core, core.current?, skip_non_branch)?;
            core.job_of(to).ok().cloned()
        })
    }

    /// The job before the cursor, without moving it.
    pub fn try_get_previous_job(&self, skip_non_branch: bool) -> Option<Job> {
        self.read(|core| {
            let to = self.policy.previous(core, core.current?, skip_non_branch)?;
            core.job_of(to).ok().cloned()
        })
    }

    /// Step the cursor forward; `None` (cursor unchanged) at the end.
    pub fn move_forward(&self, skip_non_branch: bool) -> Option<Job> {
        self.step_cursor(|policy, core, at| policy.next(core, at, skip_non_branch))
    }

    pub fn move_back(&self, skip_non_branch: bool) -> Option<Job> {
        self.step_cursor(|policy, core, at| policy.previous(core, at, skip_non_branch))
    }

    fn step_cursor(&self, step: impl Fn(&P, &TreeCore, NodeId) -> Option<NodeId>) -> Option<Job> {
        self.state.upgradable(|guard| {
            let to = step(&self.policy, &guard.core, guard.core.current?)?;
            let job = guard.core.job_of(to).ok().cloned()?;
            guard.upgrade().core.current = Some(to);
            Some(job)
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.try_get_previous_job(false).is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.try_get_next_job(false).is_some()
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// The job `job` names as its parent.
    pub fn parent_job(&self, job: &Job) -> Option<Job> {
        let parent = job.parent_job_id.as_ref()?;
        self.job(parent)
    }

    /// The canvas-size proxy of `job` for `canvas_size`.
    ///
    /// For a canvas-size job the lookup happens on the job it hangs off.
    pub fn try_get_canvas_size_update_proxy(&self, job: &Job, canvas_size: SizeInt) -> Result<Option<Job>> {
        let owner_id = if job.is_canvas_size_update() {
            job.parent_job_id.as_ref().ok_or_else(|| TreeError::MissingParentId(job.id.clone()))?
        } else {
            &job.id
        };
        Ok(self.state.upgradable(|guard| {
            let core = &guard.core;
            let owner = core.find_node_by_id(owner_id, core.root())?;
            core.node(owner)
                .ok()?
                .alternate_disp_sizes()
                .iter()
                .filter_map(|&p| core.job_of(p).ok())
                .find(|proxy| proxy.canvas_size == canvas_size)
                .cloned()
        }))
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.read(TreeCore::jobs)
    }

    pub fn job(&self, id: &JobId) -> Option<Job> {
        self.read(|core| core.find_node_by_id(id, core.root()).and_then(|n| core.job_of(n).ok().cloned()))
    }

    pub fn path_of(&self, id: &JobId) -> Option<Path> {
        self.read(|core| core.find_path_by_id(id, &Path::root()))
    }

    /// The job and its logical subtree, proxies included.
    pub fn job_and_descendants(&self, id: &JobId) -> Vec<Job> {
        self.read(|core| {
            let Some(node) = core.find_node_by_id(id, core.root()) else { return Vec::new() };
            core.descendants(node).into_iter().filter_map(|n| core.job_of(n).ok().cloned()).collect()
        })
    }

    pub fn node_view(&self, id: &JobId) -> Result<NodeView> {
        self.read(|core| {
            let node = core.find_node_by_id(id, core.root()).ok_or_else(|| TreeError::JobNotFound(id.clone()))?;
            view::node_view(core, node)
        })
    }

    /// Ids of the root's children: the visible line from Home on.
    pub fn trunk(&self) -> Vec<JobId> {
        self.read(|core| {
            core.node(core.root())
                .map(|root| root.children().iter().filter_map(|&c| core.job_id_of(c).ok()).collect())
                .unwrap_or_default()
        })
    }

    /// Ids of the logical children of `id`.
    pub fn children_of(&self, id: &JobId) -> Result<Vec<JobId>> {
        Ok(self.node_view(id)?.children)
    }

    pub fn real_child_ids(&self, id: &JobId) -> Result<Vec<JobId>> {
        Ok(self.node_view(id)?.real_child_jobs)
    }

    /// Job ids along `path`.
    pub fn path_job_ids(&self, path: &Path) -> Result<Vec<JobId>> {
        self.read(|core| path.terms().iter().map(|&n| core.job_id_of(n)).collect())
    }

    /// Indented outline of the tree's shape.
    pub fn render(&self) -> String {
        self.read(view::render)
    }

    // ── Selection ───────────────────────────────────────────────────────

    pub fn selected_job(&self) -> Option<Job> {
        self.read(|core| core.selected.and_then(|s| core.job_of(s).ok().cloned()))
    }

    /// Select a job (or clear the selection) and propagate the flags.
    pub fn set_selected(&self, id: Option<&JobId>) -> Result<()> {
        self.state.write(|s| {
            let node = match id {
                Some(id) => Some(
                    s.core.find_node_by_id(id, s.core.root()).ok_or_else(|| TreeError::JobNotFound(id.clone()))?,
                ),
                None => None,
            };
            if let Some(node) = node {
                if s.core.node(node)?.is_canvas_size_update() {
                    return Err(TreeError::CanvasSizeUpdateUnsupported(s.core.job_id_of(node)?));
                }
            }
            s.core.selected = node;
            selection::refresh(&mut s.core, &self.policy, s.config.selection_mode)
        })
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.state.read(|s| s.config.selection_mode)
    }

    pub fn set_selection_mode(&self, mode: SelectionMode) -> Result<()> {
        self.state.write(|s| {
            s.config.selection_mode = mode;
            selection::refresh(&mut s.core, &self.policy, mode)
        })
    }

    // ── Dirty state and diagnostics ─────────────────────────────────────

    /// The structure changed since construction or the last [`JobTree::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.read(TreeCore::is_dirty)
    }

    pub fn mark_clean(&self) {
        self.state.write(|s| s.core.mark_clean());
    }

    pub fn any_job_is_dirty(&self) -> bool {
        self.read(|core| core.arena.iter().any(|(_, n)| n.job().is_some_and(Job::is_dirty)))
    }

    /// Verify the structural invariants of the tree.
    pub fn check_invariants(&self) -> Result<()> {
        self.read(view::check_invariants)
    }
}

/// The closest parked alternate on the way from `node` to the root.
fn nearest_parked(core: &TreeCore, node: NodeId) -> Option<NodeId> {
    core.path_to(node)
        .terms()
        .iter()
        .rev()
        .copied()
        .find(|&n| core.node(n).is_ok_and(|n| n.flags().is_parked_alternate))
}

fn set_preferred(core: &mut TreeCore, target: Option<NodeId>) -> Result<()> {
    let path = target.map(|t| core.path_to(t)).unwrap_or_default();
    for (id, node) in core.arena.iter_mut() {
        let on = path.contains(id);
        node.flags.is_on_preferred_path = on;
        if let Some(job) = node.job.as_mut() {
            job.is_on_preferred_path = on;
        }
    }
    core.dirty = true;
    Ok(())
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
