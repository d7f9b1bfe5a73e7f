// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch alternation: placing new jobs, swapping parked and active
//! alternates, and removing branches without breaking either.
//!
//! A line is a run of siblings ordered by job id. The trunk is the root's
//! line. A job that follows a zoom forks there: the zoom becomes the
//! *active alternate* of that fork, the job joins the competitors *parked*
//! beneath it and is then swapped in, since new jobs win. A parked
//! alternate stores the rest of its line (its followers) as its own
//! children, so swapping the two carries each line along with its
//! alternate.

use std::collections::HashSet;

use crate::error::{Result, TreeError};
use crate::node::NodeId;
use crate::path::Path;
use crate::tree_core::TreeCore;
use jt_core::{Job, JobId};

pub(crate) fn insert_at_parent(core: &mut TreeCore, job: Job, parent_path: &Path) -> Result<Path> {
    let parent = parent_path.node().ok_or(TreeError::RootSentinel)?;
    let job_id = job.id.clone();

    let index = core.node(parent)?.real_child_jobs.range::<JobId, _>(..&job_id).count();
    let preceding = match index.checked_sub(1) {
        None => first_child_predecessor(core, parent)?,
        Some(prev) => preceding_sibling(core, parent, parent_path, prev)?,
    };

    let node = if core.node(preceding)?.is_zoom() {
        add_as_parked_alternate(core, preceding, job)?
    } else {
        let container = line_container(core, preceding)?;
        core.insert_child(container, job)?
    };
    core.add_real_child(parent, job_id)?;
    Ok(core.path_to(node))
}

/// A parent's first real child follows the parent's logical parent, or the
/// parent itself when it sits directly under the root.
fn first_child_predecessor(core: &TreeCore, parent: NodeId) -> Result<NodeId> {
    match core.node(parent)?.parent {
        Some(up) if up != core.root => Ok(up),
        _ => Ok(parent),
    }
}

/// The node of the real sibling at `index` among `parent`'s real children.
fn preceding_sibling(core: &TreeCore, parent: NodeId, parent_path: &Path, index: usize) -> Result<NodeId> {
    let id = core
        .node(parent)?
        .real_child_jobs
        .iter()
        .nth(index)
        .cloned()
        .ok_or_else(|| TreeError::InvariantViolation(format!("real child {index} missing")))?;
    core.find_path_by_id(&id, &parent_path.branch())
        .and_then(|p| p.node())
        .or_else(|| core.find_node_by_id(&id, core.root()))
        .ok_or(TreeError::JobNotFound(id))
}

/// The node whose children form the line a job continues after `preceding`.
///
/// A parked alternate's line is the one its active alternate sits on.
fn line_container(core: &TreeCore, preceding: NodeId) -> Result<NodeId> {
    let node = core.node(preceding)?;
    let line_node = if node.flags.is_parked_alternate {
        node.parent.ok_or_else(|| TreeError::NoParent(core.job_id_of(preceding).unwrap_or_default()))?
    } else {
        preceding
    };
    let line_id = core.job_id_of(line_node)?;
    core.node(line_node)?.parent.ok_or(TreeError::NoParent(line_id))
}

fn add_as_parked_alternate(core: &mut TreeCore, preceding: NodeId, job: Job) -> Result<NodeId> {
    let flags = core.node(preceding)?.flags;
    let active = if flags.is_active_alternate {
        preceding
    } else if flags.is_parked_alternate {
        let parent = core
            .node(preceding)?
            .parent
            .ok_or_else(|| TreeError::NoParent(core.job_id_of(preceding).unwrap_or_default()))?;
        if !core.node(parent)?.flags.is_active_alternate {
            return Err(TreeError::NotActiveAlternate(core.job_id_of(parent)?));
        }
        parent
    } else {
        core.node_mut(preceding)?.flags.is_active_alternate = true;
        preceding
    };

    let node = core.insert_child(active, job)?;
    let path = core.path_to(node);
    make_branch_active(core, &path)?;
    Ok(node)
}

pub(crate) fn make_branch_active(core: &mut TreeCore, path: &Path) -> Result<Path> {
    let parked = path.node().ok_or(TreeError::EmptyPath)?;
    let parked_id = core.job_id_of(parked)?;
    let parked_node = core.node(parked)?;
    if parked_node.is_canvas_size_update() {
        return Err(TreeError::CanvasSizeUpdateUnsupported(parked_id));
    }
    if !parked_node.flags.is_parked_alternate {
        return Err(TreeError::NotParkedAlternate(parked_id));
    }
    let active = parked_node.parent.ok_or_else(|| TreeError::NoParent(parked_id.clone()))?;
    let active_id = core.job_id_of(active)?;
    let active_node = core.node(active)?;
    if !active_node.flags.is_active_alternate {
        return Err(TreeError::NotActiveAlternate(active_id));
    }
    let container = active_node.parent.ok_or_else(|| TreeError::NoParent(active_id.clone()))?;
    let followers = parked_node.children.clone();

    switch_alt_branches(core, parked, active)?;

    core.attach_sorted(container, parked)?;
    for follower in followers {
        core.move_node(follower, container)?;
    }
    core.dirty = true;
    tracing::debug!(active = %parked_id, parked = %active_id, "switched alternate branches");
    Ok(core.path_to(parked))
}

/// Swap roles: `active` and its other parked siblings move under `parked`,
/// and the line following `active` is stored under it.
///
/// Leaves `parked` detached; the caller attaches it to the container.
fn switch_alt_branches(core: &mut TreeCore, parked: NodeId, active: NodeId) -> Result<()> {
    let parked_flags = core.node(parked)?.flags;
    if !parked_flags.is_parked_alternate {
        return Err(TreeError::NotParkedAlternate(core.job_id_of(parked)?));
    }
    if !core.node(active)?.flags.is_active_alternate {
        return Err(TreeError::NotActiveAlternate(core.job_id_of(active)?));
    }
    let (container, pos) = core
        .position_in_parent(active)
        .ok_or_else(|| TreeError::NoParent(core.job_id_of(active).unwrap_or_default()))?;
    let trailing: Vec<NodeId> = core.node(container)?.children.iter().skip(pos + 1).copied().collect();

    core.detach(parked)?;
    core.move_node(active, parked)?;
    let others = core.node(active)?.children.clone();
    for other in others {
        core.move_node(other, parked)?;
    }

    let flags = &mut core.node_mut(active)?.flags;
    flags.is_active_alternate = false;
    flags.is_parked_alternate = true;
    let flags = &mut core.node_mut(parked)?.flags;
    flags.is_active_alternate = true;
    flags.is_parked_alternate = false;

    for node in trailing {
        core.move_node(node, active)?;
    }
    Ok(())
}

pub(crate) fn remove_branch(core: &mut TreeCore, path: &Path) -> Result<Path> {
    let target = path.node().ok_or(TreeError::EmptyPath)?;
    let target_id = core.job_id_of(target)?;
    let node = core.node(target)?;
    if node.flags.is_home {
        return Err(TreeError::HomeRemoval(target_id));
    }

    if node.is_canvas_size_update() {
        let owner = core.detach(target)?;
        core.arena.free(target);
        core.current = Some(owner);
        if core.selected == Some(target) {
            core.selected = None;
        }
        core.dirty = true;
        tracing::debug!(job = %target_id, "removed canvas size update");
        return Ok(core.path_to(owner));
    }

    let new_current = if node.flags.is_active_alternate && !node.children.is_empty() {
        // Most recent parked alternate takes over the fork.
        let successor = node.children.iter().copied().max_by_key(|&c| core.job_id_of(c).unwrap_or_default());
        let successor = successor.ok_or_else(|| TreeError::NotActiveAlternate(target_id.clone()))?;
        let successor_path = core.path_to(successor);
        make_branch_active(core, &successor_path)?;
        successor
    } else if node.flags.is_parked_alternate {
        node.parent.ok_or_else(|| TreeError::NoParent(target_id.clone()))?
    } else {
        let (parent, pos) = core.position_in_parent(target).ok_or_else(|| TreeError::NoParent(target_id.clone()))?;
        match pos.checked_sub(1) {
            Some(prev) => core.node(parent)?.children.get(prev).copied().unwrap_or(parent),
            None => parent,
        }
    };

    let doomed = removal_closure(core, target);
    unlink(core, &doomed)?;

    let fallback = core.home().unwrap_or(core.root);
    let new_current = if doomed.contains(&new_current) || new_current == core.root { fallback } else { new_current };
    core.current = Some(new_current);
    if core.selected.is_some_and(|s| doomed.contains(&s)) {
        core.selected = None;
    }
    core.dirty = true;
    tracing::debug!(job = %target_id, removed = doomed.len(), "removed branch");
    Ok(core.path_to(new_current))
}

/// `target`'s logical subtree plus every job descending from a removed job.
fn removal_closure(core: &TreeCore, target: NodeId) -> HashSet<NodeId> {
    let mut doomed: HashSet<NodeId> = core.descendants(target).into_iter().collect();
    let mut doomed_ids: HashSet<JobId> = doomed.iter().filter_map(|&n| core.job_id_of(n).ok()).collect();
    loop {
        let extra: Vec<NodeId> = core
            .arena
            .iter()
            .filter(|(id, node)| {
                !doomed.contains(id)
                    && node.job().and_then(|j| j.parent_job_id.as_ref()).is_some_and(|p| doomed_ids.contains(p))
            })
            .map(|(id, _)| id)
            .collect();
        if extra.is_empty() {
            return doomed;
        }
        for root in extra {
            for id in core.descendants(root) {
                if doomed.insert(id) {
                    if let Ok(job_id) = core.job_id_of(id) {
                        doomed_ids.insert(job_id);
                    }
                }
            }
        }
    }
}

fn unlink(core: &mut TreeCore, doomed: &HashSet<NodeId>) -> Result<()> {
    for &id in doomed {
        let node = core.node(id)?;
        let Some(job) = node.job() else { continue };
        let job_id = job.id.clone();
        if let Some(parent_id) = job.parent_job_id.clone() {
            if let Some(real_parent) = core.find_node_by_id(&parent_id, core.root) {
                if !doomed.contains(&real_parent) {
                    core.node_mut(real_parent)?.real_child_jobs.remove(&job_id);
                }
            }
        }
        if let Some(parent) = core.node(id)?.parent {
            if !doomed.contains(&parent) {
                core.detach(id)?;
            }
        }
    }
    for &id in doomed {
        core.arena.free(id);
    }
    // An alternate left with nothing parked under it is plain again.
    for (_, node) in core.arena.iter_mut() {
        if node.flags.is_active_alternate && node.children.is_empty() {
            node.flags.is_active_alternate = false;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "alternate_tests.rs"]
mod tests;
