// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Building a tree from an unordered job list.

use std::collections::HashSet;

use crate::error::{Result, TreeError};
use crate::policy::Policy;
use crate::tree_core::TreeCore;
use crate::view;
use jt_core::{Job, JobId};

/// Pick Home, then insert every job reachable from it in id order.
pub(crate) fn build<P: Policy + ?Sized>(policy: &P, mut jobs: Vec<Job>, require_explicit_home: bool) -> Result<TreeCore> {
    if jobs.is_empty() {
        return Err(TreeError::EmptyJobList);
    }
    jobs.sort();
    let before = jobs.len();
    jobs.dedup_by(|a, b| a.id == b.id);
    if jobs.len() != before {
        tracing::warn!(duplicates = before - jobs.len(), "ignoring jobs with duplicate ids");
    }
    tracing::debug!(jobs = jobs.len(), report = %input_report(&jobs), "building job tree");

    let parentless = jobs.iter().filter(|j| j.parent_job_id.is_none() && !j.is_canvas_size_update()).count();
    if parentless > 1 {
        tracing::warn!(parentless, "found more than one job with no parent");
    }

    let home_index = if require_explicit_home {
        jobs.iter().position(Job::is_home).ok_or(TreeError::NoHomeJob)?
    } else {
        0
    };
    let mut home = jobs.remove(home_index);
    if let Some(parent) = home.parent_job_id.take() {
        tracing::warn!(home = %home.id, %parent, "home job had a parent id; clearing it");
    }
    if !home.is_home() {
        tracing::warn!(home = %home.id, transform = %home.transform, "home job is not of kind home");
    }

    let mut reachable: HashSet<JobId> = HashSet::from([home.id.clone()]);
    let mut pending: Vec<Job> = Vec::with_capacity(jobs.len());
    let mut skipped = 0usize;
    // Parents sort before their children, so one pass settles reachability.
    for job in jobs {
        match &job.parent_job_id {
            Some(parent) if reachable.contains(parent) => {
                if !job.is_canvas_size_update() {
                    reachable.insert(job.id.clone());
                }
                pending.push(job);
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(
            skipped,
            inserted = pending.len() + 1,
            total = pending.len() + 1 + skipped,
            "some jobs are not reachable from home"
        );
    }

    let mut core = TreeCore::new();
    let home_node = core.insert_child(core.root(), home)?;
    for job in pending {
        policy.insert(&mut core, job)?;
    }
    core.current = Some(home_node);
    core.dirty = false;
    tracing::debug!(nodes = core.arena.len() - 1, report = %view::render(&core), "built job tree");
    Ok(core)
}

fn input_report(jobs: &[Job]) -> String {
    jobs.iter()
        .map(|j| match &j.parent_job_id {
            Some(p) => format!("{} <- {} ({})", j.id, p, j.transform),
            None => format!("{} ({})", j.id, j.transform),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
