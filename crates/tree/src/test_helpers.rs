// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders and accessors shared by the unit tests.

use crate::build;
use crate::node::{NodeFlags, NodeId};
use crate::policy::AlternatingPolicy;
use crate::tree_core::TreeCore;
use jt_core::test_support::{child_job, home_job, id, job_id};
use jt_core::{Job, TransformKind};

pub(crate) use TransformKind::{Pan, ZoomIn, ZoomOut};

/// Home (job 0) followed by `(n, parent, kind)` jobs.
pub(crate) fn history(steps: &[(usize, usize, TransformKind)]) -> Vec<Job> {
    let mut jobs = vec![home_job(0)];
    jobs.extend(steps.iter().map(|&(n, parent, kind)| child_job(n, &id(parent), kind)));
    jobs
}

pub(crate) fn tree_of(steps: &[(usize, usize, TransformKind)]) -> TreeCore {
    build::build(&AlternatingPolicy, history(steps), false).unwrap()
}

pub(crate) fn node(core: &TreeCore, n: usize) -> NodeId {
    core.find_node_by_id(&job_id(n), core.root()).unwrap_or_else(|| panic!("job {n} not in tree"))
}

/// Job number of a node (`job-0007` → 7).
pub(crate) fn num(core: &TreeCore, node: NodeId) -> usize {
    let id = core.job_id_of(node).unwrap();
    id.as_str().trim_start_matches("job-").parse().unwrap()
}

pub(crate) fn nums(core: &TreeCore, nodes: &[NodeId]) -> Vec<usize> {
    nodes.iter().map(|&n| num(core, n)).collect()
}

pub(crate) fn trunk(core: &TreeCore) -> Vec<usize> {
    nums(core, core.node(core.root()).unwrap().children())
}

pub(crate) fn kids(core: &TreeCore, n: usize) -> Vec<usize> {
    nums(core, core.node(node(core, n)).unwrap().children())
}

pub(crate) fn real(core: &TreeCore, n: usize) -> Vec<usize> {
    core.node(node(core, n))
        .unwrap()
        .real_child_jobs()
        .iter()
        .map(|id| id.as_str().trim_start_matches("job-").parse().unwrap())
        .collect()
}

pub(crate) fn flags(core: &TreeCore, n: usize) -> NodeFlags {
    *core.node(node(core, n)).unwrap().flags()
}

pub(crate) fn is_active(core: &TreeCore, n: usize) -> bool {
    flags(core, n).is_active_alternate
}

pub(crate) fn is_parked(core: &TreeCore, n: usize) -> bool {
    flags(core, n).is_parked_alternate
}
