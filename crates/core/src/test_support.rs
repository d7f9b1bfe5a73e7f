// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{FakeClock, Job, JobFactory, JobId, SequentialIdGen, SizeInt, TransformKind};

/// Canvas size used by every helper job.
pub const CANVAS: SizeInt = SizeInt::new(1024, 768);

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job histories.
pub mod strategies {
    use super::{canvas_update_job, child_job, home_job, job_id};
    use crate::{Job, SizeInt, TransformKind};
    use proptest::prelude::*;
    use proptest::sample::Index;

    pub fn arb_transform_kind() -> impl Strategy<Value = TransformKind> {
        proptest::sample::select(TransformKind::ALL)
    }

    /// Kinds a non-Home job can carry.
    pub fn arb_child_kind() -> impl Strategy<Value = TransformKind> {
        prop_oneof![
            4 => Just(TransformKind::Pan),
            3 => Just(TransformKind::ZoomIn),
            2 => Just(TransformKind::ZoomOut),
            1 => Just(TransformKind::IterationUpdate),
            1 => Just(TransformKind::ColorMapUpdate),
            1 => Just(TransformKind::CoordinatesUpdate),
            1 => Just(TransformKind::CanvasSizeUpdate),
        ]
    }

    /// A valid history in creation order: a Home job followed by up to
    /// `max_len` jobs, each naming an earlier non-canvas-size job as parent.
    pub fn arb_history(max_len: usize) -> impl Strategy<Value = Vec<Job>> {
        prop::collection::vec((any::<Index>(), arb_child_kind(), 1u32..4), 0..=max_len).prop_map(
            |steps| {
                let mut jobs = vec![home_job(0)];
                let mut parents = vec![job_id(0)];
                for (i, (pick, kind, scale)) in steps.into_iter().enumerate() {
                    let n = i + 1;
                    let parent = parents[pick.index(parents.len())].clone();
                    if kind.is_canvas_size_update() {
                        let size = SizeInt::new(256 * scale, 192 * scale);
                        jobs.push(canvas_update_job(n, parent.as_str(), size));
                    } else {
                        parents.push(job_id(n));
                        jobs.push(child_job(n, parent.as_str(), kind));
                    }
                }
                jobs
            },
        )
    }
}

// ── Job factory functions ───────────────────────────────────────────────

/// Zero-padded so that id order is numeric order.
pub fn job_id(n: usize) -> JobId {
    JobId::new(format!("job-{:04}", n))
}

pub fn home_job(n: usize) -> Job {
    Job::new_home(job_id(n), CANVAS, n as u64)
}

/// Job `n` of the given kind whose parent is the job with id `parent`.
pub fn child_job(n: usize, parent: &str, transform: TransformKind) -> Job {
    Job::new(job_id(n), Some(JobId::new(parent)), transform, CANVAS, n as u64)
}

pub fn canvas_update_job(n: usize, parent: &str, size: SizeInt) -> Job {
    Job::new(job_id(n), Some(JobId::new(parent)), TransformKind::CanvasSizeUpdate, size, n as u64)
}

/// Shorthand for `job_id(n).to_string()`, for use as a `parent` argument.
pub fn id(n: usize) -> String {
    job_id(n).to_string()
}

// ── Minted jobs ─────────────────────────────────────────────────────────

/// Mints jobs the way an editing session does: ids `job-000001`,
/// `job-000002`, ... stamped by a clock that moves 10ms per job.
pub fn session_factory() -> JobFactory<SequentialIdGen, FakeClock> {
    JobFactory::new(SequentialIdGen::new("job"), FakeClock::stepping(1_000_000, 10))
}
