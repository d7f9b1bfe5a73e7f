// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by tree construction and structural operations.
//!
//! Absence at a navigation boundary is never an error; those operations
//! return `Option`. Everything here means the job set or the call was
//! inconsistent and the operation was abandoned.

use jt_core::JobId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("parent {parent} of job {job} is not in the tree")]
    ParentNotFound { job: JobId, parent: JobId },

    #[error("job {0} is not in the tree")]
    JobNotFound(JobId),

    #[error("job {0} is not a parked alternate")]
    NotParkedAlternate(JobId),

    #[error("job {0} is not an active alternate")]
    NotActiveAlternate(JobId),

    #[error("job {0} has no parent node")]
    NoParent(JobId),

    #[error("operation not supported on canvas size update job {0}")]
    CanvasSizeUpdateUnsupported(JobId),

    #[error("the home job {0} cannot be removed")]
    HomeRemoval(JobId),

    #[error("the root of the tree has no job")]
    RootSentinel,

    #[error("the path is empty")]
    EmptyPath,

    #[error("node handle is stale")]
    StaleNode,

    #[error("cannot build a tree from an empty job list")]
    EmptyJobList,

    #[error("no job with transform kind home was found")]
    NoHomeJob,

    #[error("job {0} has no parent job id")]
    MissingParentId(JobId),

    #[error("job {0} is already in the tree")]
    DuplicateJob(JobId),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
