// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier, transform vocabulary and the job payload.

use crate::clock::Clock;
use crate::id::IdGen;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

crate::define_id! {
    /// Unique identifier for a job.
    ///
    /// Ids are minted by an [`IdGen`] so that lexical order is creation
    /// order. Every ordering decision in the history tree (sibling order,
    /// "most recent" alternate, navigation direction) is made on ids.
    #[derive(Default)]
    pub struct JobId;
}

/// The kind of view-state change a job records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    #[default]
    None,
    Home,
    ZoomIn,
    ZoomOut,
    Pan,
    IterationUpdate,
    ColorMapUpdate,
    CoordinatesUpdate,
    CanvasSizeUpdate,
}

crate::string_enum! {
    TransformKind {
        None => "none",
        Home => "home",
        ZoomIn => "zoom_in",
        ZoomOut => "zoom_out",
        Pan => "pan",
        IterationUpdate => "iteration_update",
        ColorMapUpdate => "color_map_update",
        CoordinatesUpdate => "coordinates_update",
        CanvasSizeUpdate => "canvas_size_update",
    }
}

impl TransformKind {
    /// Changes the zoom level; a job following one of these forks the line.
    pub fn is_zoom(&self) -> bool {
        matches!(self, TransformKind::ZoomIn | TransformKind::ZoomOut)
    }

    /// Home or a zoom: the granularity of "skip" navigation.
    pub fn is_branch_defining(&self) -> bool {
        matches!(self, TransformKind::Home | TransformKind::ZoomIn | TransformKind::ZoomOut)
    }

    pub fn is_canvas_size_update(&self) -> bool {
        matches!(self, TransformKind::CanvasSizeUpdate)
    }
}

/// Integer width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeInt {
    pub width: u32,
    pub height: u32,
}

impl SizeInt {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for SizeInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One recorded change to the view.
///
/// Equality, hashing and ordering consider the id only: two values with
/// the same id are the same job at different moments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// The job this one was derived from; `None` only for Home.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_job_id: Option<JobId>,
    pub transform: TransformKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub canvas_size: SizeInt,
    pub created_at_ms: u64,
    #[serde(default)]
    pub last_saved_ms: u64,
    #[serde(default)]
    pub last_updated_ms: u64,
    #[serde(default)]
    pub is_on_preferred_path: bool,
}

impl Job {
    pub fn new(
        id: JobId,
        parent_job_id: Option<JobId>,
        transform: TransformKind,
        canvas_size: SizeInt,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id,
            parent_job_id,
            transform,
            label: String::new(),
            canvas_size,
            created_at_ms,
            last_saved_ms: 0,
            last_updated_ms: created_at_ms,
            is_on_preferred_path: false,
        }
    }

    /// The root of a history.
    pub fn new_home(id: JobId, canvas_size: SizeInt, created_at_ms: u64) -> Self {
        Self::new(id, None, TransformKind::Home, canvas_size, created_at_ms)
    }

    /// A job derived from `parent`, inheriting its canvas size.
    pub fn child_of(parent: &Job, id: JobId, transform: TransformKind, created_at_ms: u64) -> Self {
        Self::new(id, Some(parent.id.clone()), transform, parent.canvas_size, created_at_ms)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_home(&self) -> bool {
        self.transform == TransformKind::Home
    }

    pub fn is_canvas_size_update(&self) -> bool {
        self.transform.is_canvas_size_update()
    }

    /// Modified since it was last saved.
    pub fn is_dirty(&self) -> bool {
        self.last_updated_ms > self.last_saved_ms
    }

    pub fn touch(&mut self, now_ms: u64) {
        self.last_updated_ms = now_ms;
    }

    pub fn mark_saved(&mut self, now_ms: u64) {
        self.last_saved_ms = now_ms.max(self.last_updated_ms);
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Job {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// Mints jobs with fresh ids and current timestamps.
#[derive(Clone)]
pub struct JobFactory<G: IdGen, C: Clock> {
    id_gen: G,
    clock: C,
}

impl<G: IdGen, C: Clock> JobFactory<G, C> {
    pub fn new(id_gen: G, clock: C) -> Self {
        Self { id_gen, clock }
    }

    pub fn home(&self, canvas_size: SizeInt) -> Job {
        Job::new_home(self.id_gen.next(), canvas_size, self.clock.epoch_ms())
    }

    pub fn child(&self, parent: &Job, transform: TransformKind) -> Job {
        Job::child_of(parent, self.id_gen.next(), transform, self.clock.epoch_ms())
    }

    /// A canvas-size proxy hanging off `parent`.
    pub fn canvas_size_update(&self, parent: &Job, canvas_size: SizeInt) -> Job {
        let mut job = self.child(parent, TransformKind::CanvasSizeUpdate);
        job.canvas_size = canvas_size;
        job
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = "job-0001",
            label: String = "",
        }
        set {
            transform: TransformKind = TransformKind::Pan,
            canvas_size: SizeInt = SizeInt::new(1024, 768),
            created_at_ms: u64 = 1_000_000,
            is_on_preferred_path: bool = false,
        }
        option {
            parent_job_id: JobId,
        }
    }
    finish(b) {
        let mut job = Job::new(b.id, b.parent_job_id, b.transform, b.canvas_size, b.created_at_ms);
        job.label = b.label;
        job.is_on_preferred_path = b.is_on_preferred_path;
        job
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
