// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor through the tree: the nodes from the root down to a target.
//!
//! The root itself is never a term, so the empty path denotes the root.

use crate::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    terms: Vec<NodeId>,
}

impl Path {
    /// The path denoting the root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: Vec<NodeId>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[NodeId] {
        &self.terms
    }

    /// The target node; `None` for the root path.
    pub fn node(&self) -> Option<NodeId> {
        self.terms.last().copied()
    }

    /// The target's logical parent, `None` if it is the root or a child of it.
    pub fn parent_node(&self) -> Option<NodeId> {
        self.terms.len().checked_sub(2).and_then(|i| self.terms.get(i)).copied()
    }

    /// Drop the last term.
    pub fn parent_path(&self) -> Self {
        let mut terms = self.terms.clone();
        terms.pop();
        Self { terms }
    }

    /// Append a term.
    pub fn combine(&self, node: NodeId) -> Self {
        let mut terms = self.terms.clone();
        terms.push(node);
        Self { terms }
    }

    /// Replace the last term (the root path just gains one).
    pub fn sibling_path(&self, node: NodeId) -> Self {
        self.parent_path().combine(node)
    }

    /// The scope a new sibling of the target would be inserted under.
    pub fn branch(&self) -> Self {
        self.parent_path()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.terms.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
