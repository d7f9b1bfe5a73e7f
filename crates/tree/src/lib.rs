// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jt-tree: an in-memory job history tree with branch alternation.
//!
//! Jobs are inserted in creation order. A job that diverges right after a
//! zoom forks the line: the newest alternate becomes active and shows on
//! the trunk while the others are parked beneath it, each carrying the
//! rest of its line. [`JobTree`] wraps the structure in a reader/writer
//! lock and adds a cursor, navigation and selection propagation.

mod alternate;
mod build;
pub mod config;
mod env;
pub mod error;
pub mod lock;
mod navigate;
pub mod node;
pub mod path;
pub mod policy;
pub mod selection;
pub mod tree;
pub mod tree_core;
pub mod view;

pub use config::{SelectionMode, TreeConfig};
pub use error::{Result, TreeError};
pub use lock::TreeLock;
pub use node::{Arena, Node, NodeFlags, NodeId};
pub use path::Path;
pub use policy::{AlternatingPolicy, Policy};
pub use selection::SelectionSet;
pub use tree::JobTree;
pub use tree_core::TreeCore;
pub use view::NodeView;

#[cfg(test)]
mod test_helpers;
