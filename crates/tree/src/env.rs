// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the tree crate.

pub const SELECTION_MODE_VAR: &str = "JT_SELECTION_MODE";
pub const REQUIRE_EXPLICIT_HOME_VAR: &str = "JT_REQUIRE_EXPLICIT_HOME";

/// Selection propagation override (`real` or `logical`)
pub fn selection_mode() -> Option<String> {
    std::env::var(SELECTION_MODE_VAR).ok().filter(|s| !s.trim().is_empty())
}

/// Home selection override (`1`/`true`/`0`/`false`)
pub fn require_explicit_home() -> Option<String> {
    std::env::var(REQUIRE_EXPLICIT_HOME_VAR).ok().filter(|s| !s.trim().is_empty())
}
