// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tree configuration: selection propagation and Home selection.

use crate::env;
use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};

/// How selecting a node marks its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Follow parent job ids only.
    Real,
    /// Follow the tree as it is currently laid out.
    #[default]
    Logical,
}

jt_core::string_enum! {
    SelectionMode {
        Real => "real",
        Logical => "logical",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    pub selection_mode: SelectionMode,
    /// Home must be a job of kind Home rather than the oldest job.
    pub require_explicit_home: bool,
}

impl TreeConfig {
    jt_core::setters! {
        set {
            selection_mode: SelectionMode,
            require_explicit_home: bool,
        }
    }

    /// Parse a TOML document, e.g. `selection_mode = "real"`.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TreeError::Config(e.to_string()))
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `JT_SELECTION_MODE` and `JT_REQUIRE_EXPLICIT_HOME` when set.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(mode) = env::selection_mode() {
            self.selection_mode = mode.parse().map_err(|e: jt_core::ParseEnumError| {
                TreeError::Config(format!("{}: {}", env::SELECTION_MODE_VAR, e))
            })?;
        }
        if let Some(flag) = env::require_explicit_home() {
            self.require_explicit_home = parse_flag(&flag).ok_or_else(|| {
                TreeError::Config(format!(
                    "{}: expected a boolean, got {:?}",
                    env::REQUIRE_EXPLICIT_HOME_VAR,
                    flag
                ))
            })?;
        }
        Ok(self)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
