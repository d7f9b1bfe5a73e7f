//! Configuration specs
//!
//! Tree settings come from TOML and may be overridden by environment
//! variables.

use crate::prelude::*;
use serial_test::serial;

const MODE_VAR: &str = "JT_SELECTION_MODE";
const HOME_VAR: &str = "JT_REQUIRE_EXPLICIT_HOME";

fn clear_env() {
    std::env::remove_var(MODE_VAR);
    std::env::remove_var(HOME_VAR);
}

#[test]
fn toml_settings() {
    let config = TreeConfig::from_toml_str("selection_mode = \"real\"\nrequire_explicit_home = true\n").unwrap();
    assert_eq!(config.selection_mode, SelectionMode::Real);
    assert!(config.require_explicit_home);

    assert_eq!(TreeConfig::from_toml_str("").unwrap(), TreeConfig::default());
    assert!(matches!(TreeConfig::from_toml_str("colour = 1"), Err(TreeError::Config(_))));
}

#[test]
#[serial]
fn environment_overrides_file_settings() {
    clear_env();
    std::env::set_var(MODE_VAR, "REAL");
    std::env::set_var(HOME_VAR, "yes");
    let config = TreeConfig::from_toml_str("selection_mode = \"logical\"").unwrap().with_env_overrides();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.selection_mode, SelectionMode::Real);
    assert!(config.require_explicit_home);
}

#[test]
#[serial]
fn bad_environment_values_are_config_errors() {
    clear_env();
    std::env::set_var(MODE_VAR, "sideways");
    let err = TreeConfig::from_env().unwrap_err();
    clear_env();
    assert!(err.to_string().contains(MODE_VAR), "{err}");
}

#[test]
#[serial]
fn explicit_home_from_the_environment() {
    clear_env();
    std::env::set_var(HOME_VAR, "1");
    let config = TreeConfig::from_env();
    clear_env();

    // Job 0 is a parentless pan; job 1 is the real Home.
    let mut orphan = child_job(0, &id(0), TransformKind::Pan);
    orphan.parent_job_id = None;
    let jobs = vec![orphan, home_job(1), child_job(2, &id(1), TransformKind::ZoomIn)];

    let tree = JobTree::with_config(jobs, config.unwrap()).unwrap();
    assert_eq!(trunk(&tree), vec![1, 2]);
    tree.check_invariants().unwrap();
}
