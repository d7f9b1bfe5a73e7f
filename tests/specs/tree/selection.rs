//! Selection specs
//!
//! Selecting a job marks its parents, siblings and children, either by
//! parent ids or by the layout currently on screen.

use crate::prelude::*;

fn marked(tree: &JobTree, n: usize) -> &'static str {
    let f = flags(tree, n);
    match (f.is_selected, f.is_parent_of_selected, f.is_sibling_of_selected, f.is_child_of_selected) {
        (true, ..) => "selected",
        (_, true, ..) => "parent",
        (_, _, true, _) => "sibling",
        (.., true) => "child",
        _ => "",
    }
}

fn marks(tree: &JobTree, upto: usize) -> Vec<&'static str> {
    (0..=upto).map(|n| marked(tree, n)).collect()
}

#[test]
fn logical_mode_is_the_default() {
    // 1 and 2 are parked under 4; 2 carries 3.
    let tree = History::home().zoom_in(1, 0).pan(2, 1).pan(3, 2).zoom_in(4, 0).tree();
    tree.set_selected(Some(&job_id(2))).unwrap();
    assert_eq!(marks(&tree, 4), vec!["", "parent", "selected", "child", "sibling"]);
}

#[test]
fn real_mode_follows_parent_ids() {
    let tree = History::home().pan(1, 0).pan(2, 1).pan(3, 0).tree();
    tree.set_selection_mode(SelectionMode::Real).unwrap();
    tree.set_selected(Some(&job_id(1))).unwrap();
    assert_eq!(marks(&tree, 3), vec!["parent", "selected", "child", "sibling"]);

    tree.set_selection_mode(SelectionMode::Logical).unwrap();
    assert_eq!(marks(&tree, 3), vec!["parent", "selected", "child", ""]);
}

#[test]
fn configured_mode_applies_from_the_start() {
    let jobs = History::home().pan(1, 0).pan(2, 0).jobs();
    let tree = JobTree::with_config(jobs, TreeConfig::default().selection_mode(SelectionMode::Real)).unwrap();
    tree.set_selected(Some(&job_id(2))).unwrap();
    assert_eq!(marks(&tree, 2), vec!["parent", "sibling", "selected"]);
}

#[test]
fn clearing_the_selection_clears_every_mark() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 0).tree();
    tree.set_selected(Some(&job_id(2))).unwrap();
    assert_eq!(marks(&tree, 2), vec!["parent", "sibling", "selected"]);

    tree.set_selected(None).unwrap();
    assert_eq!(marks(&tree, 2), vec!["", "", ""]);
    assert_eq!(tree.selected_job(), None);
}

#[test]
fn marks_follow_structural_changes() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 0).tree();
    tree.set_selected(Some(&job_id(1))).unwrap();
    tree.restore_branch(&job_id(1)).unwrap();
    // 1 is now active with 2 parked under it.
    assert_eq!(marks(&tree, 2), vec!["parent", "selected", "sibling"]);
}

#[test]
fn selecting_unknown_or_proxy_jobs_fails() {
    let tree = History::home().resize(1, 0, CANVAS).tree();
    assert_eq!(tree.set_selected(Some(&job_id(9))).unwrap_err(), TreeError::JobNotFound(job_id(9)));
    assert_eq!(
        tree.set_selected(Some(&job_id(1))).unwrap_err(),
        TreeError::CanvasSizeUpdateUnsupported(job_id(1))
    );
    assert_eq!(tree.selected_job(), None);
}
