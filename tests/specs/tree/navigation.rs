//! Navigation specs
//!
//! The cursor walks the outline top to bottom, entering forks through their
//! parked alternates, and stops at the ends without erroring.

use crate::prelude::*;

fn zoom_ladder() -> JobTree {
    let tree = History::home().pan(1, 0).zoom_in(2, 0).pan(3, 1).zoom_out(4, 1).pan(5, 3).tree();
    assert_eq!(trunk(&tree), vec![0, 1, 2, 3, 4, 5]);
    tree
}

#[test]
fn forward_and_back_one_job_at_a_time() {
    let tree = zoom_ladder();
    let mut seen = vec![current(&tree).unwrap()];
    while let Some(job) = tree.move_forward(false) {
        seen.push(num(&job.id));
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    assert!(!tree.can_go_forward());

    let mut back = Vec::new();
    while let Some(job) = tree.move_back(false) {
        back.push(num(&job.id));
    }
    assert_eq!(back, vec![4, 3, 2, 1, 0]);
    assert!(!tree.can_go_back());
}

#[test]
fn skipping_visits_branch_points_only() {
    let tree = zoom_ladder();
    assert_eq!(tree.move_forward(true).map(|j| num(&j.id)), Some(2));
    assert_eq!(tree.move_forward(true).map(|j| num(&j.id)), Some(4));
    assert_eq!(tree.move_forward(true), None);
    assert_eq!(current(&tree), Some(4));

    tree.set_current_job(&job_id(5)).unwrap();
    assert_eq!(peek_previous(&tree, true), Some(4));
    assert_eq!(peek_previous(&tree, false), Some(4));
    tree.set_current_job(&job_id(3)).unwrap();
    assert_eq!(peek_previous(&tree, true), Some(2));
}

#[test]
fn stacked_zooms_step_into_the_parked_one() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 1).tree();
    assert_eq!(trunk(&tree), vec![0, 2]);
    assert_eq!(children(&tree, 2), vec![1]);

    tree.set_current_job(&job_id(2)).unwrap();
    assert_eq!(tree.move_forward(false).map(|j| num(&j.id)), Some(1));
    assert_eq!(tree.move_forward(false), None);
    assert_eq!(tree.move_back(false).map(|j| num(&j.id)), Some(2));
    assert_eq!(tree.move_back(false).map(|j| num(&j.id)), Some(0));
}

#[test]
fn parked_lines_are_walkable_from_inside() {
    let tree = History::home().zoom_in(1, 0).pan(2, 1).zoom_in(3, 0).tree();
    assert_eq!(trunk(&tree), vec![0, 3]);
    assert_eq!(children(&tree, 3), vec![1, 2]);
    tree.set_current_job(&job_id(1)).unwrap();

    assert_eq!(tree.move_forward(false).map(|j| num(&j.id)), Some(2));
    assert_eq!(tree.move_back(false).map(|j| num(&j.id)), Some(1));
    assert_eq!(tree.move_back(false).map(|j| num(&j.id)), Some(3));
    assert_eq!(tree.move_back(false).map(|j| num(&j.id)), Some(0));
    assert_eq!(tree.move_forward(false).map(|j| num(&j.id)), Some(3));
    // The newest parked alternate is entered first.
    assert_eq!(tree.move_forward(false).map(|j| num(&j.id)), Some(2));
}

#[test]
fn navigation_never_lands_on_a_proxy() {
    let tree = History::home().pan(1, 0).resize(2, 1, CANVAS).pan(3, 1).tree();
    let mut seen = Vec::new();
    while let Some(job) = tree.move_forward(false) {
        assert!(!job.is_canvas_size_update());
        seen.push(num(&job.id));
    }
    assert_eq!(seen, vec![1, 3]);
}

#[test]
fn single_job_tree_has_nowhere_to_go() {
    let tree = History::home().tree();
    assert!(!tree.can_go_back() && !tree.can_go_forward());
    assert_eq!(tree.move_forward(true), None);
    assert_eq!(current(&tree), Some(0));
}
