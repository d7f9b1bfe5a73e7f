//! Removal specs
//!
//! Removing a branch takes its logical subtree and every job descending
//! from a removed job, and never strands a fork without an active line.

use crate::prelude::*;

#[test]
fn removing_an_active_alternate_brings_back_the_parked_line() {
    let tree = History::home().zoom_in(1, 0).pan(2, 1).zoom_in(3, 0).tree();
    assert_eq!(trunk(&tree), vec![0, 3]);

    let path = tree.path_of(&job_id(3)).unwrap();
    let cursor = tree.remove_branch(&path).unwrap();

    // The newest parked alternate takes over the fork and the cursor.
    assert_eq!(nums(&tree.path_job_ids(&cursor).unwrap()), vec![2]);
    assert_eq!(trunk(&tree), vec![0, 2]);
    assert_eq!(children(&tree, 2), vec![1]);
    assert!(flags(&tree, 2).is_active_alternate);
    assert!(flags(&tree, 1).is_parked_alternate);
    assert_eq!(real_children(&tree, 0), vec![1]);
    assert_eq!(tree.job(&job_id(3)), None);
    tree.check_invariants().unwrap();
}

#[test]
fn newest_parked_alternate_takes_over() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 0).zoom_in(3, 0).tree();
    assert_eq!(children(&tree, 3), vec![1, 2]);

    assert!(tree.remove_branch_by_id(&job_id(3)).unwrap());
    assert_eq!(trunk(&tree), vec![0, 2]);
    assert_eq!(children(&tree, 2), vec![1]);
    assert!(flags(&tree, 2).is_active_alternate);
    tree.check_invariants().unwrap();
}

#[test]
fn removing_a_parked_line_removes_its_followers() {
    // 1 and 2 are parked under 4; 2 descends from 1 and carries 3.
    let tree = History::home().zoom_in(1, 0).pan(2, 1).pan(3, 2).zoom_in(4, 0).tree();
    assert_eq!(children(&tree, 2), vec![3]);
    assert!(tree.remove_branch_by_id(&job_id(1)).unwrap());

    assert_eq!(tree.jobs().iter().map(|j| num(&j.id)).collect::<Vec<_>>(), vec![0, 4]);
    assert!(!flags(&tree, 4).is_active_alternate);
    tree.check_invariants().unwrap();
}

#[test]
fn removing_the_current_job_keeps_a_valid_cursor() {
    // 3 sits beside 2 on the trunk but names it as parent.
    let tree = History::home().pan(1, 0).pan(2, 1).pan(3, 2).tree();
    tree.set_current_job(&job_id(3)).unwrap();
    tree.remove_branch_by_id(&job_id(2)).unwrap();

    assert_eq!(trunk(&tree), vec![0, 1]);
    assert_eq!(current(&tree), Some(1));
}

#[test]
fn removing_a_canvas_size_update_keeps_the_owner() {
    let tree = History::home().pan(1, 0).resize(2, 1, CANVAS).tree();
    assert!(tree.remove_branch_by_id(&job_id(2)).unwrap());

    assert!(tree.node_view(&job_id(1)).unwrap().canvas_size_updates.is_empty());
    assert_eq!(trunk(&tree), vec![0, 1]);
    assert_eq!(current(&tree), Some(1));
}

#[test]
fn home_stays() {
    let tree = History::home().pan(1, 0).tree();
    let err = tree.remove_branch_by_id(&job_id(0)).unwrap_err();
    assert_eq!(err, TreeError::HomeRemoval(job_id(0)));
    assert_eq!(trunk(&tree), vec![0, 1]);
    assert!(!tree.is_dirty());
}

#[test]
fn unknown_jobs_are_reported_not_raised() {
    let tree = History::home().tree();
    assert!(!tree.remove_branch_by_id(&job_id(5)).unwrap());
}
