//! Alternation specs
//!
//! Jobs diverging right after a zoom fork the line; the newest alternate
//! is shown and the others are parked until restored.

use crate::prelude::*;

#[test]
fn newer_zoom_wins_the_fork() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 0).tree();

    assert_eq!(trunk(&tree), vec![0, 2]);
    assert_eq!(children(&tree, 2), vec![1]);
    assert!(flags(&tree, 2).is_active_alternate);
    assert!(flags(&tree, 1).is_parked_alternate);
    assert_eq!(peek_next(&tree, false), Some(2));
}

#[test]
fn zoom_into_a_zoom_forks_at_its_parent() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 1).tree();

    assert_eq!(trunk(&tree), vec![0, 2]);
    assert_eq!(children(&tree, 2), vec![1]);
    assert_eq!(real_children(&tree, 1), vec![2]);
    assert!(flags(&tree, 2).is_active_alternate);
    assert!(flags(&tree, 1).is_parked_alternate);

    tree.restore_branch(&job_id(1)).unwrap();
    assert_eq!(trunk(&tree), vec![0, 1]);
    assert_eq!(children(&tree, 1), vec![2]);
}

#[test]
fn restoring_the_older_zoom_swaps_the_alternates() {
    let tree = History::home().zoom_in(1, 0).zoom_in(2, 0).tree();
    tree.restore_branch(&job_id(1)).unwrap();

    assert_eq!(trunk(&tree), vec![0, 1]);
    assert_eq!(children(&tree, 1), vec![2]);
    assert!(flags(&tree, 1).is_active_alternate);
    assert!(flags(&tree, 2).is_parked_alternate);
    assert_eq!(peek_next(&tree, false), Some(1));
    assert!(tree.is_dirty());
    tree.check_invariants().unwrap();
}

#[test]
fn pans_stay_on_the_trunk() {
    let tree = History::home().pan(1, 0).pan(2, 1).tree();

    assert_eq!(trunk(&tree), vec![0, 1, 2]);
    assert_eq!(real_children(&tree, 0), vec![1]);
    assert_eq!(real_children(&tree, 1), vec![2]);
    for n in 0..3 {
        let f = flags(&tree, n);
        assert!(!f.is_active_alternate && !f.is_parked_alternate, "job {n}");
    }
}

#[test]
fn canvas_size_updates_hang_off_their_owner() {
    let small = SizeInt::new(512, 384);
    let tree = History::home().pan(1, 0).pan(2, 1).resize(3, 1, small).tree();

    assert_eq!(trunk(&tree), vec![0, 1, 2]);
    assert!(children(&tree, 1).is_empty());
    assert_eq!(real_children(&tree, 1), vec![2]);
    assert_eq!(nums(&tree.node_view(&job_id(1)).unwrap().canvas_size_updates), vec![3]);

    let owner = tree.job(&job_id(1)).unwrap();
    let proxy = tree.try_get_canvas_size_update_proxy(&owner, small).unwrap().unwrap();
    assert_eq!(num(&proxy.id), 3);

    tree.set_current_job(&job_id(1)).unwrap();
    assert_eq!(peek_next(&tree, false), Some(2));
    tree.set_current_job(&job_id(2)).unwrap();
    assert_eq!(peek_previous(&tree, false), Some(1));
}

#[test]
fn parked_lines_carry_their_followers() {
    let tree = History::home().zoom_in(1, 0).pan(2, 1).pan(3, 2).tree();
    tree.add(child_job(4, &id(0), TransformKind::ZoomOut), true).unwrap();

    assert_eq!(trunk(&tree), vec![0, 4]);
    assert_eq!(children(&tree, 4), vec![1, 2]);
    assert_eq!(children(&tree, 2), vec![3]);

    tree.restore_branch(&job_id(3)).unwrap();
    assert_eq!(trunk(&tree), vec![0, 2, 3]);
    assert_eq!(children(&tree, 2), vec![1, 4]);
    tree.check_invariants().unwrap();
}

#[test]
fn restoring_a_proxy_restores_its_owner() {
    let tree = History::home().zoom_in(1, 0).resize(2, 1, CANVAS).zoom_in(3, 0).tree();
    assert_eq!(trunk(&tree), vec![0, 3]);

    tree.restore_branch(&job_id(2)).unwrap();
    assert_eq!(trunk(&tree), vec![0, 1]);
}

#[test]
fn preferred_path_survives_alternation() {
    let tree = History::home().zoom_in(1, 0).pan(2, 1).pan(3, 2).zoom_in(4, 0).tree();
    tree.make_preferred(&job_id(3)).unwrap();
    tree.restore_branch(&job_id(3)).unwrap();

    assert_eq!(trunk(&tree), vec![0, 2, 3]);
    for n in [2, 3] {
        assert!(tree.job(&job_id(n)).unwrap().is_on_preferred_path, "job {n}");
    }
    for n in [0, 1] {
        assert!(!tree.job(&job_id(n)).unwrap().is_on_preferred_path, "job {n}");
    }
}

#[yare::parameterized(
    pan = { TransformKind::Pan },
    zoom_in = { TransformKind::ZoomIn },
    color_map = { TransformKind::ColorMapUpdate },
)]
fn any_kind_forks_after_a_zoom(kind: TransformKind) {
    let tree = History::home().zoom_out(1, 0).job(2, 0, kind).tree();
    assert_eq!(trunk(&tree), vec![0, 2]);
    assert_eq!(children(&tree, 2), vec![1]);
}

#[test]
fn home_and_its_built_shape_do_not_depend_on_input_order() {
    let history = History::home().zoom_in(1, 0).pan(2, 1).zoom_in(3, 0).pan(4, 3).zoom_out(5, 2);
    let forward = JobTree::new(history.clone().jobs(), false).unwrap();
    let mut jobs = history.jobs();
    jobs.reverse();
    let backward = JobTree::new(jobs, false).unwrap();

    similar_asserts::assert_eq!(forward.render(), backward.render());
    assert_eq!(current(&backward), Some(0));
}
