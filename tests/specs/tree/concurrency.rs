//! Concurrency specs
//!
//! The tree is shared across threads; every structural change is seen
//! whole or not at all.

use crate::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_readers_see_consistent_trees() {
    let tree = Arc::new(History::home().tree());
    let start = Arc::new(Barrier::new(5));

    let writer = {
        let (tree, start) = (Arc::clone(&tree), Arc::clone(&start));
        thread::spawn(move || {
            start.wait();
            for n in 1..=80 {
                let kind = match n % 4 {
                    0 => TransformKind::ZoomIn,
                    1 => TransformKind::ZoomOut,
                    _ => TransformKind::Pan,
                };
                tree.add(child_job(n, &id(n / 3), kind), n % 2 == 0).unwrap();
                if n % 10 == 0 {
                    let _ = tree.restore_branch(&job_id(n / 2));
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let (tree, start) = (Arc::clone(&tree), Arc::clone(&start));
            thread::spawn(move || {
                start.wait();
                for _ in 0..100 {
                    tree.check_invariants().unwrap();
                    let jobs = tree.jobs();
                    assert!(jobs.iter().any(|j| j.is_home()));
                    let _ = tree.move_back(true);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(tree.jobs().len(), 81);
    tree.check_invariants().unwrap();
}

#[test]
fn cursor_moves_from_many_threads_stay_on_the_tree() {
    let tree = Arc::new(History::home().pan(1, 0).zoom_in(2, 1).pan(3, 2).zoom_out(4, 3).tree());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for _ in 0..50 {
                    if i % 2 == 0 {
                        tree.move_forward(false);
                    } else {
                        tree.move_back(true);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let at = current(&tree).unwrap();
    assert!(at <= 4);
    assert!(tree.job(&job_id(at)).is_some());
}
