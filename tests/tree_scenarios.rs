//! Scenario tests for the public API.
//!
//! Each test walks one documented behavior end to end through the crate's
//! re-exports: rank selection, absent-key removal, duplicate handling,
//! contention accounting and the sequence adapters.

use std::thread;
use std::time::Duration;

use rank_avl::{
    run_sequence_workload, BusyTime, ConfigError, LockedQueue, LockedStack, LockedVector, OpMix,
    OrderStatisticsTree, WorkloadConfig,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn tree_of(keys: &[i64]) -> OrderStatisticsTree<i64> {
    let tree = OrderStatisticsTree::new();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn scenario_select_round_trip() {
    let tree = tree_of(&[5, 10, 1, 7]);

    assert_eq!(tree.select(1), Some(1));
    assert_eq!(tree.select(2), Some(5));
    assert_eq!(tree.select(3), Some(7));
    assert_eq!(tree.select(4), Some(10));
}

#[test]
fn scenario_select_boundaries() {
    for size in [1usize, 2, 17, 300] {
        let keys: Vec<i64> = (0..size as i64).collect();
        let tree = tree_of(&keys);

        assert!(tree.select(0).is_none());
        assert!(tree.select(size + 1).is_none());
        assert_eq!(tree.select(size), Some(size as i64 - 1));
    }
}

#[test]
fn scenario_remove_then_query() {
    let tree = tree_of(&[5, 10, 1, 7]);

    tree.remove(5);

    assert!(!tree.contains(5));
    assert!(tree.contains(7));
    assert_eq!(tree.select(2), Some(7));
    assert_eq!(tree.to_vec(), vec![1, 7, 10]);
}

#[test]
fn scenario_remove_absent_twice() {
    let tree = tree_of(&[3, 8, 13, 21]);

    assert!(tree.remove(8));
    assert!(!tree.contains(8));
    let after_first = (tree.to_vec(), tree.fingerprint());

    assert!(!tree.remove(8));
    assert_eq!((tree.to_vec(), tree.fingerprint()), after_first);
    tree.validate().unwrap();
}

#[test]
fn scenario_duplicates_are_a_multiset() {
    let tree = tree_of(&[4, 4, 2, 4, 6]);

    assert_eq!(tree.len(), 5);
    assert_eq!(tree.to_vec(), vec![2, 4, 4, 4, 6]);

    assert!(tree.remove(4));
    assert_eq!(tree.to_vec(), vec![2, 4, 4, 6]);
    assert!(tree.contains(4));
    tree.validate().unwrap();
}

#[test]
fn scenario_random_ops_match_sorted_model() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let tree = OrderStatisticsTree::new();
    let mut model: Vec<i64> = Vec::new();

    for step in 0..20_000 {
        let key = rng.gen_range(-500..500i64);
        if rng.gen_bool(0.55) {
            tree.insert(key);
            let pos = model.partition_point(|&k| k <= key);
            model.insert(pos, key);
        } else if let Ok(pos) = model.binary_search(&key) {
            assert!(tree.remove(key));
            model.remove(pos);
        } else {
            assert!(!tree.remove(key));
        }

        if step % 1_000 == 0 {
            tree.validate().unwrap();
        }
    }

    tree.validate().unwrap();
    assert_eq!(tree.to_vec(), model);
    for (i, key) in model.iter().enumerate() {
        assert_eq!(tree.select(i + 1).as_ref(), Some(key));
    }
}

// ============================================================================
// Accounting
// ============================================================================

#[test]
fn scenario_work_keyed_by_thread() {
    let tree = OrderStatisticsTree::new();

    let ids: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..3i64)
            .map(|t| {
                let tree = &tree;
                s.spawn(move || {
                    tree.insert(t);
                    tree.contains(t);
                    tree.select(1);
                    thread::current().id()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let work = tree.work_by_thread();
    assert_eq!(work.len(), 3);
    for id in ids {
        assert!(work.contains_key(&id));
    }
    assert_eq!(tree.total_work(), work.values().sum::<Duration>());

    tree.reset_work();
    assert!(tree.work_by_thread().is_empty());
}

// ============================================================================
// Sequence Adapters
// ============================================================================

#[test]
fn scenario_adapters_share_accounting_contract() {
    fn exercise(structure: &dyn BusyTime) -> usize {
        structure.work_by_thread().len()
    }

    let stack = LockedStack::new();
    stack.push(1);
    let queue = LockedQueue::new();
    queue.push(1);
    let vector = LockedVector::new();
    vector.push_back(1);

    assert_eq!(exercise(&stack), 1);
    assert_eq!(exercise(&queue), 1);
    assert_eq!(exercise(&vector), 1);
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(queue.pop(), Some(1));
    assert_eq!(vector.pop_back(), Some(1));
}

#[test]
fn scenario_concurrent_queue_push_and_peek() {
    let queue = LockedQueue::<i64>::new();
    let config = WorkloadConfig {
        threads: 4,
        ops_per_thread: 5_000,
        mix: OpMix {
            insert: 1,
            remove: 0,
            contains: 1,
            select: 0,
        },
        ..WorkloadConfig::default()
    };

    let report = run_sequence_workload(&queue, &config).unwrap();

    // Half the operations are pushes on average
    assert!(queue.len() > 0 && queue.len() < 20_000);
    assert_eq!(report.busy_by_thread.len(), 4);
}

#[test]
fn scenario_sequence_workload_validates_config() {
    let stack = LockedStack::<i64>::new();
    let config = WorkloadConfig {
        key_space: -1,
        ..WorkloadConfig::default()
    };

    assert_eq!(
        run_sequence_workload(&stack, &config).unwrap_err(),
        ConfigError::EmptyKeySpace(-1)
    );
}
