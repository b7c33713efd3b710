//! Stress tests for the concurrent order-statistics tree.
//!
//! These tests verify:
//! 1. Invariants hold after heavy concurrent mutation
//! 2. Concurrent disjoint inserts reproduce sorted order exactly
//! 3. Determinism of seeded single-threaded sequences
//! 4. Contention accounting covers every worker thread
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_disjoint_ranges -- --nocapture
//! ```

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use rank_avl::{
    run_tree_workload, BalanceEngine, BusyTime, OpMix, OrderStatisticsTree, WorkloadConfig,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Worker threads for concurrent tests
const THREADS: usize = 4;

/// Keys inserted per worker in the disjoint-range test
const KEYS_PER_THREAD: i64 = 25_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Apply a seeded insert/remove sequence and return the resulting tree.
///
/// Same seed = same tree contents.
fn run_deterministic_sequence(seed: u64, count: usize) -> OrderStatisticsTree<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let tree = OrderStatisticsTree::with_capacity(count);

    for _ in 0..count {
        let key = rng.gen_range(0..10_000i64);
        if rng.gen_bool(0.7) {
            tree.insert(key);
        } else {
            tree.remove(key);
        }
    }

    tree
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// N threads insert disjoint key ranges concurrently.
///
/// # Verification
/// - Size equals the sum of inserted counts
/// - The tree is balanced with consistent ranks
/// - select() over the full range reproduces sorted order
#[test]
fn stress_disjoint_ranges() {
    println!("\n=== STRESS TEST: Disjoint Concurrent Inserts ===\n");

    let tree = Arc::new(OrderStatisticsTree::with_capacity(
        THREADS * KEYS_PER_THREAD as usize,
    ));
    let barrier = Arc::new(Barrier::new(THREADS));

    let start = Instant::now();
    let handles: Vec<_> = (0..THREADS as i64)
        .map(|t| {
            let tree = Arc::clone(&tree);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Interleave ascending and descending writers
                if t % 2 == 0 {
                    for key in t * KEYS_PER_THREAD..(t + 1) * KEYS_PER_THREAD {
                        tree.insert(key);
                    }
                } else {
                    for key in (t * KEYS_PER_THREAD..(t + 1) * KEYS_PER_THREAD).rev() {
                        tree.insert(key);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let elapsed = start.elapsed();

    let total = THREADS * KEYS_PER_THREAD as usize;
    println!("  Keys inserted:     {:>12}", total);
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  Tree height:       {:>12}", tree.height());

    assert_eq!(tree.len(), total);
    tree.validate().unwrap();
    for rank in 1..=total {
        assert_eq!(tree.select(rank), Some(rank as i64 - 1));
    }
    assert!(tree.select(total + 1).is_none());

    let work = tree.work_by_thread();
    // Workers plus the main thread's queries
    assert_eq!(work.len(), THREADS + 1);

    println!("\n=== DISJOINT INSERT TEST PASSED ===\n");
}

/// Concurrent writers and readers over an overlapping key space.
///
/// Readers run select/contains while writers insert and remove; at
/// quiescence the tree must satisfy every invariant.
#[test]
fn stress_mixed_readers_writers() {
    println!("\n=== STRESS TEST: Mixed Readers and Writers ===\n");

    let tree = OrderStatisticsTree::new();
    let config = WorkloadConfig {
        threads: THREADS,
        ops_per_thread: 50_000,
        prefill: 5_000,
        key_space: 10_000,
        seed: 99,
        mix: OpMix {
            insert: 3,
            remove: 3,
            contains: 2,
            select: 2,
        },
    };

    let report = run_tree_workload(&tree, &config).unwrap();

    println!("{}", report);
    println!("  Final tree size:   {:>12}", tree.len());

    tree.validate().unwrap();
    assert_eq!(report.busy_by_thread.len(), THREADS);
    assert_eq!(report.operations, 200_000);

    let keys = tree.to_vec();
    assert_eq!(keys.len(), tree.len());
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));

    println!("\n=== MIXED WORKLOAD TEST PASSED ===\n");
}

/// Writers only: every critical section is exclusive, so summed busy time
/// cannot exceed the wall clock.
#[test]
fn stress_writer_ratio_bounded() {
    let tree = OrderStatisticsTree::new();
    let config = WorkloadConfig {
        threads: THREADS,
        ops_per_thread: 20_000,
        key_space: 5_000,
        mix: OpMix {
            insert: 1,
            remove: 1,
            contains: 0,
            select: 0,
        },
        ..WorkloadConfig::default()
    };

    let report = run_tree_workload(&tree, &config).unwrap();
    let ratio = report.useful_work_ratio().unwrap();

    println!("  Writer-only ratio: {:.5}", ratio);
    assert!(ratio > 0.0);
    assert!(ratio <= 1.0, "exclusive sections overlapped: {}", ratio);
    tree.validate().unwrap();
}

/// Verify determinism: same seeded sequence produces the same contents.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_COUNT: usize = 20_000;
    const SEED: u64 = 12345;

    let tree1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let tree2 = run_deterministic_sequence(SEED, TEST_COUNT);

    println!("  Run 1 fingerprint: {}", tree1.fingerprint_hex());
    println!("  Run 2 fingerprint: {}", tree2.fingerprint_hex());

    assert_eq!(tree1.fingerprint(), tree2.fingerprint());
    assert_eq!(tree1.to_vec(), tree2.to_vec());

    let tree3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    println!("  Different seed:    {}", tree3.fingerprint_hex());
    assert_ne!(tree1.fingerprint(), tree3.fingerprint());

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Concurrent disjoint inserts end with the same contents as a serial replay.
#[test]
fn verify_concurrent_matches_serial() {
    let concurrent = OrderStatisticsTree::new();
    thread::scope(|s| {
        for t in 0..THREADS as i64 {
            let tree = &concurrent;
            s.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(t as u64);
                for _ in 0..5_000 {
                    // Key space partitioned by thread, duplicates allowed
                    tree.insert(rng.gen_range(0..1_000) * THREADS as i64 + t);
                }
            });
        }
    });

    let mut serial = BalanceEngine::new();
    for t in 0..THREADS as i64 {
        let mut rng = ChaCha8Rng::seed_from_u64(t as u64);
        for _ in 0..5_000 {
            serial.insert(rng.gen_range(0..1_000) * THREADS as i64 + t);
        }
    }
    let serial = OrderStatisticsTree::from_engine(serial);

    assert_eq!(concurrent.len(), 5_000 * THREADS);
    assert_eq!(concurrent.fingerprint(), serial.fingerprint());
    concurrent.validate().unwrap();
}

/// Test varying tree sizes to check height stays logarithmic.
#[test]
fn stress_scaling() {
    println!("\n=== SCALING TEST ===\n");

    let test_sizes = [1_000usize, 10_000, 100_000];

    println!("{:>12} {:>12} {:>12}", "Keys", "Time", "Height");
    println!("{:-<12} {:-<12} {:-<12}", "", "", "");

    for &size in &test_sizes {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let tree = OrderStatisticsTree::with_capacity(size);

        let start = Instant::now();
        for _ in 0..size {
            tree.insert(rng.gen::<i64>());
        }
        let elapsed = start.elapsed();
        let height = tree.height();

        println!("{:>12} {:>12.2?} {:>12}", size, elapsed, height);

        let bound = (1.4405 * ((size + 2) as f64).log2()).ceil() as u8;
        assert!(height <= bound, "height {} exceeds AVL bound {}", height, bound);
        tree.validate().unwrap();
    }

    println!("\n=== SCALING TEST COMPLETE ===\n");
}
