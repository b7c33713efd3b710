//! Multi-threaded workload runners.
//!
//! A run has three phases:
//!
//! 1. **Prefill**: keys `0..prefill` inserted from the calling thread
//! 2. **Reset**: busy-time counters cleared so prefill work is not reported
//! 3. **Timed run**: `threads` scoped workers, each with its own seeded RNG,
//!    issue `ops_per_thread` operations drawn from the mix
//!
//! Wall-clock time covers spawning the first worker to joining the last.

use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigError;
use crate::instrument::{BusyTime, ContentionReport};
use crate::sync::{LockedQueue, LockedStack, LockedVector};
use crate::tree::OrderStatisticsTree;
use crate::workload::{Op, WorkloadConfig};

/// Sequence operations the harness drives on the lock-guarded adapters.
pub trait SequenceLoad: BusyTime + Sync {
    fn push(&self, value: i64);
    fn pop(&self) -> Option<i64>;
    fn peek(&self) -> Option<i64>;
}

impl SequenceLoad for LockedStack<i64> {
    fn push(&self, value: i64) {
        LockedStack::push(self, value);
    }

    fn pop(&self) -> Option<i64> {
        LockedStack::pop(self)
    }

    fn peek(&self) -> Option<i64> {
        self.top()
    }
}

impl SequenceLoad for LockedQueue<i64> {
    fn push(&self, value: i64) {
        LockedQueue::push(self, value);
    }

    fn pop(&self) -> Option<i64> {
        LockedQueue::pop(self)
    }

    fn peek(&self) -> Option<i64> {
        self.front()
    }
}

impl SequenceLoad for LockedVector<i64> {
    fn push(&self, value: i64) {
        self.push_back(value);
    }

    fn pop(&self) -> Option<i64> {
        self.pop_back()
    }

    fn peek(&self) -> Option<i64> {
        self.back()
    }
}

/// Drive the tree with the configured mix and report contention.
///
/// # Example
///
/// ```
/// use rank_avl::tree::OrderStatisticsTree;
/// use rank_avl::workload::{run_tree_workload, WorkloadConfig};
///
/// let tree = OrderStatisticsTree::new();
/// let config = WorkloadConfig {
///     threads: 2,
///     ops_per_thread: 1_000,
///     key_space: 500,
///     ..WorkloadConfig::default()
/// };
///
/// let report = run_tree_workload(&tree, &config).unwrap();
/// assert_eq!(report.operations, 2_000);
/// assert!(tree.validate().is_ok());
/// ```
pub fn run_tree_workload(
    tree: &OrderStatisticsTree<i64>,
    config: &WorkloadConfig,
) -> Result<ContentionReport, ConfigError> {
    config.validate()?;

    for key in 0..config.prefill as i64 {
        tree.insert(key);
    }
    tree.reset_work();
    log::debug!(
        "tree prefilled with {} keys, starting {} workers",
        config.prefill,
        config.threads
    );

    let key_space = config.key_space;
    let wall_clock = run_workers(config, |op, rng| match op {
        Op::Insert => tree.insert(rng.gen_range(0..key_space)),
        Op::Remove => {
            tree.remove(rng.gen_range(0..key_space));
        }
        Op::Contains => {
            tree.contains(rng.gen_range(0..key_space));
        }
        Op::Select => {
            tree.select(rng.gen_range(1..=key_space as usize));
        }
    });
    let busy = tree.work_by_thread();
    log::debug!("tree workload finished in {:?}, {} keys", wall_clock, tree.len());

    Ok(ContentionReport::new(
        wall_clock,
        busy,
        config.total_operations(),
    ))
}

/// Drive a sequence adapter with the configured mix and report contention.
///
/// Insert maps to push, remove to pop, contains and select to peek.
pub fn run_sequence_workload<S: SequenceLoad>(
    sequence: &S,
    config: &WorkloadConfig,
) -> Result<ContentionReport, ConfigError> {
    config.validate()?;

    for value in 0..config.prefill as i64 {
        sequence.push(value);
    }
    sequence.reset_work();
    log::debug!(
        "sequence prefilled with {} values, starting {} workers",
        config.prefill,
        config.threads
    );

    let key_space = config.key_space;
    let wall_clock = run_workers(config, |op, rng| match op {
        Op::Insert => sequence.push(rng.gen_range(0..key_space)),
        Op::Remove => {
            sequence.pop();
        }
        Op::Contains | Op::Select => {
            sequence.peek();
        }
    });
    log::debug!("sequence workload finished in {:?}", wall_clock);

    Ok(ContentionReport::new(
        wall_clock,
        sequence.work_by_thread(),
        config.total_operations(),
    ))
}

/// Spawn the workers, apply `ops_per_thread` operations on each, and return
/// the wall-clock span.
fn run_workers<F>(config: &WorkloadConfig, apply: F) -> Duration
where
    F: Fn(Op, &mut ChaCha8Rng) + Sync,
{
    let total_weight = config.mix.total();
    let started = Instant::now();
    thread::scope(|s| {
        for worker in 0..config.threads {
            let apply = &apply;
            s.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(worker as u64));
                for _ in 0..config.ops_per_thread {
                    let op = config.mix.pick(rng.gen_range(0..total_weight));
                    apply(op, &mut rng);
                }
                log::trace!("worker {} done", worker);
            });
        }
    });
    started.elapsed()
}

// ============================================================================
// Unit Tests
// ============================================================================
